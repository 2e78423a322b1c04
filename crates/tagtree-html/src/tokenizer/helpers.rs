//! Helper functions for the fragment tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - Error construction

use super::state_machine::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::{MalformedReason, ParseError};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer<'_> {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer<'_> {
    /// "Consume the next input character"
    ///
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.current_pos..)?.chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Byte offset of the current input character, or the input length at
    /// end of input.
    pub(super) fn char_offset(&self) -> usize {
        self.current_input_character
            .map_or(self.current_pos, |c| self.current_pos - c.len_utf8())
    }

    /// ASCII whitespace: TAB, LF, FF, CR and SPACE.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer<'_> {
    /// Emit the pending text run, if any, ending at `end`.
    pub(super) fn emit_text(&mut self, end: usize) {
        if let Some((data, span)) = self.pending_text(end) {
            self.emitted = Some(Token::Text { data, span });
        }
    }

    /// "Emit the current tag token" and return to the data state.
    ///
    /// Must be called while the current input character is the closing `>`.
    pub(super) fn emit_tag(&mut self) {
        if let Some(tag) = self.current_tag.take() {
            let config = self.config;
            self.emitted = Some(tag.finish(self.current_pos, |name| config.is_void(name)));
        }
        self.text_start = self.current_pos;
        self.switch_to(TokenizerState::Data);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer<'_> {
    /// "Start a new attribute in the current tag token."
    ///
    /// Close tags cannot have attributes.
    pub(super) fn start_attribute(&mut self) -> Result<(), ParseError> {
        if self.current_tag.as_ref().is_some_and(|tag| tag.is_close) {
            return Err(self.error(MalformedReason::MalformedCloseTag));
        }
        if let Some(ref mut tag) = self.current_tag {
            tag.start_new_attribute();
        }
        Ok(())
    }

    /// The current attribute has a value, even if it turns out to be `""`.
    pub(super) fn begin_attribute_value(&mut self) {
        if let Some(ref mut tag) = self.current_tag {
            tag.begin_current_attribute_value();
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer<'_> {
    /// Build a malformed-tag error at the current input character.
    pub(super) fn error(&self, reason: MalformedReason) -> ParseError {
        ParseError::malformed(self.char_offset(), reason)
    }
}
