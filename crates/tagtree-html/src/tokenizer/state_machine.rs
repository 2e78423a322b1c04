use strum_macros::Display;

use super::token::{PendingTag, Span, Token};
use crate::config::ParserConfig;
use crate::error::{MalformedReason, ParseError};

/// The tokenizer states.
///
/// A reduced version of the HTML tokenizer state machine: only the data
/// state and the tag states exist, since comments, DOCTYPE, raw text
/// elements and character references are not part of the accepted dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Text between tags.
    Data,
    /// Just after `<`.
    TagOpen,
    /// Just after `</`.
    EndTagOpen,
    /// Reading the tag name.
    TagName,
    /// Between attributes.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`.
    BeforeAttributeValue,
    /// Inside `"..."`.
    AttributeValueDoubleQuoted,
    /// Inside `'...'`.
    AttributeValueSingleQuoted,
    /// Just after a closing quote.
    AfterAttributeValueQuoted,
    /// After `/` inside a tag.
    SelfClosingStartTag,
}

/// Streaming tokenizer over one fragment.
///
/// Tokens are produced lazily through [`Iterator`]. The first error ends
/// the stream: after yielding `Err`, the iterator only yields `None`.
pub struct HTMLTokenizer<'a> {
    pub(super) state: TokenizerState,
    pub(super) input: &'a str,
    pub(super) config: &'a ParserConfig,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    // When true, the next iteration of the main loop will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    pub(super) current_tag: Option<PendingTag>,
    /// Byte offset where the pending text run starts.
    pub(super) text_start: usize,
    pub(super) emitted: Option<Token>,
    pub(super) finished: bool,
}

impl<'a> HTMLTokenizer<'a> {
    /// Create a tokenizer with the default void element set.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default_ref())
    }

    /// Create a tokenizer that takes its void element set from `config`.
    #[must_use]
    pub const fn with_config(input: &'a str, config: &'a ParserConfig) -> Self {
        HTMLTokenizer {
            state: TokenizerState::Data,
            input,
            config,
            current_pos: 0,
            current_input_character: None,
            reconsume: false,
            current_tag: None,
            text_start: 0,
            emitted: None,
            finished: false,
        }
    }

    /// The fragment being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    /// Current state, for debugging.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Run the tokenizer to completion and collect every token.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError::MalformedTag`] encountered.
    pub fn run(self) -> Result<Vec<Token>, ParseError> {
        self.collect()
    }

    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                let tag_start = self.char_offset();
                self.emit_text(tag_start);
                self.current_tag = Some(PendingTag::new_open(tag_start));
                self.switch_to(TokenizerState::TagOpen);
            }
            None => {
                self.emit_text(self.input.len());
                self.finished = true;
            }
            // Text stays in the input; it is sliced out when the run ends.
            Some(_) => {}
        }
    }

    fn handle_tag_open_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some('/') => {
                if let Some(tag) = self.current_tag.take() {
                    self.current_tag = Some(PendingTag::new_close(tag.start));
                }
                self.switch_to(TokenizerState::EndTagOpen);
                Ok(())
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.reconsume_in(TokenizerState::TagName);
                Ok(())
            }
            Some('!' | '?') => Err(self.error(MalformedReason::MarkupDeclaration)),
            None => Err(self.error(MalformedReason::UnterminatedTag)),
            Some(_) => Err(self.error(MalformedReason::MissingTagName)),
        }
    }

    fn handle_end_tag_open_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.reconsume_in(TokenizerState::TagName);
                Ok(())
            }
            None => Err(self.error(MalformedReason::UnterminatedTag)),
            Some(_) => Err(self.error(MalformedReason::MissingTagName)),
        }
    }

    fn handle_tag_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.emit_tag();
            }
            Some(c @ ('<' | '"' | '\'' | '=')) => {
                return Err(self.error(MalformedReason::UnexpectedCharacter(c)));
            }
            None => return Err(self.error(MalformedReason::UnterminatedTag)),
            // "ASCII upper alpha - Append the lowercase version of the current input
            // character to the current tag token's tag name."
            Some(c) => {
                if let Some(ref mut tag) = self.current_tag {
                    tag.append_to_tag_name(c.to_ascii_lowercase());
                }
            }
        }
        Ok(())
    }

    fn handle_before_attribute_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.emit_tag();
            }
            Some(c @ ('=' | '"' | '\'' | '<')) => {
                return Err(self.error(MalformedReason::UnexpectedCharacter(c)));
            }
            None => return Err(self.error(MalformedReason::UnterminatedTag)),
            Some(_) => {
                self.start_attribute()?;
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
        Ok(())
    }

    fn handle_attribute_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some(c @ ('"' | '\'' | '<')) => {
                return Err(self.error(MalformedReason::UnexpectedCharacter(c)));
            }
            None => return Err(self.error(MalformedReason::UnterminatedTag)),
            Some(c) => {
                if let Some(ref mut tag) = self.current_tag {
                    tag.append_to_current_attribute_name(c.to_ascii_lowercase());
                }
            }
        }
        Ok(())
    }

    fn handle_after_attribute_name_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.emit_tag();
            }
            Some(c @ ('"' | '\'' | '<')) => {
                return Err(self.error(MalformedReason::UnexpectedCharacter(c)));
            }
            None => return Err(self.error(MalformedReason::UnterminatedTag)),
            Some(_) => {
                self.start_attribute()?;
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
        Ok(())
    }

    fn handle_before_attribute_value_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => {
                self.begin_attribute_value();
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            Some('\'') => {
                self.begin_attribute_value();
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            Some('>') => return Err(self.error(MalformedReason::MissingAttributeValue)),
            None => return Err(self.error(MalformedReason::UnterminatedTag)),
            Some(_) => return Err(self.error(MalformedReason::UnquotedAttributeValue)),
        }
        Ok(())
    }

    fn handle_attribute_value_quoted_state(&mut self, quote: char) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            None => return Err(self.error(MalformedReason::UnterminatedAttributeValue)),
            Some(c) => {
                if let Some(ref mut tag) = self.current_tag {
                    tag.append_to_current_attribute_value(c);
                }
            }
        }
        Ok(())
    }

    fn handle_after_attribute_value_quoted_state(&mut self) -> Result<(), ParseError> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.emit_tag();
            }
            None => return Err(self.error(MalformedReason::UnterminatedTag)),
            Some(c) => return Err(self.error(MalformedReason::UnexpectedCharacter(c))),
        }
        Ok(())
    }

    fn handle_self_closing_start_tag_state(&mut self) -> Result<(), ParseError> {
        if self.current_tag.as_ref().is_some_and(|tag| tag.is_close) {
            return Err(self.error(MalformedReason::MalformedCloseTag));
        }
        match self.current_input_character {
            Some('>') => {
                if let Some(ref mut tag) = self.current_tag {
                    tag.set_self_closing();
                }
                self.emit_tag();
                Ok(())
            }
            None => Err(self.error(MalformedReason::UnterminatedTag)),
            Some(c) => Err(self.error(MalformedReason::UnexpectedCharacter(c))),
        }
    }

    /// Process the current input character in the current state.
    fn step(&mut self) -> Result<(), ParseError> {
        match self.state {
            TokenizerState::Data => {
                self.handle_data_state();
                Ok(())
            }
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"')
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'')
            }
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state()
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
        }
    }
}

impl Iterator for HTMLTokenizer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            // Each state begins by consuming the next input character,
            // unless we're reconsuming from a previous state transition.
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            if let Err(err) = self.step() {
                self.finished = true;
                self.emitted = None;
                return Some(Err(err));
            }
            if let Some(token) = self.emitted.take() {
                return Some(Ok(token));
            }
        }
        self.emitted.take().map(Ok)
    }
}

/// Tokenize a whole fragment with the default configuration.
///
/// # Errors
///
/// Returns the first [`ParseError::MalformedTag`] encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    HTMLTokenizer::new(input).run()
}

impl HTMLTokenizer<'_> {
    /// The text of the pending run, ending at `end`.
    pub(super) fn pending_text(&self, end: usize) -> Option<(String, Span)> {
        let span = Span::new(self.text_start, end);
        let text = span.slice(self.input);
        (!text.is_empty()).then(|| (text.to_string(), span))
    }
}
