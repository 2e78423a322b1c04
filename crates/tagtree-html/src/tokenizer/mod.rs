//! Fragment tokenizer module.
//!
//! Turns a fragment into open, close, self-closing and text tokens, each
//! carrying the byte span it was read from.

/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Tokenizer state machine implementation.
pub mod state_machine;
/// Token types produced by the tokenizer.
pub mod token;

pub use state_machine::{HTMLTokenizer, TokenizerState, tokenize};
pub use token::{Attribute, Span, Token, describe};
