//! HTML fragment tokenizer and tree builder for tagtree.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: a reduced HTML tokenizer state machine with only the
//!   data and tag states. Tokens carry byte spans into the source.
//! - **Tree builder**: folds the tokens into one [`Element`] using an
//!   explicit stack of open elements. Tags in the inline whitelist keep
//!   their markup verbatim in the enclosing element's text.
//!
//! # Not supported
//!
//! - Comments, DOCTYPE and processing instructions
//! - Character reference decoding (entities pass through as written)
//! - Unquoted attribute values
//! - Implied end tags and error recovery
//!
//! ```
//! use tagtree_html::parse;
//!
//! let root = parse(r#"<p class="lead">Hello <b>world</b></p>"#).unwrap();
//! assert_eq!(root.text(), Some("Hello <b>world</b>"));
//! ```
//!
//! [`Element`]: tagtree_dom::Element

/// Parser settings.
pub mod config;
/// Errors returned by the tokenizer and tree builder.
pub mod error;
/// Tree construction.
pub mod parser;
/// Fragment tokenizer.
pub mod tokenizer;

pub use config::{DEFAULT_INLINE_TAGS, ParserConfig};
pub use error::{MalformedReason, ParseError, UnbalancedReason};
pub use parser::{Parser, parse};
pub use tokenizer::{Attribute, HTMLTokenizer, Span, Token, TokenizerState, tokenize};
