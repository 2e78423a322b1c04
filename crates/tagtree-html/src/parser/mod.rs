//! Tree construction.
//!
//! [`Parser`] drives the tokenizer and folds its tokens into a single
//! [`Element`]. Nested tags in the inline whitelist are not turned into
//! children; their markup is kept verbatim in the enclosing element's text.

mod tree_builder;

use tagtree_dom::Element;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::tokenizer::HTMLTokenizer;
use tree_builder::TreeBuilder;

/// Parses HTML fragments into [`Element`] trees.
///
/// A parser holds only its configuration, so one instance can be shared
/// across threads and reused for any number of fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// A parser with the default inline and void tag sets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser using `config`. Tag names in the config are lower-cased.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one fragment.
    ///
    /// The fragment must hold exactly one root element; whitespace around it
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedTag`] for markup the tokenizer cannot
    /// read, [`ParseError::UnbalancedTag`] for mismatched or unclosed tags,
    /// and [`ParseError::EmptyInput`] when there is no element at all.
    pub fn parse(&self, html: &str) -> Result<Element, ParseError> {
        let tokens = HTMLTokenizer::with_config(html, &self.config);
        TreeBuilder::new(html, &self.config).run(tokens)
    }
}

/// Parse one fragment with the default configuration.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse(html: &str) -> Result<Element, ParseError> {
    Parser::new().parse(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config_normalizes_names() {
        let parser = Parser::with_config(ParserConfig::default().with_inline_tag("MyTag"));
        assert!(parser.config().is_inline("mytag"));
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
