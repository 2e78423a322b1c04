//! Parser configuration: which tags are inline, which are void, and how
//! strictly stray void close tags are treated.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tagtree_dom::VOID_TAGS;

/// Tags whose markup is kept verbatim in the enclosing element's text
/// instead of becoming child elements.
pub const DEFAULT_INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "del", "dfn", "em", "i", "ins", "kbd",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

static DEFAULT_CONFIG: LazyLock<ParserConfig> = LazyLock::new(ParserConfig::default);

/// Settings for the tokenizer and tree builder.
///
/// Deserializable from a config file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Inline whitelist.
    pub inline_tags: BTreeSet<String>,
    /// Tags that are self-closing even without a trailing `/>`.
    pub void_tags: BTreeSet<String>,
    /// If true, a close tag for a void element that does not match the
    /// innermost open element is an error instead of being ignored.
    pub strict: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            inline_tags: DEFAULT_INLINE_TAGS.iter().map(|t| (*t).to_string()).collect(),
            void_tags: VOID_TAGS.iter().map(|t| (*t).to_string()).collect(),
            strict: false,
        }
    }
}

impl ParserConfig {
    /// Shared default configuration.
    #[must_use]
    pub fn default_ref() -> &'static Self {
        &DEFAULT_CONFIG
    }

    /// Add a tag to the inline whitelist.
    #[must_use]
    pub fn with_inline_tag(mut self, tag: &str) -> Self {
        let _ = self.inline_tags.insert(tag.to_ascii_lowercase());
        self
    }

    /// Remove a tag from the inline whitelist.
    #[must_use]
    pub fn without_inline_tag(mut self, tag: &str) -> Self {
        let _ = self.inline_tags.remove(&tag.to_ascii_lowercase());
        self
    }

    /// Add a tag to the void set.
    #[must_use]
    pub fn with_void_tag(mut self, tag: &str) -> Self {
        let _ = self.void_tags.insert(tag.to_ascii_lowercase());
        self
    }

    /// Enable strict mode - stray void close tags become errors.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Lower-case every tag name, for sets read from a config file.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            inline_tags: lowercase_all(self.inline_tags),
            void_tags: lowercase_all(self.void_tags),
            strict: self.strict,
        }
    }

    /// Returns true if nested `tag` markup is kept verbatim.
    #[must_use]
    pub fn is_inline(&self, tag: &str) -> bool {
        self.inline_tags.contains(tag)
    }

    /// Returns true if `tag` never has a close tag.
    #[must_use]
    pub fn is_void(&self, tag: &str) -> bool {
        self.void_tags.contains(tag)
    }
}

fn lowercase_all(tags: BTreeSet<String>) -> BTreeSet<String> {
    tags.into_iter().map(|t| t.to_ascii_lowercase()).collect()
}
