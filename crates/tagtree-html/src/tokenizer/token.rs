use core::fmt;

use strum_macros::Display;

use tagtree_common::warning::warn_once;

/// A byte range of the source fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The spanned source text.
    ///
    /// Returns an empty string if the span does not fit `source`.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or_default()
    }
}

/// An attribute on an open or self-closing tag.
///
/// `value` is `None` for an attribute written without `="..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Raw value between the quotes, or `None` for a flag.
    pub value: Option<String>,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: Option<String>) -> Self {
        Self { name, value }
    }
}

/// The events produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Token {
    /// `<name attr="v">`
    OpenTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes in source order, duplicates removed.
        attributes: Vec<Attribute>,
        /// Location of the whole tag.
        span: Span,
    },
    /// `</name>`
    CloseTag {
        /// Lower-cased tag name.
        name: String,
        /// Location of the whole tag.
        span: Span,
    },
    /// `<name/>`, or a void element such as `<img>`.
    SelfClosingTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes in source order, duplicates removed.
        attributes: Vec<Attribute>,
        /// Location of the whole tag.
        span: Span,
    },
    /// A run of text between tags, exactly as written.
    Text {
        /// The raw text.
        data: String,
        /// Location of the run.
        span: Span,
    },
}

impl Token {
    /// Location of the token in the source.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::OpenTag { span, .. }
            | Self::CloseTag { span, .. }
            | Self::SelfClosingTag { span, .. }
            | Self::Text { span, .. } => *span,
        }
    }

    /// Tag name, for tag tokens.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::OpenTag { name, .. }
            | Self::CloseTag { name, .. }
            | Self::SelfClosingTag { name, .. } => Some(name),
            Self::Text { .. } => None,
        }
    }

    /// Returns true for a text run made only of whitespace.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Text { data, .. } if data.chars().all(char::is_whitespace))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}=\"{value}\"", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Render a token for debugging output, one line per token.
#[must_use]
pub fn describe(token: &Token) -> String {
    let span = token.span();
    let body = match token {
        Token::OpenTag {
            name, attributes, ..
        }
        | Token::SelfClosingTag {
            name, attributes, ..
        } => {
            let mut out = format!("<{name}");
            for attr in attributes {
                out.push(' ');
                out.push_str(&attr.to_string());
            }
            out.push('>');
            out
        }
        Token::CloseTag { name, .. } => format!("</{name}>"),
        Token::Text { data, .. } => format!("{data:?}"),
    };
    format!("{}..{} {token} {body}", span.start, span.end)
}

/// A tag whose characters are still being read.
///
/// Mirrors the "current tag token" of the tokenizer state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingTag {
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) is_close: bool,
    pub(crate) self_closing: bool,
    pub(crate) start: usize,
}

impl PendingTag {
    /// Start an open tag whose `<` is at `start`.
    pub(crate) const fn new_open(start: usize) -> Self {
        Self {
            name: String::new(),
            attributes: Vec::new(),
            is_close: false,
            self_closing: false,
            start,
        }
    }

    /// Start a close tag whose `<` is at `start`.
    pub(crate) const fn new_close(start: usize) -> Self {
        Self {
            name: String::new(),
            attributes: Vec::new(),
            is_close: true,
            self_closing: false,
            start,
        }
    }

    pub(crate) fn append_to_tag_name(&mut self, c: char) {
        self.name.push(c);
    }

    pub(crate) fn start_new_attribute(&mut self) {
        self.attributes.push(Attribute::new(String::new(), None));
    }

    pub(crate) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.attributes.last_mut() {
            attr.name.push(c);
        }
    }

    /// Mark the current attribute as having a (so far empty) value.
    pub(crate) fn begin_current_attribute_value(&mut self) {
        if let Some(attr) = self.attributes.last_mut() {
            attr.value = Some(String::new());
        }
    }

    pub(crate) fn append_to_current_attribute_value(&mut self, c: char) {
        if let Some(value) = self
            .attributes
            .last_mut()
            .and_then(|attr| attr.value.as_mut())
        {
            value.push(c);
        }
    }

    pub(crate) const fn set_self_closing(&mut self) {
        self.self_closing = true;
    }

    /// Finish the tag whose `>` ends just before `end`.
    ///
    /// "If there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    pub(crate) fn finish(self, end: usize, is_void: impl Fn(&str) -> bool) -> Token {
        let span = Span::new(self.start, end);
        if self.is_close {
            return Token::CloseTag {
                name: self.name,
                span,
            };
        }

        let mut attributes: Vec<Attribute> = Vec::with_capacity(self.attributes.len());
        for attr in self.attributes {
            if attributes.iter().any(|seen| seen.name == attr.name) {
                warn_once(
                    "HTML Tokenizer",
                    &format!("duplicate attribute '{}' on <{}> ignored", attr.name, self.name),
                );
            } else {
                attributes.push(attr);
            }
        }

        if self.self_closing || is_void(&self.name) {
            Token::SelfClosingTag {
                name: self.name,
                attributes,
                span,
            }
        } else {
            Token::OpenTag {
                name: self.name,
                attributes,
                span,
            }
        }
    }
}
