//! Errors returned by the tokenizer and the tree builder.
//!
//! Parsing never recovers: the first error aborts the whole fragment.

use thiserror::Error;

/// Why a tag could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// Input ended inside a tag.
    #[error("unterminated tag")]
    UnterminatedTag,
    /// Input ended inside a quoted attribute value.
    #[error("unterminated attribute value")]
    UnterminatedAttributeValue,
    /// A `<` not followed by a tag name, e.g. `a < b`.
    #[error("missing tag name after '<'")]
    MissingTagName,
    /// `<!...>` or `<?...>`: comments, DOCTYPE, CDATA and processing
    /// instructions are not part of the accepted dialect.
    #[error("markup declarations are not supported")]
    MarkupDeclaration,
    /// A character that cannot appear at this point of a tag.
    #[error("unexpected character {0:?} in tag")]
    UnexpectedCharacter(char),
    /// `name=value` without quotes.
    #[error("attribute value must be quoted")]
    UnquotedAttributeValue,
    /// `name=` followed directly by `>`.
    #[error("missing attribute value after '='")]
    MissingAttributeValue,
    /// A close tag with attributes or a trailing `/`.
    #[error("close tags cannot carry attributes or '/'")]
    MalformedCloseTag,
    /// Non-whitespace text before or after the root element.
    #[error("text outside the root element")]
    StrayText,
}

/// Why the tag structure does not nest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnbalancedReason {
    /// A close tag that does not match the innermost open element.
    #[error("unexpected </{found}>{}", expected_suffix(.expected.as_deref()))]
    UnexpectedClose {
        /// Tag name of the close tag.
        found: String,
        /// Tag name of the innermost open element, if any.
        expected: Option<String>,
    },
    /// Input ended while an element was still open.
    #[error("<{open}> is never closed")]
    Unclosed {
        /// Tag name of the innermost unclosed element.
        open: String,
    },
    /// A second element after the root element was closed.
    #[error("second root element <{tag}>")]
    SecondRoot {
        /// Tag name of the extra element.
        tag: String,
    },
}

fn expected_suffix(expected: Option<&str>) -> String {
    expected.map_or_else(String::new, |tag| format!(", expected </{tag}>"))
}

/// A fragment that could not be parsed.
///
/// `offset` is the byte offset into the fragment where the problem was
/// detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unterminated tag or attribute syntax.
    #[error("malformed tag at byte {offset}: {reason}")]
    MalformedTag {
        /// Byte offset of the problem.
        offset: usize,
        /// What was wrong.
        reason: MalformedReason,
    },
    /// Close tag does not match the open elements, or input ended with
    /// unclosed elements.
    #[error("unbalanced markup at byte {offset}: {reason}")]
    UnbalancedTag {
        /// Byte offset of the problem.
        offset: usize,
        /// What was wrong.
        reason: UnbalancedReason,
    },
    /// The fragment contains no element.
    #[error("fragment contains no element")]
    EmptyInput,
}

impl ParseError {
    /// Byte offset of the problem, if it has one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::MalformedTag { offset, .. } | Self::UnbalancedTag { offset, .. } => Some(*offset),
            Self::EmptyInput => None,
        }
    }

    pub(crate) const fn malformed(offset: usize, reason: MalformedReason) -> Self {
        Self::MalformedTag { offset, reason }
    }

    pub(crate) const fn unbalanced(offset: usize, reason: UnbalancedReason) -> Self {
        Self::UnbalancedTag { offset, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_close_message() {
        let err = ParseError::unbalanced(
            12,
            UnbalancedReason::UnexpectedClose {
                found: "p".to_string(),
                expected: Some("div".to_string()),
            },
        );
        assert_eq!(
            err.to_string(),
            "unbalanced markup at byte 12: unexpected </p>, expected </div>"
        );
    }

    #[test]
    fn test_unexpected_close_without_open_element() {
        let reason = UnbalancedReason::UnexpectedClose {
            found: "p".to_string(),
            expected: None,
        };
        assert_eq!(reason.to_string(), "unexpected </p>");
    }

    #[test]
    fn test_offset() {
        assert_eq!(
            ParseError::malformed(3, MalformedReason::MissingTagName).offset(),
            Some(3)
        );
        assert_eq!(ParseError::EmptyInput.offset(), None);
    }
}
