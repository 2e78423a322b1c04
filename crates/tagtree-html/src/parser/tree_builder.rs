use tagtree_common::warning::warn_once;
use tagtree_dom::{AttrValue, AttributesMap, CLASS_ATTRIBUTE, Element};

use crate::config::ParserConfig;
use crate::error::{MalformedReason, ParseError, UnbalancedReason};
use crate::tokenizer::{Attribute, HTMLTokenizer, Span, Token};

/// An element whose close tag has not been seen yet.
#[derive(Debug)]
struct Frame {
    tag: String,
    attr: AttributesMap,
    /// Literal content so far, untrimmed.
    text: String,
    /// Whitespace-only text that is kept only if more text or inline
    /// markup follows before the next structural tag.
    pending_whitespace: String,
    children: Vec<Element>,
}

impl Frame {
    fn new(tag: String, attributes: Vec<Attribute>) -> Self {
        Self {
            tag,
            attr: attributes_to_map(attributes),
            text: String::new(),
            pending_whitespace: String::new(),
            children: Vec::new(),
        }
    }

    /// Append literal content, keeping any whitespace that preceded it.
    fn push_text(&mut self, text: &str) {
        self.text.push_str(&self.pending_whitespace);
        self.pending_whitespace.clear();
        self.text.push_str(text);
    }

    /// A structural tag follows: whitespace before it carries no content.
    fn drop_pending_whitespace(&mut self) {
        self.pending_whitespace.clear();
    }

    fn finish(self) -> Element {
        let trimmed = self.text.trim();
        Element {
            tag: self.tag,
            text: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            attr: self.attr,
            child: self.children,
        }
    }
}

/// Convert tokenizer attributes into the element attribute map.
///
/// `class` is split into a class list; valueless attributes become flags.
fn attributes_to_map(attributes: Vec<Attribute>) -> AttributesMap {
    let mut map = AttributesMap::new();
    for Attribute { name, value } in attributes {
        let value = match value {
            None => AttrValue::Flag,
            Some(raw) if name == CLASS_ATTRIBUTE => AttrValue::class_list(&raw),
            Some(raw) => AttrValue::String(raw),
        };
        let _ = map.entry(name).or_insert(value);
    }
    map
}

/// Builds one [`Element`] from a token stream.
///
/// Structural elements live on `stack`. While an inline tag is open,
/// `inline_stack` holds the names of the open inline-level tags and every
/// token is copied verbatim into the text of the innermost frame.
pub(super) struct TreeBuilder<'a> {
    source: &'a str,
    config: &'a ParserConfig,
    stack: Vec<Frame>,
    inline_stack: Vec<String>,
    root: Option<Element>,
}

impl<'a> TreeBuilder<'a> {
    pub(super) const fn new(source: &'a str, config: &'a ParserConfig) -> Self {
        Self {
            source,
            config,
            stack: Vec::new(),
            inline_stack: Vec::new(),
            root: None,
        }
    }

    /// Consume every token and return the root element.
    pub(super) fn run(mut self, tokens: HTMLTokenizer<'a>) -> Result<Element, ParseError> {
        for token in tokens {
            self.process_token(token?)?;
        }
        self.finish()
    }

    fn process_token(&mut self, token: Token) -> Result<(), ParseError> {
        if self.inline_stack.is_empty() {
            self.process_structural(token)
        } else {
            self.process_inline(&token)
        }
    }

    /// Tokens inside inline markup are copied as written.
    fn process_inline(&mut self, token: &Token) -> Result<(), ParseError> {
        let span = token.span();
        match token {
            Token::OpenTag { name, .. } => {
                self.inline_stack.push(name.clone());
            }
            Token::CloseTag { name, .. } => {
                if self.inline_stack.last() == Some(name) {
                    let _ = self.inline_stack.pop();
                } else if self.tolerate_void_close(name) {
                    return Ok(());
                } else {
                    return Err(ParseError::unbalanced(
                        span.start,
                        UnbalancedReason::UnexpectedClose {
                            found: name.clone(),
                            expected: self.inline_stack.last().cloned(),
                        },
                    ));
                }
            }
            Token::SelfClosingTag { .. } | Token::Text { .. } => {}
        }
        self.append_verbatim(span);
        Ok(())
    }

    fn process_structural(&mut self, token: Token) -> Result<(), ParseError> {
        let span = token.span();
        match token {
            Token::Text { data, .. } => self.insert_text(&data, span),
            Token::OpenTag {
                name, attributes, ..
            } => {
                if self.config.is_inline(&name) && !self.stack.is_empty() {
                    self.append_verbatim(span);
                    self.inline_stack.push(name);
                    return Ok(());
                }
                self.check_single_root(&name, span)?;
                if let Some(frame) = self.stack.last_mut() {
                    frame.drop_pending_whitespace();
                }
                self.stack.push(Frame::new(name, attributes));
                Ok(())
            }
            Token::SelfClosingTag {
                name, attributes, ..
            } => {
                if self.config.is_inline(&name) && !self.stack.is_empty() {
                    self.append_verbatim(span);
                    return Ok(());
                }
                self.check_single_root(&name, span)?;
                self.insert_element(Frame::new(name, attributes).finish());
                Ok(())
            }
            Token::CloseTag { name, .. } => self.close_element(&name, span),
        }
    }

    fn insert_text(&mut self, data: &str, span: Span) -> Result<(), ParseError> {
        let whitespace_only = data.chars().all(char::is_whitespace);
        match self.stack.last_mut() {
            Some(frame) if whitespace_only => frame.pending_whitespace.push_str(data),
            Some(frame) => frame.push_text(data),
            None if whitespace_only => {}
            None => {
                let offset = span.start + (data.len() - data.trim_start().len());
                return Err(ParseError::malformed(offset, MalformedReason::StrayText));
            }
        }
        Ok(())
    }

    fn close_element(&mut self, name: &str, span: Span) -> Result<(), ParseError> {
        match self.stack.last() {
            Some(frame) if frame.tag == name => {}
            _ if self.tolerate_void_close(name) => return Ok(()),
            top => {
                return Err(ParseError::unbalanced(
                    span.start,
                    UnbalancedReason::UnexpectedClose {
                        found: name.to_string(),
                        expected: top.map(|frame| frame.tag.clone()),
                    },
                ));
            }
        }
        if let Some(frame) = self.stack.pop() {
            self.insert_element(frame.finish());
        }
        Ok(())
    }

    /// Attach a finished element to the innermost frame, or make it the root.
    fn insert_element(&mut self, element: Element) {
        if let Some(parent) = self.stack.last_mut() {
            parent.drop_pending_whitespace();
            parent.children.push(element);
        } else {
            self.root = Some(element);
        }
    }

    fn append_verbatim(&mut self, span: Span) {
        let raw = span.slice(self.source);
        if let Some(frame) = self.stack.last_mut() {
            frame.push_text(raw);
        }
    }

    /// `<img></img>`: a close tag for a void element is ignored outside
    /// strict mode.
    fn tolerate_void_close(&self, name: &str) -> bool {
        if self.config.strict || !self.config.is_void(name) {
            return false;
        }
        warn_once(
            "Tree Builder",
            &format!("ignoring close tag </{name}> for void element"),
        );
        true
    }

    fn check_single_root(&self, name: &str, span: Span) -> Result<(), ParseError> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(ParseError::unbalanced(
                span.start,
                UnbalancedReason::SecondRoot {
                    tag: name.to_string(),
                },
            ));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Element, ParseError> {
        let end = self.source.len();
        if let Some(open) = self.inline_stack.pop().or_else(|| {
            self.stack.last().map(|frame| frame.tag.clone())
        }) {
            return Err(ParseError::unbalanced(
                end,
                UnbalancedReason::Unclosed { open },
            ));
        }
        self.root.ok_or(ParseError::EmptyInput)
    }
}
