//! Element tree for the tagtree fragment converter.
//!
//! This crate provides the owned tree that the parser in `tagtree-html`
//! produces, and its JSON-shaped rendering.
//!
//! # Design
//!
//! Unlike a browser DOM, a fragment tree has no parent pointers and no
//! text nodes: each [`Element`] exclusively owns its children and carries
//! its literal content in an optional `text` field. Rendering is a pure
//! function of the tree, so a tree can be rendered any number of times.
//!
//! The reverse direction lives in [`rendered`] (JSON value back to an
//! [`Element`]) and [`emit`] (an [`Element`] back to HTML text).

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// HTML re-emission of element trees.
pub mod emit;
/// Conversion from the rendered JSON shape back into an element tree.
pub mod rendered;

pub use rendered::ShapeError;

/// Map of attribute names to values for an element.
///
/// Ordered by name so that rendering and re-emission are byte-stable.
pub type AttributesMap = BTreeMap<String, AttrValue>;

/// Name of the attribute that is split into a class list.
pub const CLASS_ATTRIBUTE: &str = "class";

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
///
/// `param` is kept from older revisions of the list.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns true if `tag` is one of the default [`VOID_TAGS`].
#[must_use]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// The value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// An ordinary `name="value"` attribute.
    String(String),
    /// The `class` attribute, split on whitespace. Order and duplicates are
    /// kept as written.
    ClassList(Vec<String>),
    /// An attribute written without a value, e.g. `disabled`.
    Flag,
}

impl AttrValue {
    /// Split a raw `class` attribute value into a class list.
    #[must_use]
    pub fn class_list(raw: &str) -> Self {
        Self::ClassList(raw.split_whitespace().map(str::to_string).collect())
    }

    /// Returns the string value, if this is an ordinary attribute.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::ClassList(_) | Self::Flag => None,
        }
    }

    /// Returns true for a flag attribute.
    #[must_use]
    pub const fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }

    /// JSON form of the value: a string, an array of strings, or `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(value) => Value::String(value.clone()),
            Self::ClassList(classes) => {
                Value::Array(classes.iter().cloned().map(Value::String).collect())
            }
            Self::Flag => Value::Null,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(classes: Vec<String>) -> Self {
        Self::ClassList(classes)
    }
}

/// A node of a fragment tree.
///
/// `tag` is always set. `text`, `attr` and `child` are optional: `None`, an
/// empty string, an empty map and an empty list all mean "absent" and are
/// left out of [`Element::render`].
///
/// The parser fills either `text` (plain text and verbatim inline markup)
/// or `child` for each node. Hand-built trees may fill both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-cased tag name.
    pub tag: String,
    /// Literal content, trimmed, possibly containing inline markup.
    pub text: Option<String>,
    /// Attributes by name.
    pub attr: AttributesMap,
    /// Child elements in document order.
    pub child: Vec<Self>,
}

impl Element {
    /// Create an element with the given tag and nothing else.
    ///
    /// The tag name is lower-cased.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            text: None,
            attr: AttributesMap::new(),
            child: Vec::new(),
        }
    }

    /// Set the literal text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        let _ = self.attr.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Set the `class` attribute to the given class list.
    #[must_use]
    pub fn with_class<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes = classes.into_iter().map(Into::into).collect();
        let _ = self
            .attr
            .insert(CLASS_ATTRIBUTE.to_string(), AttrValue::ClassList(classes));
        self
    }

    /// Set a valueless flag attribute such as `disabled`.
    #[must_use]
    pub fn with_flag(mut self, name: &str) -> Self {
        let _ = self.attr.insert(name.to_ascii_lowercase(), AttrValue::Flag);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.child.push(child);
        self
    }

    /// Append a child in place.
    pub fn push_child(&mut self, child: Self) {
        self.child.push(child);
    }

    /// The lower-cased tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The text content, if present and non-empty.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attr.get(name)
    }

    /// All attributes, ordered by name.
    #[must_use]
    pub const fn attrs(&self) -> &AttributesMap {
        &self.attr
    }

    /// Child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.child
    }

    /// Returns the element's id attribute value if it is an ordinary string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr.get("id").and_then(AttrValue::as_str)
    }

    /// Returns the class names, in order.
    ///
    /// A hand-built `class` given as a plain string is split on whitespace.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        match self.attr.get(CLASS_ATTRIBUTE) {
            Some(AttrValue::ClassList(classes)) => classes.iter().map(String::as_str).collect(),
            Some(AttrValue::String(raw)) => raw.split_whitespace().collect(),
            Some(AttrValue::Flag) | None => Vec::new(),
        }
    }

    /// Render the tree as a JSON value.
    ///
    /// The result is an object with `tag` always present and `text`,
    /// `attr` and `child` present only when non-empty. `class` lists become
    /// arrays of strings and flag attributes become `null`.
    #[must_use]
    pub fn render(&self) -> Value {
        let mut obj = Map::new();
        let _ = obj.insert("tag".to_string(), Value::String(self.tag.clone()));

        if let Some(text) = self.text() {
            let _ = obj.insert("text".to_string(), Value::String(text.to_string()));
        }

        if !self.attr.is_empty() {
            let attrs: Map<String, Value> = self
                .attr
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect();
            let _ = obj.insert("attr".to_string(), Value::Object(attrs));
        }

        if !self.child.is_empty() {
            let children: Vec<Value> = self.child.iter().map(Self::render).collect();
            let _ = obj.insert("child".to_string(), Value::Array(children));
        }

        Value::Object(obj)
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.render().serialize(serializer)
    }
}

/// Format an indented, human-readable outline of the tree.
#[must_use]
pub fn format_tree(element: &Element) -> String {
    let mut out = String::new();
    write_tree(&mut out, element, 0);
    out
}

/// Print an indented outline of the tree to stdout.
pub fn print_tree(element: &Element) {
    print!("{}", format_tree(element));
}

fn write_tree(out: &mut String, element: &Element, indent: usize) {
    let prefix = "  ".repeat(indent);
    let attrs: Vec<String> = element
        .attr
        .iter()
        .map(|(name, value)| match value {
            AttrValue::String(v) => format!("{name}=\"{v}\""),
            AttrValue::ClassList(classes) => format!("{name}=\"{}\"", classes.join(" ")),
            AttrValue::Flag => name.clone(),
        })
        .collect();
    if attrs.is_empty() {
        let _ = writeln!(out, "{prefix}<{}>", element.tag);
    } else {
        let _ = writeln!(out, "{prefix}<{} {}>", element.tag, attrs.join(" "));
    }
    if let Some(text) = element.text() {
        let display = text.replace('\n', "\\n");
        let _ = writeln!(out, "{prefix}  \"{display}\"");
    }
    for child in &element.child {
        write_tree(out, child, indent + 1);
    }
}
