//! Rebuilding an [`Element`] from the value produced by [`Element::render`].
//!
//! The accepted shape is exactly the rendered one: an object with a
//! string `tag`, an optional string `text`, an optional `attr` object whose
//! values are strings, arrays of strings or `null`, and an optional `child`
//! array of the same shape.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{AttrValue, CLASS_ATTRIBUTE, Element};

/// A JSON value that does not have the rendered element shape.
///
/// `path` points at the offending value, e.g. `$.child[1].attr.id`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The value at `path` is not a JSON object.
    #[error("{path}: expected an element object")]
    NotAnObject {
        /// Location of the value.
        path: String,
    },
    /// The object at `path` has no `tag`, or an empty one.
    #[error("{path}: missing or empty \"tag\"")]
    MissingTag {
        /// Location of the element object.
        path: String,
    },
    /// The value at `path` has the wrong JSON type.
    #[error("{path}: expected {expected}")]
    WrongType {
        /// Location of the value.
        path: String,
        /// Description of the accepted types.
        expected: &'static str,
    },
    /// The object at `path` has a key that `render` never produces.
    #[error("{path}: unexpected key {key:?}")]
    UnknownKey {
        /// Location of the element object.
        path: String,
        /// The unexpected key.
        key: String,
    },
}

impl Element {
    /// Rebuild a tree from its rendered JSON form.
    ///
    /// A `class` given as a string is split into a class list, the same way
    /// the parser does it. Only `null` is read back as a flag; `""` stays an
    /// empty string value.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] naming the first value that does not match
    /// the rendered shape.
    pub fn from_rendered(value: &Value) -> Result<Self, ShapeError> {
        element_at(value, "$")
    }
}

fn element_at(value: &Value, path: &str) -> Result<Element, ShapeError> {
    let Value::Object(obj) = value else {
        return Err(ShapeError::NotAnObject {
            path: path.to_string(),
        });
    };

    if let Some(key) = obj
        .keys()
        .find(|key| !matches!(key.as_str(), "tag" | "text" | "attr" | "child"))
    {
        return Err(ShapeError::UnknownKey {
            path: path.to_string(),
            key: key.clone(),
        });
    }

    let tag = match obj.get("tag") {
        Some(Value::String(tag)) if !tag.is_empty() => tag,
        Some(Value::String(_)) | None => {
            return Err(ShapeError::MissingTag {
                path: path.to_string(),
            });
        }
        Some(_) => {
            return Err(ShapeError::WrongType {
                path: format!("{path}.tag"),
                expected: "a string",
            });
        }
    };
    let mut element = Element::new(tag);

    match obj.get("text") {
        Some(Value::String(text)) => element.text = Some(text.clone()),
        Some(_) => {
            return Err(ShapeError::WrongType {
                path: format!("{path}.text"),
                expected: "a string",
            });
        }
        None => {}
    }

    match obj.get("attr") {
        Some(Value::Object(attrs)) => read_attrs(&mut element, attrs, &format!("{path}.attr"))?,
        Some(_) => {
            return Err(ShapeError::WrongType {
                path: format!("{path}.attr"),
                expected: "an object",
            });
        }
        None => {}
    }

    match obj.get("child") {
        Some(Value::Array(children)) => {
            for (i, child) in children.iter().enumerate() {
                element.push_child(element_at(child, &format!("{path}.child[{i}]"))?);
            }
        }
        Some(_) => {
            return Err(ShapeError::WrongType {
                path: format!("{path}.child"),
                expected: "an array",
            });
        }
        None => {}
    }

    Ok(element)
}

fn read_attrs(
    element: &mut Element,
    attrs: &Map<String, Value>,
    path: &str,
) -> Result<(), ShapeError> {
    for (name, value) in attrs {
        let attr_path = format!("{path}.{name}");
        let value = match value {
            Value::Null => AttrValue::Flag,
            Value::String(s) if name == CLASS_ATTRIBUTE => AttrValue::class_list(s),
            Value::String(s) => AttrValue::String(s.clone()),
            Value::Array(items) => {
                let mut classes = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let Value::String(class) = item else {
                        return Err(ShapeError::WrongType {
                            path: format!("{attr_path}[{i}]"),
                            expected: "a string",
                        });
                    };
                    classes.push(class.clone());
                }
                AttrValue::ClassList(classes)
            }
            _ => {
                return Err(ShapeError::WrongType {
                    path: attr_path,
                    expected: "a string, an array of strings or null",
                });
            }
        };
        let _ = element.attr.insert(name.to_ascii_lowercase(), value);
    }
    Ok(())
}
