//! Tests for rendering hand-built element trees to JSON.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use serde_json::{Value, json};
use tagtree_dom::{AttrValue, Element, emit};

#[test]
fn test_tag() {
    let element = Element::new("p");
    assert_eq!(element.render(), json!({"tag": "p"}));
}

#[test]
fn test_text() {
    let element = Element::new("p").with_text("some text");
    assert_eq!(element.render(), json!({"tag": "p", "text": "some text"}));
}

#[test]
fn test_attr() {
    let element = Element::new("p")
        .with_text("some text")
        .with_attr("class", "some class");
    assert_eq!(
        element.render(),
        json!({
            "tag": "p",
            "text": "some text",
            "attr": {"class": "some class"}
        })
    );
}

#[test]
fn test_compound() {
    let mut element = Element::new("ul")
        .with_text("some text")
        .with_attr("class", "some class");
    element.push_child(
        Element::new("li")
            .with_text("some text")
            .with_attr("class", "some class"),
    );
    assert_eq!(
        element.render(),
        json!({
            "tag": "ul",
            "text": "some text",
            "attr": {"class": "some class"},
            "child": [{
                "tag": "li",
                "text": "some text",
                "attr": {"class": "some class"}
            }]
        })
    );
}

#[test]
fn test_compound_two_children_keep_order() {
    let element = Element::new("ul")
        .with_child(Element::new("li").with_text("first"))
        .with_child(Element::new("li").with_text("second"));
    assert_eq!(
        element.render(),
        json!({
            "tag": "ul",
            "child": [
                {"tag": "li", "text": "first"},
                {"tag": "li", "text": "second"}
            ]
        })
    );
}

#[test]
fn test_class_list_renders_as_array() {
    let element = Element::new("div").with_class(["bar", "goo", "bar"]);
    assert_eq!(
        element.render(),
        json!({"tag": "div", "attr": {"class": ["bar", "goo", "bar"]}})
    );
}

#[test]
fn test_flag_renders_as_null() {
    let element = Element::new("input").with_flag("disabled");
    let rendered = element.render();
    assert_eq!(rendered["attr"]["disabled"], Value::Null);
    assert_ne!(rendered["attr"]["disabled"], json!("None"));
}

#[test]
fn test_render_does_not_mutate() {
    let element = Element::new("div")
        .with_attr("id", "a")
        .with_child(Element::new("p").with_text("x"));
    let before = element.clone();
    let first = element.render();
    let second = element.render();
    assert_eq!(first, second);
    assert_eq!(element, before);
}

#[test]
fn test_attr_value_accessors() {
    let element = Element::new("a")
        .with_attr("href", "/home")
        .with_flag("download");
    assert_eq!(element.attr("href").and_then(AttrValue::as_str), Some("/home"));
    assert!(element.attr("download").is_some_and(AttrValue::is_flag));
    assert_eq!(element.attr("missing"), None);
}

#[test]
fn test_tree_accessors() {
    let element = Element::new("UL")
        .with_attr("title", "t")
        .with_class(["x"])
        .with_child(Element::new("li"))
        .with_child(Element::new("li").with_text("second"));
    assert_eq!(element.tag(), "ul");
    assert_eq!(
        element.attrs().keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["class", "title"]
    );
    assert_eq!(element.children().len(), 2);
    assert_eq!(element.children()[1].text(), Some("second"));
}

/// A hand-built tree drawn from a small vocabulary.
///
/// Text is either absent or non-empty and `class` is always a list, so the
/// tree survives a trip through its rendered form unchanged.
#[derive(Debug, Clone)]
struct ArbElement(Element);

const TAGS: &[&str] = &["div", "p", "ul", "li", "section", "h1", "textarea"];
const TEXTS: &[&str] = &["hello", "two words", "a <b>bold</b> move", "x  y"];
const CLASSES: &[&str] = &["foo", "bar", "goo"];
const NAMES: &[&str] = &["id", "title", "data-x", "hidden"];

fn pick(g: &mut Gen, items: &[&'static str]) -> &'static str {
    g.choose(items).copied().unwrap_or("div")
}

fn arbitrary_element(g: &mut Gen, depth: usize) -> Element {
    let mut element = Element::new(pick(g, TAGS));
    if bool::arbitrary(g) {
        element = element.with_text(pick(g, TEXTS));
    }
    for _ in 0..usize::arbitrary(g) % 3 {
        let name = pick(g, NAMES);
        element = if bool::arbitrary(g) {
            element.with_flag(name)
        } else {
            element.with_attr(name, pick(g, TEXTS))
        };
    }
    if bool::arbitrary(g) {
        let count = usize::arbitrary(g) % 4;
        element = element.with_class((0..count).map(|_| pick(g, CLASSES)));
    }
    if depth > 0 {
        for _ in 0..usize::arbitrary(g) % 3 {
            element.push_child(arbitrary_element(g, depth - 1));
        }
    }
    element
}

impl Arbitrary for ArbElement {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(arbitrary_element(g, 3))
    }
}

fn has_no_empty_containers(value: &Value) -> bool {
    let Value::Object(obj) = value else {
        return false;
    };
    if !obj.get("tag").is_some_and(Value::is_string) {
        return false;
    }
    let text_ok = obj
        .get("text")
        .is_none_or(|text| text.as_str().is_some_and(|t| !t.is_empty()));
    let attr_ok = obj
        .get("attr")
        .is_none_or(|attr| attr.as_object().is_some_and(|a| !a.is_empty()));
    let child_ok = obj.get("child").is_none_or(|child| {
        child
            .as_array()
            .is_some_and(|c| !c.is_empty() && c.iter().all(has_no_empty_containers))
    });
    text_ok && attr_ok && child_ok
}

#[quickcheck]
fn prop_render_omits_empty_containers(tree: ArbElement) -> bool {
    has_no_empty_containers(&tree.0.render())
}

#[quickcheck]
fn prop_render_keys_match_fields(tree: ArbElement) -> bool {
    let rendered = tree.0.render();
    rendered.get("text").is_some() == tree.0.text().is_some()
        && rendered.get("attr").is_some() == !tree.0.attr.is_empty()
        && rendered.get("child").is_some() == !tree.0.child.is_empty()
}

#[quickcheck]
fn prop_from_rendered_inverts_render(tree: ArbElement) -> bool {
    Element::from_rendered(&tree.0.render()).is_ok_and(|back| back == tree.0)
}

#[quickcheck]
fn prop_emitted_html_starts_and_ends_with_root_tag(tree: ArbElement) -> bool {
    let html = emit::to_html(&tree.0);
    html.starts_with(&format!("<{}", tree.0.tag)) && html.ends_with(&format!("</{}>", tree.0.tag))
}
