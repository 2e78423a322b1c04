//! Writing an element tree back out as HTML.
//!
//! Each element becomes an open tag with its attributes, then its text
//! (copied verbatim, since it may hold inline markup), then its children,
//! then the close tag. Void elements without content get no close tag so
//! that the output parses back to the same tree.

use crate::{AttrValue, Element, is_void_tag};

/// Emit `element` as HTML, treating the default [`crate::VOID_TAGS`] as void.
#[must_use]
pub fn to_html(element: &Element) -> String {
    to_html_with(element, is_void_tag)
}

/// Emit `element` as HTML with a caller-supplied void element test.
#[must_use]
pub fn to_html_with(element: &Element, is_void: impl Fn(&str) -> bool) -> String {
    let mut out = String::new();
    write_element(&mut out, element, &is_void);
    out
}

fn write_element(out: &mut String, element: &Element, is_void: &impl Fn(&str) -> bool) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attr {
        out.push(' ');
        out.push_str(name);
        match value {
            AttrValue::String(v) => write_quoted(out, v),
            AttrValue::ClassList(classes) => write_quoted(out, &classes.join(" ")),
            AttrValue::Flag => {}
        }
    }
    out.push('>');

    let text = element.text();
    if text.is_none() && element.child.is_empty() && is_void(&element.tag) {
        return;
    }

    if let Some(text) = text {
        out.push_str(text);
    }
    for child in &element.child {
        write_element(out, child, is_void);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

/// Attribute values are not entity-decoded by the parser, so quotes are
/// chosen to avoid escaping where possible.
fn write_quoted(out: &mut String, value: &str) {
    out.push('=');
    if value.contains('"') && !value.contains('\'') {
        out.push('\'');
        out.push_str(value);
        out.push('\'');
    } else {
        out.push('"');
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_list() {
        let tree = Element::new("ul")
            .with_text("text")
            .with_attr("class", "some class")
            .with_child(
                Element::new("li")
                    .with_text("text")
                    .with_attr("class", "some class"),
            )
            .with_child(
                Element::new("li")
                    .with_text("text")
                    .with_attr("class", "some class"),
            );
        assert_eq!(
            to_html(&tree),
            r#"<ul class="some class">text<li class="some class">text</li><li class="some class">text</li></ul>"#
        );
    }

    #[test]
    fn test_flag_attributes_are_bare() {
        let tree = Element::new("ul")
            .with_text("text")
            .with_class(["some", "class"])
            .with_child(Element::new("li").with_text("text").with_flag("disable"));
        assert_eq!(
            to_html(&tree),
            r#"<ul class="some class">text<li disable>text</li></ul>"#
        );
    }

    #[test]
    fn test_void_element_has_no_close_tag() {
        let tree = Element::new("figure").with_child(Element::new("img").with_attr("src", "abc"));
        assert_eq!(to_html(&tree), r#"<figure><img src="abc"></figure>"#);
    }

    #[test]
    fn test_custom_void_test() {
        let tree = Element::new("div").with_child(Element::new("icon"));
        assert_eq!(to_html_with(&tree, |tag| tag == "icon"), "<div><icon></div>");
        assert_eq!(to_html(&tree), "<div><icon></icon></div>");
    }

    #[test]
    fn test_value_with_double_quote_uses_single_quotes() {
        let tree = Element::new("p").with_attr("title", r#"say "hi""#);
        assert_eq!(to_html(&tree), r#"<p title='say "hi"'></p>"#);
    }

    #[test]
    fn test_inline_markup_in_text_is_verbatim() {
        let tree = Element::new("p").with_text("a <b>bold</b> move");
        assert_eq!(to_html(&tree), "<p>a <b>bold</b> move</p>");
    }
}
