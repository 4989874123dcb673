//! Declarative render tree produced by preview renderers.
//!
//! Rendering is a pure projection: the same resolved settings, view mode and
//! auxiliary data always produce the same tree, and the HTML writer keeps
//! attributes ordered so equal trees serialize identically. Both the editor
//! preview and the production embed serialize this tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Editor preview viewport selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[serde(rename = "desktop")]
    #[default]
    Desktop,
    #[serde(rename = "mobile")]
    Mobile,
}

impl ViewMode {
    pub fn is_mobile(self) -> bool {
        self == ViewMode::Mobile
    }
}

/// A node in the rendering description tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RenderNode {
    Element {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<RenderNode>,
    },
    Text(String),
}

impl RenderNode {
    pub fn element(tag: impl Into<String>) -> Self {
        RenderNode::Element {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        RenderNode::Text(text.into())
    }

    /// Set an attribute; no effect on text nodes.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let RenderNode::Element { attrs, .. } = &mut self {
            attrs.insert(key.into(), value.into());
        }
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    /// Append a child; no effect on text nodes.
    pub fn child(mut self, node: RenderNode) -> Self {
        if let RenderNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = RenderNode>) -> Self {
        if let RenderNode::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    pub fn text_child(self, text: impl Into<String>) -> Self {
        self.child(RenderNode::text(text))
    }

    /// Serialize to HTML with escaped text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            RenderNode::Text(text) => out.push_str(&escape_html(text)),
            RenderNode::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in attrs {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                if children.is_empty() && is_void_element(tag) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Minimal HTML escaping for text content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_output_is_escaped() {
        let node = RenderNode::element("div")
            .attr("data-title", "a\"b")
            .text_child("<script>");
        assert_eq!(
            node.to_html(),
            "<div data-title=\"a&quot;b\">&lt;script&gt;</div>"
        );
    }

    #[test]
    fn test_attribute_order_is_deterministic() {
        let a = RenderNode::element("span").attr("b", "2").attr("a", "1");
        let b = RenderNode::element("span").attr("a", "1").attr("b", "2");
        assert_eq!(a, b);
        assert_eq!(a.to_html(), "<span a=\"1\" b=\"2\"></span>");
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let img = RenderNode::element("img").attr("src", "x.png");
        assert_eq!(img.to_html(), "<img src=\"x.png\">");
    }

    #[test]
    fn test_builders_ignore_text_nodes() {
        let text = RenderNode::text("plain").attr("k", "v").class("c");
        assert_eq!(text, RenderNode::text("plain"));
    }
}
