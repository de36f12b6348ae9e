//! Markup output for `inner_html` / `outer_html`
//!
//! Attributes keep their insertion order, empty attribute values are
//! written bare (`<input disabled>`) and void elements get no end tag.

use crate::{DomTree, ElementData, NodeData, NodeId};

/// Elements that never have an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are written unescaped
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Writes nodes back out as HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Markup of the children of `node`
    pub fn serialize_inner(&self, tree: &DomTree, node: NodeId) -> String {
        let mut out = String::new();
        for (child, _) in tree.children(node) {
            self.write_node(tree, child, &mut out);
        }
        out
    }

    /// Markup of `node` itself and its subtree
    pub fn serialize_outer(&self, tree: &DomTree, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(tree, node, &mut out);
        out
    }

    fn write_node(&self, tree: &DomTree, node: NodeId, out: &mut String) {
        match tree.get(node).map(|n| &n.data) {
            None => {}
            Some(NodeData::Document) => out.push_str(&self.serialize_inner(tree, node)),
            Some(NodeData::Text(text)) => escape_into(text, false, out),
            Some(NodeData::Comment(text)) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            Some(NodeData::Element(elem)) => self.write_element(tree, node, elem, out),
        }
    }

    fn write_element(&self, tree: &DomTree, node: NodeId, elem: &ElementData, out: &mut String) {
        let tag = elem.tag.as_str();
        out.push('<');
        out.push_str(tag);
        for attr in &elem.attrs {
            out.push(' ');
            out.push_str(&attr.name);
            if attr.value.is_empty() {
                continue;
            }
            out.push_str("=\"");
            escape_into(&attr.value, true, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&tag) {
            return;
        }

        if RAW_TEXT_ELEMENTS.contains(&tag) {
            tree.children(node)
                .filter_map(|(_, child)| child.as_text())
                .for_each(|text| out.push_str(text));
        } else {
            for (child, _) in tree.children(node) {
                self.write_node(tree, child, out);
            }
        }

        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

/// Escape `&`, `<`, `>` and, inside attribute values, `"`
fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_escapes() {
        let mut tree = DomTree::new();
        let item = tree.create_element("li");
        tree.append_child(tree.root(), item).unwrap();
        let text = tree.create_text("a < b & \"c\"");
        tree.append_child(item, text).unwrap();
        tree.element_mut(item).unwrap().set_attr("title", "x\"y");

        let html = HtmlSerializer::new().serialize_outer(&tree, item);
        assert_eq!(html, "<li title=\"x&quot;y\">a &lt; b &amp; \"c\"</li>");
    }

    #[test]
    fn test_void_and_boolean_attrs() {
        let mut tree = DomTree::new();
        let input = tree.create_element("input");
        tree.append_child(tree.root(), input).unwrap();
        tree.element_mut(input).unwrap().set_attr("disabled", "");

        assert_eq!(HtmlSerializer::new().serialize_inner(&tree, tree.root()), "<input disabled>");
    }

    #[test]
    fn test_script_text_is_raw() {
        let mut tree = DomTree::new();
        let script = tree.create_element("script");
        tree.append_child(tree.root(), script).unwrap();
        let code = tree.create_text("if (a < b && c) {}");
        tree.append_child(script, code).unwrap();

        assert_eq!(
            HtmlSerializer::new().serialize_outer(&tree, script),
            "<script>if (a < b && c) {}</script>"
        );
    }
}
