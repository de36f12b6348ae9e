//! Document - High-level document API

use crate::{
    DomError, DomMutator, DomResult, DomTree, ElementLookup, HtmlSerializer, NodeId, SelectorList,
};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let root = tree.root();
        let linked = tree
            .append_child(root, html)
            .and_then(|()| tree.append_child(html, head))
            .and_then(|()| tree.append_child(html, body));
        debug_assert!(linked.is_ok(), "document skeleton rejected: {linked:?}");

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure); call [`finalize`](Self::finalize)
    /// after filling the tree
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate and cache the html, head and body elements
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self.first_child_tagged(root, "html").unwrap_or(NodeId::NONE);
        if self.html_element.is_valid() {
            self.head_element = self
                .first_child_tagged(self.html_element, "head")
                .unwrap_or(NodeId::NONE);
            self.body_element = self
                .first_child_tagged(self.html_element, "body")
                .unwrap_or(NodeId::NONE);
        }
        tracing::trace!(
            html = %self.html_element,
            body = %self.body_element,
            "document finalized"
        );
    }

    fn first_child_tagged(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.tree
            .element_children(parent)
            .find(|&c| self.tree.element(c).is_some_and(|e| e.tag == tag))
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.get_elements_by_tag_name(self.tree.root(), "title")
            .first()
            .map(|&t| self.tree.text_content(t).trim().to_string())
            .unwrap_or_default()
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element, falling back to the document node
    pub fn body(&self) -> NodeId {
        if self.body_element.is_valid() {
            self.body_element
        } else {
            self.tree.root()
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Check if an element matches a selector
    pub fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        Ok(SelectorList::parse(selector)?.matches(&self.tree, element))
    }

    /// Nearest ancestor (excluding `element`) matching a selector
    pub fn find_ancestor(&self, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .ancestors(element)
            .find(|&a| selector.matches(&self.tree, a)))
    }

    /// Serialize the children of a node
    pub fn inner_html(&self, node: NodeId) -> String {
        HtmlSerializer::new().serialize_inner(&self.tree, node)
    }

    /// Serialize a node and its children
    pub fn outer_html(&self, node: NodeId) -> String {
        HtmlSerializer::new().serialize_outer(&self.tree, node)
    }

    /// Replace the children of a node with one text node
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        self.tree.remove_children(node)?;
        if !text.is_empty() {
            let t = self.tree.create_text(text);
            self.tree.append_child(node, t)?;
        }
        Ok(())
    }

    fn update_class_list(
        &mut self,
        element: NodeId,
        update: impl FnOnce(&mut crate::ClassList),
    ) -> DomResult<()> {
        let elem = self.tree.element_mut(element)?;
        let mut list = elem.class_list();
        update(&mut list);
        elem.set_class_list(&list);
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl ElementLookup for Document {
    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selector = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(root)
            .into_iter()
            .filter(|&n| selector.matches(&self.tree, n))
            .collect())
    }

    fn get_elements_by_class_name(&self, root: NodeId, classes: &str) -> Vec<NodeId> {
        let wanted: Vec<&str> = classes.split_ascii_whitespace().collect();
        if wanted.is_empty() {
            return Vec::new();
        }
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| {
                self.tree
                    .element(n)
                    .is_some_and(|e| wanted.iter().all(|c| e.has_class(c)))
            })
            .collect()
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| {
                self.tree
                    .element(n)
                    .is_some_and(|e| tag == "*" || e.tag.eq_ignore_ascii_case(tag))
            })
            .collect()
    }

    fn tag_name(&self, element: NodeId) -> Option<&str> {
        self.tree.element(element).map(|e| e.tag.as_str())
    }

    fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.tree.element(element)?.get_attr(name)
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.tree.element(element).is_some_and(|e| e.has_class(class))
    }

    fn first_element_child(&self, element: NodeId) -> Option<NodeId> {
        self.tree.element_children(element).next()
    }

    fn value(&self, element: NodeId) -> String {
        self.control_value(element)
    }
}

impl DomMutator for Document {
    fn add_class(&mut self, element: NodeId, class: &str) -> DomResult<()> {
        self.update_class_list(element, |list| {
            list.add(class);
        })
    }

    fn remove_class(&mut self, element: NodeId, class: &str) -> DomResult<()> {
        if !self.has_class(element, class) {
            // Leave the attribute untouched when there is nothing to remove
            self.tree.element_mut(element)?;
            return Ok(());
        }
        self.update_class_list(element, |list| {
            list.remove(class);
        })
    }

    fn set_class_name(&mut self, element: NodeId, value: &str) -> DomResult<()> {
        self.tree.element_mut(element)?.set_attr("class", value);
        Ok(())
    }

    fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.tree.element_mut(element)?.set_attr(name, value);
        Ok(())
    }

    fn remove_attribute(&mut self, element: NodeId, name: &str) -> DomResult<()> {
        self.tree.element_mut(element)?.remove_attr(name);
        Ok(())
    }

    fn set_value(&mut self, element: NodeId, value: &str) -> DomResult<()> {
        self.set_control_value(element, value)
    }

    fn remove_children(&mut self, element: NodeId) -> DomResult<()> {
        self.tree.remove_children(element)
    }

    fn append_element(&mut self, parent: NodeId, tag: &str) -> DomResult<NodeId> {
        if self.tree.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        let child = self.tree.create_element(tag);
        self.tree.append_child(parent, child)?;
        Ok(child)
    }

    fn append_text(&mut self, parent: NodeId, text: &str) -> DomResult<NodeId> {
        if self.tree.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        let child = self.tree.create_text(text);
        self.tree.append_child(parent, child)?;
        Ok(child)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    fn detach(&mut self, node: NodeId) -> DomResult<()> {
        if self.tree.get(node).is_none() {
            return Err(DomError::NotFound(node));
        }
        self.tree.detach(node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_document() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let form = doc.append_element(body, "form").unwrap();
        doc.set_attribute(form, "id", "signup").unwrap();
        let input = doc.append_element(form, "input").unwrap();
        doc.set_attribute(input, "data-val", "true").unwrap();
        doc.set_attribute(input, "class", "field").unwrap();
        (doc, form, input)
    }

    #[test]
    fn test_new_document_skeleton() {
        let doc = Document::new("about:blank");
        let tree = doc.tree();
        let html = doc.document_element();
        let top: Vec<NodeId> = tree.children(tree.root()).map(|(id, _)| id).collect();
        assert_eq!(top, vec![html]);
        let sections: Vec<NodeId> = tree.children(html).map(|(id, _)| id).collect();
        assert_eq!(sections, vec![doc.head(), doc.body()]);
        assert_eq!(doc.outer_html(html), "<html><head></head><body></body></html>");
    }

    #[test]
    fn test_get_element_by_id() {
        let (doc, form, _) = form_document();
        assert_eq!(doc.get_element_by_id("signup"), Some(form));
        assert_eq!(doc.get_element_by_id("missing"), None);
        assert_eq!(doc.get_element_by_id(""), None);
    }

    #[test]
    fn test_query_selector_all_scoped() {
        let (doc, form, input) = form_document();
        let found = doc
            .query_selector_all(doc.root(), "#signup [data-val=\"true\"]")
            .unwrap();
        assert_eq!(found, vec![input]);

        // The root itself is never part of its own result set
        let found = doc.query_selector_all(form, "form").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_class_mutation() {
        let (mut doc, _, input) = form_document();
        doc.add_class(input, "input-has-error").unwrap();
        doc.add_class(input, "input-has-error").unwrap();
        assert_eq!(doc.get_attribute(input, "class"), Some("field input-has-error"));

        doc.remove_class(input, "input-has-error").unwrap();
        assert_eq!(doc.get_attribute(input, "class"), Some("field"));
    }

    #[test]
    fn test_class_mutation_on_text_fails() {
        let (mut doc, form, _) = form_document();
        let text = doc.append_text(form, "hi").unwrap();
        assert_eq!(doc.add_class(text, "x"), Err(DomError::NotAnElement(text)));
    }

    #[test]
    fn test_find_ancestor() {
        let (doc, form, input) = form_document();
        assert_eq!(doc.find_ancestor(input, "form").unwrap(), Some(form));
        assert_eq!(doc.find_ancestor(input, "input").unwrap(), None);
    }
}
