//! Element lookup and mutation traits
//!
//! The form validator and utility helpers only talk to a document through
//! these two traits. [`Document`](crate::Document) implements both.

use crate::{DomResult, NodeId};

/// Read side: resolving selectors and reading element state
pub trait ElementLookup {
    /// Find an element by its `id` attribute
    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// All descendants of `root` matching a CSS selector, in document order
    fn query_selector_all(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>>;

    /// First descendant of `root` matching a CSS selector
    fn query_selector(&self, root: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        Ok(self.query_selector_all(root, selector)?.into_iter().next())
    }

    /// Descendants carrying every class in a space-separated list
    fn get_elements_by_class_name(&self, root: NodeId, classes: &str) -> Vec<NodeId>;

    /// Descendants with the given tag (`*` matches all elements)
    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId>;

    /// Lowercase tag name of an element
    fn tag_name(&self, element: NodeId) -> Option<&str>;

    /// Attribute value by name
    fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str>;

    fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.get_attribute(element, name).is_some()
    }

    /// Check for a class token
    fn has_class(&self, element: NodeId, class: &str) -> bool;

    /// First child that is an element
    fn first_element_child(&self, element: NodeId) -> Option<NodeId>;

    /// Current value of a form control
    fn value(&self, element: NodeId) -> String;
}

/// Write side: classes, attributes, values and child content
pub trait DomMutator {
    /// Add a class token (never duplicates)
    fn add_class(&mut self, element: NodeId, class: &str) -> DomResult<()>;

    /// Remove a class token if present
    fn remove_class(&mut self, element: NodeId, class: &str) -> DomResult<()>;

    /// Replace the whole `class` attribute
    fn set_class_name(&mut self, element: NodeId, value: &str) -> DomResult<()>;

    fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()>;

    fn remove_attribute(&mut self, element: NodeId, name: &str) -> DomResult<()>;

    /// Write the current value of a form control
    fn set_value(&mut self, element: NodeId, value: &str) -> DomResult<()>;

    /// Detach every child
    fn remove_children(&mut self, element: NodeId) -> DomResult<()>;

    /// Create an element and append it to `parent`
    fn append_element(&mut self, parent: NodeId, tag: &str) -> DomResult<NodeId>;

    /// Create a text node and append it to `parent`
    fn append_text(&mut self, parent: NodeId, text: &str) -> DomResult<NodeId>;

    /// Move an existing node to the end of `parent`
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()>;

    /// Unlink a node from its parent
    fn detach(&mut self, node: NodeId) -> DomResult<()>;
}
