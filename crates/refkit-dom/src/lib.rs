//! refkit DOM - Document Object Model
//!
//! Arena-based document tree with class lists, CSS selector queries and
//! the [`ElementLookup`] / [`DomMutator`] traits the form tools are written
//! against.

mod classlist;
mod document;
mod error;
mod forms;
mod lookup;
mod node;
mod selector;
mod serializer;
mod tree;

pub use classlist::ClassList;
pub use document::Document;
pub use error::{DomError, DomResult};
pub use lookup::{DomMutator, ElementLookup};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{Combinator, CompoundSelector, SelectorList};
pub use serializer::HtmlSerializer;
pub use tree::{Ancestors, Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
