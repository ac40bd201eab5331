//! fieldbind DOM - in-memory document tree
//!
//! An arena-backed node tree with the handful of element semantics a data
//! binder needs: attributes, text, live form-control state, visibility, and
//! attribute queries. Binder code receives a `&mut DomTree` explicitly, so the
//! same code runs against a page mirror or a test fixture.

mod node;
mod tree;
pub mod operations;
pub mod query;
pub mod url;
mod forms;

pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use operations::{DomError, DomResult, NodeOperations};
pub use query::AttrSelector;
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this id refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
