//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, cloneNode, and emptying
//! a container.

use crate::{DomTree, Node, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),
    /// Operation needs an element
    #[error("Node is not an element: {0:?}")]
    NotAnElement(NodeId),
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Node is not a child
    #[error("Node is not a child")]
    NotAChild,
}

/// Node operations trait
pub trait NodeOperations {
    /// Append a child node, detaching it from any previous parent
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Remove a child node (it stays in the arena, detached)
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Clone a node. The clone is detached.
    fn clone_node(&mut self, node: NodeId, deep: bool) -> DomResult<NodeId>;

    /// Remove every child of a node
    fn clear_children(&mut self, node: NodeId) -> DomResult<()>;
}

impl NodeOperations for DomTree {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        self.node(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        let old_parent = self.node(child)?.parent;
        if old_parent.is_valid() {
            self.remove_child(old_parent, child)?;
        }

        let last = self.node(parent)?.last_child;
        {
            let node = self.node_mut(child)?;
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.node_mut(last)?.next_sibling = child;
        }
        let parent_node = self.node_mut(parent)?;
        if !parent_node.first_child.is_valid() {
            parent_node.first_child = child;
        }
        parent_node.last_child = child;

        Ok(child)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let (prev, next) = {
            let node = self.node(child)?;
            if node.parent != parent {
                return Err(DomError::NotAChild);
            }
            (node.prev_sibling, node.next_sibling)
        };

        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = next;
        } else {
            self.node_mut(parent)?.first_child = next;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = prev;
        } else {
            self.node_mut(parent)?.last_child = prev;
        }

        let node = self.node_mut(child)?;
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;

        Ok(child)
    }

    fn clone_node(&mut self, node: NodeId, deep: bool) -> DomResult<NodeId> {
        let data = self.node(node)?.data.clone();
        let copy = self.push(Node {
            data,
            ..Node::document()
        });

        if deep {
            for child in self.child_ids(node) {
                let child_copy = self.clone_node(child, true)?;
                self.append_child(copy, child_copy)?;
            }
        }

        Ok(copy)
    }

    fn clear_children(&mut self, node: NodeId) -> DomResult<()> {
        for child in self.child_ids(node) {
            self.remove_child(node, child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_middle_child() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        let c = tree.create_element("li");
        tree.append_child(ul, a).unwrap();
        tree.append_child(ul, b).unwrap();
        tree.append_child(ul, c).unwrap();

        tree.remove_child(ul, b).unwrap();

        assert_eq!(tree.child_ids(ul), vec![a, c]);
        assert!(!tree.get(b).unwrap().parent.is_valid());
        assert_eq!(tree.get(c).unwrap().prev_sibling, a);
    }

    #[test]
    fn test_remove_wrong_parent() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        assert_eq!(tree.remove_child(a, b), Err(DomError::NotAChild));
    }

    #[test]
    fn test_append_ancestor_rejected() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(tree.append_child(inner, outer), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let mut tree = DomTree::new();
        let row = tree.create_element("tr");
        tree.set_attr(row, "data-list", "rows").unwrap();
        let cell = tree.create_element("td");
        tree.append_child(row, cell).unwrap();
        tree.set_text_content(cell, "original").unwrap();

        let copy = tree.clone_node(row, true).unwrap();
        let copy_cell = tree.child_ids(copy)[0];
        tree.set_text_content(copy_cell, "changed").unwrap();

        assert_eq!(tree.text_content(cell), "original");
        assert_eq!(tree.text_content(copy_cell), "changed");
        assert_eq!(tree.attr(copy, "data-list"), Some("rows"));
        assert!(!tree.get(copy).unwrap().parent.is_valid());
    }

    #[test]
    fn test_shallow_clone_has_no_children() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(div, span).unwrap();

        let copy = tree.clone_node(div, false).unwrap();
        assert!(tree.child_ids(copy).is_empty());
    }

    #[test]
    fn test_clear_children() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        for _ in 0..3 {
            let p = tree.create_element("p");
            tree.append_child(div, p).unwrap();
        }

        tree.clear_children(div).unwrap();
        assert!(tree.child_ids(div).is_empty());
        assert!(!tree.get(div).unwrap().first_child.is_valid());
    }
}
