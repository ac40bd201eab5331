//! Element queries
//!
//! Attribute selectors (`[a]`, `[a="v"]`, `[a^="v"]`) evaluated over the
//! descendants of a scope node, in document order.

use crate::{DomTree, ElementData, NodeId};

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrSelector {
    /// `[name]`
    Exists(String),
    /// `[name="value"]`
    Equals(String, String),
    /// `[name^="value"]`
    Prefix(String, String),
}

impl AttrSelector {
    pub fn exists(name: &str) -> Self {
        Self::Exists(name.to_string())
    }

    pub fn equals(name: &str, value: &str) -> Self {
        Self::Equals(name.to_string(), value.to_string())
    }

    pub fn prefix(name: &str, value: &str) -> Self {
        Self::Prefix(name.to_string(), value.to_string())
    }

    /// Check if an element matches
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Exists(name) => element.has_attr(name),
            Self::Equals(name, value) => element.get_attr(name) == Some(value.as_str()),
            Self::Prefix(name, value) => element
                .get_attr(name)
                .is_some_and(|v| v.starts_with(value.as_str())),
        }
    }
}

impl DomTree {
    /// All descendant elements of `root` matching `selector`
    pub fn find_all(&self, root: NodeId, selector: &AttrSelector) -> Vec<NodeId> {
        self.find_all_by(root, |element| selector.matches(element))
    }

    /// All descendant elements of `root` accepted by `predicate`
    pub fn find_all_by<F>(&self, root: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&ElementData) -> bool,
    {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(&predicate))
            .collect()
    }

    /// First descendant element of `root` matching `selector`
    pub fn find_first(&self, root: NodeId, selector: &AttrSelector) -> Option<NodeId> {
        self.find_all(root, selector).into_iter().next()
    }
}
