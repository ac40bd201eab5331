//! Key paths and tag resolution

use fieldbind_dom::{AttrSelector, DomTree, NodeId};
use std::fmt;

/// Segment separator in a joined path
pub const SEPARATOR: char = '.';

/// Dotted sequence of field segments (`user.address.city`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a dotted path; the empty string is the root
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self {
            segments: path.split(SEPARATOR).map(str::to_string).collect(),
        }
    }

    /// This path extended by one segment
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn joined(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(segment);
        }
        out
    }

    /// Whether `tag` is this path or lies below it (`a.b` covers `a.b` and
    /// `a.b.c`, never `a.bc`)
    pub fn is_segment_prefix_of(&self, tag: &str) -> bool {
        if self.is_root() {
            return true;
        }
        let joined = self.joined();
        match tag.strip_prefix(joined.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
            None => false,
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Finds the nodes a key path is bound to
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    attr: &'a str,
}

impl<'a> Resolver<'a> {
    /// Resolve against the tag attribute `attr` (usually `data-field`)
    pub fn new(attr: &'a str) -> Self {
        Self { attr }
    }

    /// Nodes tagged with exactly `path`
    pub fn exact(&self, tree: &DomTree, scope: Option<NodeId>, path: &KeyPath) -> Vec<NodeId> {
        let scope = scope.unwrap_or(tree.root());
        tree.find_all(scope, &AttrSelector::equals(self.attr, &path.joined()))
    }

    /// Nodes tagged with `path` or any path below it
    pub fn prefix(&self, tree: &DomTree, scope: Option<NodeId>, path: &KeyPath) -> Vec<NodeId> {
        let scope = scope.unwrap_or(tree.root());
        tree.find_all_by(scope, |element| {
            element
                .get_attr(self.attr)
                .is_some_and(|tag| path.is_segment_prefix_of(tag))
        })
    }
}
