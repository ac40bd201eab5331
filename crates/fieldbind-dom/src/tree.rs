//! DOM Tree (arena-based allocation)

use crate::operations::{DomError, DomResult, NodeOperations};
use crate::{ElementData, Node, NodeId};

/// Arena-based DOM tree
///
/// Node 0 is always the document root. Removed nodes stay in the arena,
/// detached, so ids handed out earlier never dangle. A detached subtree is
/// only recycled once it is passed to [`DomTree::release`]; after that its
/// ids may be handed out again.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    /// Released slots, reused before the arena grows
    free: Vec<NodeId>,
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            free: Vec::new(),
        }
    }

    /// Document root
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of live nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Number of slots the arena holds, released ones included
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Give a detached subtree back to the arena
    ///
    /// Returns the number of slots freed, zero if `id` was already released.
    /// Ids into the subtree must not be used afterwards.
    pub fn release(&mut self, id: NodeId) -> DomResult<usize> {
        if id == self.root() || self.parent(id).is_some() {
            return Err(DomError::HierarchyRequest);
        }
        if self.free.contains(&id) {
            return Ok(0);
        }
        self.node(id)?;

        let mut spent = self.descendants(id);
        spent.push(id);
        for &node in &spent {
            self.nodes[node.index()] = Node::comment(String::new());
        }
        self.free.extend(spent.iter().copied());
        Ok(spent.len())
    }

    pub(crate) fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text.to_string()))
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> DomResult<NodeId> {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attr(id, name, value)?;
        }
        self.append_child(parent, id)
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Direct child ids, collected (safe to mutate the tree afterwards)
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// All descendants in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for (child, _) in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Check whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Closest preceding sibling that is an element
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.get(id)?.prev_sibling;
        while cursor.is_valid() {
            let node = self.get(cursor)?;
            if node.is_element() {
                return Some(cursor);
            }
            cursor = node.prev_sibling;
        }
        None
    }

    // ------------------------------------------------------------------
    // Elements and attributes
    // ------------------------------------------------------------------

    /// Element data for a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Lowercased tag name
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    /// Attribute value
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Check if attribute exists
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    // ------------------------------------------------------------------
    // Content and control state
    // ------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id) {
            Some(node) => match node.as_text() {
                Some(text) => text.to_string(),
                None => {
                    let mut out = String::new();
                    for (child, _) in self.children(id) {
                        out.push_str(&self.text_content(child));
                    }
                    out
                }
            },
            None => String::new(),
        }
    }

    /// Replace all children with a single text node (none if `text` is empty)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        self.element_mut(id)?;
        self.clear_children(id)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    /// Live control value
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.value.as_str())
    }

    /// Set the live control value
    pub fn set_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(id)?.value = value.to_string();
        Ok(())
    }

    /// Live checkedness
    pub fn checked(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.checked)
    }

    /// Set live checkedness
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> DomResult<()> {
        self.element_mut(id)?.checked = checked;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    /// Whether the node itself is display-suppressed
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| {
            e.has_attr("hidden")
                || e.get_attr("style").is_some_and(|style| {
                    style
                        .split(';')
                        .filter_map(|decl| decl.split_once(':'))
                        .any(|(prop, value)| {
                            prop.trim().eq_ignore_ascii_case("display")
                                && value.trim().eq_ignore_ascii_case("none")
                        })
                })
        })
    }

    /// A node is visible when neither it nor any ancestor is hidden
    pub fn is_visible(&self, id: NodeId) -> bool {
        if self.is_hidden(id) {
            return false;
        }
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            if self.is_hidden(current) {
                return false;
            }
            cursor = self.parent(current);
        }
        true
    }

    /// Show or hide a node via the `hidden` attribute
    ///
    /// Showing also drops an inline `display: none`.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> DomResult<()> {
        let element = self.element_mut(id)?;
        if hidden {
            element.set_attr("hidden", "");
            return Ok(());
        }

        element.remove_attr("hidden");
        if let Some(style) = element.get_attr("style") {
            let kept: Vec<&str> = style
                .split(';')
                .filter(|decl| !decl.trim().is_empty())
                .filter(|decl| {
                    decl.split_once(':').is_none_or(|(prop, value)| {
                        !(prop.trim().eq_ignore_ascii_case("display")
                            && value.trim().eq_ignore_ascii_case("none"))
                    })
                })
                .collect();
            let style = kept.join(";");
            if style.is_empty() {
                element.remove_attr("style");
            } else {
                element.set_attr("style", &style);
            }
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the direct children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
