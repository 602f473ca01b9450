//! DOM Tree (arena-based allocation)
//!
//! Destroyed nodes leave an empty slot behind, so a stale `NodeId`
//! resolves to `None` instead of aliasing a newer node.

use crate::{DomError, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Option<Node>>,
    live: usize,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::document())],
            live: 1,
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Whether the ID resolves to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes in the tree
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        self.live += 1;
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(Node::text(text))
    }

    /// Element data for an element node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Parent node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over children
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&child| self.get(child).map(|node| (child, node)))
    }

    /// Child IDs in tree order
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(|n| n.children.clone()).unwrap_or_default()
    }

    /// Element children in tree order
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
            .collect()
    }

    /// Whether `ancestor` is `node` or one of its (light tree) ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Append `child` to `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if !parent_node.can_have_children() {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if matches!(child_node.data, NodeData::Document | NodeData::ShadowRoot(_)) {
            return Err(DomError::HierarchyRequest("node cannot be inserted"));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest("node would become its own ancestor"));
        }

        self.detach(child);
        self.link(parent, child);
        Ok(())
    }

    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let node = self.get(child).ok_or(DomError::NotFound(child))?;
        if node.parent != parent {
            return Err(DomError::HierarchyRequest("node is not a child of parent"));
        }
        self.detach(child);
        Ok(())
    }

    /// Detach a node from its parent, if any
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = NodeId::NONE;
        }
    }

    /// Detach and destroy a node with all descendants and shadow trees.
    /// Returns the number of destroyed nodes.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        if !self.contains(id) || id == NodeId::ROOT {
            return 0;
        }
        self.detach(id);

        let mut destroyed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get_mut(current.index()).and_then(Option::take) else {
                continue;
            };
            destroyed += 1;
            stack.extend(node.children.iter().copied());
            if let Some(shadow) = node.as_element().and_then(|e| e.shadow_root) {
                stack.push(shadow);
            }
        }
        self.live -= destroyed;
        destroyed
    }

    /// Light-tree descendants of `id` in tree order (exclusive)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(id).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.child_ids(current).into_iter().rev());
        }
        out
    }

    /// Descendants including nodes inside shadow trees, in shadow-including tree order
    pub fn shadow_including_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if current != id {
                out.push(current);
            }
            let mut next = Vec::new();
            if let Some(shadow) = self.element(current).and_then(|e| e.shadow_root) {
                next.push(shadow);
            }
            next.extend(self.child_ids(current));
            stack.extend(next.into_iter().rev());
        }
        out
    }

    /// Whether the node is reachable from the document, crossing shadow roots
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == NodeId::ROOT {
                return true;
            }
            let Some(node) = self.get(current) else {
                return false;
            };
            current = match &node.data {
                NodeData::ShadowRoot(shadow) => shadow.host,
                _ => node.parent,
            };
            if !current.is_valid() {
                return false;
            }
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Check whether an attribute is present
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id)
            .map(|e| e.attrs.has_attribute(name))
            .unwrap_or(false)
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.attrs.set_attribute(name, value))
    }

    /// Remove an attribute, returning its value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.attrs.remove_attribute(name))
    }

    /// Toggle a presence attribute
    pub fn toggle_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        force: Option<bool>,
    ) -> Result<bool, DomError> {
        Ok(self.element_mut(id)?.attrs.toggle_attribute(name, force))
    }

    /// Concatenated text of all light-tree descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children of an element with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.element_mut(id)?;
        for child in self.child_ids(id) {
            self.remove_subtree(child);
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.link(id, node);
        }
        Ok(())
    }

    /// Structural deep clone: tag, attributes, text and nested markup.
    /// Shadow roots are never cloned. The clone is detached.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId, DomError> {
        let node = self.get(id).ok_or(DomError::NotFound(id))?;
        let data = match &node.data {
            NodeData::Element(e) => NodeData::Element(ElementData {
                tag: e.tag.clone(),
                attrs: e.attrs.clone(),
                shadow_root: None,
            }),
            NodeData::Text(t) => NodeData::Text(t.clone()),
            NodeData::Comment(c) => NodeData::Comment(c.clone()),
            NodeData::Document | NodeData::ShadowRoot(_) => {
                return Err(DomError::HierarchyRequest("node cannot be cloned"));
            }
        };
        let children = node.children.clone();

        let copy = self.alloc(Node::new(data));
        for child in children {
            let child_copy = self.deep_clone(child)?;
            self.link(copy, child_copy);
        }
        Ok(copy)
    }

    /// First descendant of `scope` (shadow-including) whose `part` lists `part`
    pub fn query_part(&self, scope: NodeId, part: &str) -> Option<NodeId> {
        self.shadow_including_descendants(scope)
            .into_iter()
            .find(|&id| self.element(id).map(|e| e.has_part(part)).unwrap_or(false))
    }

    /// Elements with the given tag, shadow-including tree order
    pub fn elements_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.shadow_including_descendants(scope)
            .into_iter()
            .filter(|&id| self.tag_name(id).map(|t| t.eq_ignore_ascii_case(tag)).unwrap_or(false))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
