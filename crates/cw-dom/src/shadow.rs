//! Shadow DOM
//!
//! Shadow roots, slot assignment and flat-tree traversal.

use serde::{Deserialize, Serialize};

use crate::{DomError, Node, NodeData, NodeId, DomTree};

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

/// Options for `attach_shadow`
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowRootInit {
    pub mode: ShadowRootMode,
    pub delegates_focus: bool,
}

/// Shadow root
#[derive(Debug, Clone)]
pub struct ShadowRootData {
    pub host: NodeId,
    pub mode: ShadowRootMode,
    pub delegates_focus: bool,
    adopted_style_sheets: Vec<String>,
}

impl ShadowRootData {
    fn new(host: NodeId, init: ShadowRootInit) -> Self {
        Self {
            host,
            mode: init.mode,
            delegates_focus: init.delegates_focus,
            adopted_style_sheets: Vec::new(),
        }
    }

    /// IDs of style sheets adopted by this root
    pub fn adopted_style_sheets(&self) -> &[String] {
        &self.adopted_style_sheets
    }

    /// Adopt a style sheet; returns false if already adopted
    pub fn adopt(&mut self, sheet_id: &str) -> bool {
        if self.adopted_style_sheets.iter().any(|s| s == sheet_id) {
            return false;
        }
        self.adopted_style_sheets.push(sheet_id.to_string());
        true
    }
}

impl DomTree {
    /// Attach a shadow root to an element
    pub fn attach_shadow(&mut self, host: NodeId, init: ShadowRootInit) -> Result<NodeId, DomError> {
        if self.element_mut(host)?.shadow_root.is_some() {
            return Err(DomError::HierarchyRequest("element already hosts a shadow root"));
        }
        let root = self.alloc(Node::new(NodeData::ShadowRoot(ShadowRootData::new(host, init))));
        self.element_mut(host)?.shadow_root = Some(root);
        Ok(root)
    }

    /// Shadow root attached to `host`
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.element(host).and_then(|e| e.shadow_root)
    }

    /// Shadow root data
    pub fn shadow_root_data(&self, root: NodeId) -> Option<&ShadowRootData> {
        self.get(root).and_then(Node::as_shadow_root)
    }

    /// Mutable shadow root data
    pub fn shadow_root_data_mut(&mut self, root: NodeId) -> Option<&mut ShadowRootData> {
        match &mut self.get_mut(root)?.data {
            NodeData::ShadowRoot(s) => Some(s),
            _ => None,
        }
    }

    /// Host of a shadow root
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        self.shadow_root_data(root).map(|s| s.host)
    }

    /// Shadow root whose tree contains `node`
    pub fn containing_shadow_root(&self, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.get(id).map(Node::is_shadow_root).unwrap_or(false) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Slot name a light-tree child asks for ("" is the default slot)
    fn requested_slot_name(&self, node: NodeId) -> Option<&str> {
        let node_ref = self.get(node)?;
        match &node_ref.data {
            NodeData::Element(e) => Some(e.get_attr("slot").unwrap_or("")),
            NodeData::Text(_) => Some(""),
            _ => None,
        }
    }

    /// Name of a `<slot>` element
    fn slot_name(&self, slot: NodeId) -> &str {
        self.get_attribute(slot, "name").unwrap_or("")
    }

    /// First slot in tree order within `root` with the given name
    fn find_slot(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.tag_name(id) == Some("slot") && self.slot_name(id) == name)
    }

    /// Slot a child of a shadow host is projected into
    pub fn assigned_slot(&self, node: NodeId) -> Option<NodeId> {
        let host = self.parent(node)?;
        let root = self.shadow_root(host)?;
        let name = self.requested_slot_name(node)?;
        self.find_slot(root, name)
    }

    /// Nodes projected into a slot, in host-child order
    pub fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
        if self.tag_name(slot) != Some("slot") {
            return Vec::new();
        }
        let Some(root) = self.containing_shadow_root(slot) else {
            return Vec::new();
        };
        let Some(host) = self.shadow_host(root) else {
            return Vec::new();
        };
        let name = self.slot_name(slot);
        if self.find_slot(root, name) != Some(slot) {
            return Vec::new();
        }
        self.child_ids(host)
            .into_iter()
            .filter(|&child| self.requested_slot_name(child) == Some(name))
            .collect()
    }

    /// Elements projected into a slot
    pub fn assigned_elements(&self, slot: NodeId) -> Vec<NodeId> {
        self.assigned_nodes(slot)
            .into_iter()
            .filter(|&id| self.element(id).is_some())
            .collect()
    }

    /// Parent in the flat (rendered) tree.
    ///
    /// Children of a shadow host map to their assigned slot (or `None` when
    /// unassigned); shadow root children map to the host.
    pub fn flat_parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        if self.shadow_root(parent).is_some() {
            return self.assigned_slot(node);
        }
        match self.shadow_host(parent) {
            Some(host) => Some(host),
            None => Some(parent),
        }
    }

    /// Whether `node` is a child of a shadow host that no slot accepts
    pub fn is_unassigned_slottable(&self, node: NodeId) -> bool {
        self.parent(node)
            .map(|p| self.shadow_root(p).is_some() && self.assigned_slot(node).is_none())
            .unwrap_or(false)
    }
}
