//! Focus Management
//!
//! Focusability rules and moving the document's active element.

use cw_dom::{Document, DomTree, NodeId};

use crate::tree::is_inert;

/// Tab index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Negative tabindex: focusable by script, skipped by Tab
    Programmatic,
    /// tabindex="0" or positive
    Sequential(i32),
}

impl TabIndex {
    /// Parse a `tabindex` attribute value; garbage yields `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().parse::<i32>() {
            Ok(n) if n < 0 => Some(Self::Programmatic),
            Ok(n) => Some(Self::Sequential(n)),
            Err(_) => None,
        }
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

fn is_natively_focusable(tree: &DomTree, node: NodeId) -> bool {
    match tree.tag_name(node) {
        Some("button" | "input" | "select" | "textarea") => !tree.has_attribute(node, "disabled"),
        Some("a") => tree.has_attribute(node, "href"),
        _ => false,
    }
}

/// Whether `node` can receive focus right now
pub fn is_focusable(tree: &DomTree, node: NodeId) -> bool {
    if tree.element(node).is_none() || !tree.is_connected(node) || is_inert(tree, node) {
        return false;
    }
    tree.get_attribute(node, "tabindex")
        .and_then(TabIndex::parse)
        .is_some()
        || is_natively_focusable(tree, node)
}

/// Move focus to `node`. Returns false, leaving focus untouched, when the
/// node cannot take focus.
pub fn focus(doc: &mut Document, node: NodeId) -> bool {
    if !is_focusable(doc.tree(), node) {
        tracing::trace!("Focus refused for {:?}", node);
        return false;
    }
    doc.set_active_element(Some(node));
    true
}

/// Clear focus
pub fn blur(doc: &mut Document) {
    doc.set_active_element(None);
}
