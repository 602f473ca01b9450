//! Accessibility tree membership
//!
//! Queries walk the flat tree, so slotted content inherits the state of
//! the shadow wrapper it is projected into.

use cw_dom::{DomTree, NodeId};

use crate::aria::ARIA_HIDDEN;

/// Visit flat-tree inclusive ancestors until `visit` matches.
/// A slottable no slot accepts is unrendered and counts as a match.
fn any_flat_ancestor(tree: &DomTree, node: NodeId, visit: impl Fn(NodeId) -> bool) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if visit(id) {
            return true;
        }
        if tree.is_unassigned_slottable(id) {
            return true;
        }
        current = tree.flat_parent(id);
    }
    false
}

/// Whether the node is removed from the interaction tree (`hidden` or `inert`)
pub fn is_inert(tree: &DomTree, node: NodeId) -> bool {
    any_flat_ancestor(tree, node, |id| {
        tree.has_attribute(id, "hidden") || tree.has_attribute(id, "inert")
    })
}

/// Whether assistive technology can reach the node
pub fn is_excluded_from_accessibility_tree(tree: &DomTree, node: NodeId) -> bool {
    any_flat_ancestor(tree, node, |id| {
        tree.has_attribute(id, "hidden")
            || tree.has_attribute(id, "inert")
            || tree.get_attribute(id, ARIA_HIDDEN) == Some("true")
    })
}
