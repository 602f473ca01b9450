//! Accessible announcement sync
//!
//! At reveal the projected content is deep-cloned into the live region.
//! The clones stay there for good; assistive technology users may come
//! back to them at any time.

use cw_dom::{DomError, DomTree};

use crate::render::CachedReferences;

/// Clone every element assigned to the content slot into the announcement
/// region. Returns the number of cloned elements.
pub fn sync(tree: &mut DomTree, refs: &CachedReferences) -> Result<usize, DomError> {
    let (Some(slot), Some(region)) = (refs.slot, refs.announcement) else {
        return Ok(0);
    };

    let projected = tree.assigned_elements(slot);
    for &element in &projected {
        let copy = tree.deep_clone(element)?;
        tree.append_child(region, copy)?;
    }
    Ok(projected.len())
}
