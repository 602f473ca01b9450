//! Presentation
//!
//! A [`Renderer`] paints widget state into the shadow root. The widget
//! core decides what to show; the renderer only decides which nodes show it.

use std::fmt;

use cw_a11y::LiveRegionConfig;
use cw_dom::{DomError, DomTree, NodeId};

use crate::config::LayoutMode;
use crate::label::LabelParts;

/// Handles to the rendered presentation nodes.
///
/// Every handle is `None` before the first render, and prompt handles
/// return to `None` once the prompt is torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachedReferences {
    pub overlay: Option<NodeId>,
    pub button: Option<NodeId>,
    pub label_prefix: Option<NodeId>,
    pub label_type: Option<NodeId>,
    pub label_suffix: Option<NodeId>,
    pub content: Option<NodeId>,
    pub slot: Option<NodeId>,
    pub announcement: Option<NodeId>,
}

impl CachedReferences {
    pub fn is_rendered(&self) -> bool {
        self.content.is_some()
    }

    /// Whether the prompt is still part of the presentation
    pub fn has_prompt(&self) -> bool {
        self.overlay.is_some()
    }

    /// Invalidate the prompt handles, returning the prompt's root node
    pub fn take_prompt(&mut self) -> Option<NodeId> {
        self.button = None;
        self.label_prefix = None;
        self.label_type = None;
        self.label_suffix = None;
        self.overlay.take()
    }
}

/// Paints widget state into a shadow root
pub trait Renderer: fmt::Debug {
    /// Build the presentation structure once
    fn build(&self, tree: &mut DomTree, shadow_root: NodeId) -> Result<CachedReferences, DomError>;

    /// Paint label fragments into the prompt
    fn paint_label(&self, tree: &mut DomTree, refs: &mut CachedReferences, label: &LabelParts) -> Result<(), DomError>;

    /// Paint the layout mode
    fn paint_layout(&self, tree: &mut DomTree, refs: &CachedReferences, layout: LayoutMode) -> Result<(), DomError>;
}

/// Default shadow structure
///
/// ```text
/// #shadow-root
///   div[part=overlay]
///     button[part=button]
///       span[part=label-prefix] span[part=label-type] span[part=label-suffix]
///   div[part=content][tabindex=-1]
///     slot
///   div.announcement[aria-live=assertive][aria-atomic=true]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowTemplate;

impl ShadowTemplate {
    fn element(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> Result<NodeId, DomError> {
        let node = tree.create_element(tag);
        for (name, value) in attrs {
            tree.set_attribute(node, name, value)?;
        }
        tree.append_child(parent, node)?;
        Ok(node)
    }
}

impl Renderer for ShadowTemplate {
    fn build(&self, tree: &mut DomTree, shadow_root: NodeId) -> Result<CachedReferences, DomError> {
        let overlay = Self::element(tree, shadow_root, "div", &[("part", "overlay")])?;
        let button = Self::element(tree, overlay, "button", &[("part", "button"), ("type", "button"), ("tabindex", "-1")])?;
        let label_prefix = Self::element(tree, button, "span", &[("part", "label-prefix")])?;
        let label_type = Self::element(tree, button, "span", &[("part", "label-type")])?;

        let content = Self::element(tree, shadow_root, "div", &[("part", "content"), ("tabindex", "-1")])?;
        let slot = Self::element(tree, content, "slot", &[])?;

        let announcement = Self::element(tree, shadow_root, "div", &[("class", "announcement")])?;
        LiveRegionConfig::assertive().with_atomic(true).apply(tree, announcement)?;

        Ok(CachedReferences {
            overlay: Some(overlay),
            button: Some(button),
            label_prefix: Some(label_prefix),
            label_type: Some(label_type),
            label_suffix: None,
            content: Some(content),
            slot: Some(slot),
            announcement: Some(announcement),
        })
    }

    fn paint_label(&self, tree: &mut DomTree, refs: &mut CachedReferences, label: &LabelParts) -> Result<(), DomError> {
        let (Some(button), Some(prefix), Some(kind)) = (refs.button, refs.label_prefix, refs.label_type) else {
            return Ok(());
        };
        tree.set_text_content(prefix, &label.prefix)?;
        tree.set_text_content(kind, &label.warning_type)?;

        match (&label.suffix, refs.label_suffix) {
            (Some(text), Some(span)) => tree.set_text_content(span, text)?,
            (Some(text), None) => {
                let span = Self::element(tree, button, "span", &[("part", "label-suffix")])?;
                tree.set_text_content(span, text)?;
                refs.label_suffix = Some(span);
            }
            (None, Some(span)) => {
                tree.remove_subtree(span);
                refs.label_suffix = None;
            }
            (None, None) => {}
        }
        Ok(())
    }

    fn paint_layout(&self, tree: &mut DomTree, refs: &CachedReferences, layout: LayoutMode) -> Result<(), DomError> {
        if let Some(content) = refs.content {
            tree.set_attribute(content, "data-layout", layout.as_str())?;
        }
        if let Some(overlay) = refs.overlay {
            tree.set_attribute(overlay, "data-layout", layout.as_str())?;
        }
        Ok(())
    }
}
