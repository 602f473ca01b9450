//! Document - High-level document API
//!
//! Mutations that custom elements care about go through `Document` so the
//! matching lifecycle reactions are queued. Raw `DomTree` access stays
//! available for nodes no definition observes (shadow contents, plain markup).

use std::collections::HashSet;

use crate::{
    CallbackQueue, CustomElementOptions, CustomElementRegistry, CustomEvent, DomError, DomTree,
    EventListeners, FrameQueue, LifecycleCallbackInfo, ListenerId, NodeId, OwnProperties,
    PropertyValue,
};

/// Style sheet installed once per document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    pub id: String,
    pub css: String,
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    registry: CustomElementRegistry,
    upgraded: HashSet<NodeId>,
    reactions: CallbackQueue,
    listeners: EventListeners,
    frames: FrameQueue,
    own_properties: OwnProperties,
    style_sheets: Vec<StyleSheet>,
    active_element: Option<NodeId>,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with `<html><head/><body/></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        tree.link(tree.root(), html);
        tree.link(html, head);
        tree.link(html, body);

        Self {
            tree,
            registry: CustomElementRegistry::new(),
            upgraded: HashSet::new(),
            reactions: CallbackQueue::new(),
            listeners: EventListeners::new(),
            frames: FrameQueue::new(),
            own_properties: OwnProperties::new(),
            style_sheets: Vec::new(),
            active_element: None,
            html_element: html,
            body_element: body,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Custom elements
    // ------------------------------------------------------------------

    pub fn registry(&self) -> &CustomElementRegistry {
        &self.registry
    }

    /// Register a custom element definition
    pub fn define(&mut self, name: &str, options: CustomElementOptions) -> Result<(), DomError> {
        self.registry.define(name, options)
    }

    /// Mark an element as running custom behavior
    pub fn mark_upgraded(&mut self, element: NodeId) {
        self.upgraded.insert(element);
    }

    pub fn is_upgraded(&self, element: NodeId) -> bool {
        self.upgraded.contains(&element)
    }

    fn observes(&self, element: NodeId, attribute: &str) -> bool {
        self.is_upgraded(element)
            && self
                .tree
                .tag_name(element)
                .map(|tag| self.registry.observes(tag, attribute))
                .unwrap_or(false)
    }

    /// Queue a lifecycle reaction
    pub fn enqueue_reaction(&mut self, info: LifecycleCallbackInfo) {
        self.reactions.enqueue(info);
    }

    /// Next queued lifecycle reaction
    pub fn next_reaction(&mut self) -> Option<LifecycleCallbackInfo> {
        self.reactions.pop()
    }

    pub fn has_pending_reactions(&self) -> bool {
        !self.reactions.is_empty()
    }

    fn upgraded_in_subtree(&self, root: NodeId) -> Vec<NodeId> {
        std::iter::once(root)
            .chain(self.tree.shadow_including_descendants(root))
            .filter(|id| self.upgraded.contains(id))
            .collect()
    }

    // ------------------------------------------------------------------
    // Reaction-aware mutations
    // ------------------------------------------------------------------

    /// Set an attribute, queuing `attributeChanged` for observing elements
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let old = self.tree.set_attribute(element, name, value)?;
        if self.observes(element, name) {
            self.reactions.enqueue(LifecycleCallbackInfo::attribute_changed(
                element,
                name,
                old,
                Some(value.to_string()),
            ));
        }
        Ok(())
    }

    /// Remove an attribute, queuing `attributeChanged` when it was present
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Result<(), DomError> {
        let old = self.tree.remove_attribute(element, name)?;
        if old.is_some() && self.observes(element, name) {
            self.reactions
                .enqueue(LifecycleCallbackInfo::attribute_changed(element, name, old, None));
        }
        Ok(())
    }

    /// Toggle a presence attribute; returns whether it is present afterwards
    pub fn toggle_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        force: Option<bool>,
    ) -> Result<bool, DomError> {
        let present = self.tree.has_attribute(element, name);
        match force.unwrap_or(!present) {
            true if !present => self.set_attribute(element, name, "")?,
            false if present => self.remove_attribute(element, name)?,
            _ => {}
        }
        Ok(force.unwrap_or(!present))
    }

    /// Append a child, queuing connection reactions
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let was_connected = self.tree.is_connected(child);
        self.tree.append_child(parent, child)?;
        let connected = self.tree.is_connected(child);

        let customs = self.upgraded_in_subtree(child);
        if was_connected {
            for &element in &customs {
                self.reactions.enqueue(LifecycleCallbackInfo::disconnected(element));
            }
        }
        if connected {
            for &element in &customs {
                self.reactions.enqueue(LifecycleCallbackInfo::connected(element));
            }
        }
        Ok(())
    }

    /// Remove a child, queuing disconnection reactions
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let was_connected = self.tree.is_connected(child);
        self.tree.remove_child(parent, child)?;
        if was_connected {
            for element in self.upgraded_in_subtree(child) {
                self.reactions.enqueue(LifecycleCallbackInfo::disconnected(element));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register an event listener on a node
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        callback: impl FnMut(&mut CustomEvent) + 'static,
    ) -> ListenerId {
        self.listeners.add(node, event_type, callback)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Dispatch an event along its propagation path.
    /// Returns the number of listener invocations.
    pub fn dispatch_event(&mut self, mut event: CustomEvent) -> usize {
        let path = self.tree.event_path(event.target, event.bubbles, event.composed);
        self.listeners.dispatch(&mut event, &path)
    }

    // ------------------------------------------------------------------
    // Animation frames
    // ------------------------------------------------------------------

    pub fn request_animation_frame(&mut self, owner: NodeId) {
        self.frames.request(owner);
    }

    /// Begin a frame, returning the owners whose callbacks are due
    pub fn take_animation_frames(&mut self) -> Vec<NodeId> {
        self.frames.take()
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }

    // ------------------------------------------------------------------
    // Own properties
    // ------------------------------------------------------------------

    pub fn set_own_property(&mut self, node: NodeId, name: &str, value: PropertyValue) {
        self.own_properties.set(node, name, value);
    }

    pub fn own_property(&self, node: NodeId, name: &str) -> Option<&PropertyValue> {
        self.own_properties.get(node, name)
    }

    pub fn has_own_property(&self, node: NodeId, name: &str) -> bool {
        self.own_properties.contains(node, name)
    }

    /// Delete an own property, returning its value
    pub fn take_own_property(&mut self, node: NodeId, name: &str) -> Option<PropertyValue> {
        self.own_properties.take(node, name)
    }

    /// Drop per-node script state kept for a destroyed node
    pub fn forget(&mut self, node: NodeId) {
        self.upgraded.remove(&node);
        self.own_properties.clear(node);
    }

    // ------------------------------------------------------------------
    // Style sheets
    // ------------------------------------------------------------------

    /// Install a style sheet; returns false if one with this id exists
    pub fn install_style_sheet(&mut self, id: &str, css: &str) -> bool {
        if self.style_sheet(id).is_some() {
            return false;
        }
        self.style_sheets.push(StyleSheet {
            id: id.to_string(),
            css: css.to_string(),
        });
        true
    }

    pub fn style_sheet(&self, id: &str) -> Option<&StyleSheet> {
        self.style_sheets.iter().find(|s| s.id == id)
    }

    pub fn style_sheet_count(&self) -> usize {
        self.style_sheets.len()
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Focused element, if it still exists
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element.filter(|&id| self.tree.contains(id))
    }

    /// Set the focused element without focusability checks
    pub fn set_active_element(&mut self, element: Option<NodeId>) {
        self.active_element = element;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
