//! Host runtime adapter
//!
//! Plays the part of the browser around the widget: defines the element,
//! upgrades matching elements, delivers queued lifecycle reactions after
//! every mutation, pumps animation frames and routes user input.

use std::collections::HashMap;

use cw_dom::{
    CustomElementOptions, CustomEvent, Document, DomError, LifecycleCallback, LifecycleCallbackInfo,
    ListenerId, NodeId, PropertyValue,
};
use serde_json::json;

use crate::config::ConfigKey;
use crate::{ContentWarning, ElementOptions, WidgetError, bridge};

/// Read-only reveal state property
pub const REVEALED_PROPERTY: &str = "revealed";

/// Upper bound on frames run by [`Runtime::settle`]
const MAX_SETTLE_FRAMES: usize = 16;

/// Document plus the widget instances living in it
#[derive(Debug)]
pub struct Runtime {
    doc: Document,
    widgets: HashMap<NodeId, ContentWarning>,
    options: ElementOptions,
    defined: bool,
}

impl Runtime {
    pub fn new(options: ElementOptions) -> Self {
        Self {
            doc: Document::new(),
            widgets: HashMap::new(),
            options,
            defined: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Raw document access. Lifecycle reactions queued through it are
    /// delivered on the next runtime call.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn body(&self) -> NodeId {
        self.doc.body()
    }

    pub fn options(&self) -> &ElementOptions {
        &self.options
    }

    pub fn is_defined(&self) -> bool {
        self.defined
    }

    /// Register the element and upgrade every connected match in tree order
    pub fn define(&mut self) -> Result<(), WidgetError> {
        self.options.validate()?;
        self.doc.define(
            &self.options.tag_name,
            CustomElementOptions {
                observed_attributes: ConfigKey::observed_attributes(),
            },
        )?;
        self.defined = true;
        tracing::debug!("Defined <{}>", self.options.tag_name);

        let root = self.doc.tree().root();
        let existing = self.doc.tree().elements_by_tag(root, &self.options.tag_name);
        for element in existing {
            self.upgrade(element)?;
        }
        self.pump();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tree mutation
    // ------------------------------------------------------------------

    /// Create an element; defined tags are upgraded immediately
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, WidgetError> {
        let element = self.doc.tree.create_element(tag);
        if self.matches_definition(element) {
            self.upgrade(element)?;
        }
        Ok(element)
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.doc.tree.create_text(text)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), WidgetError> {
        self.doc.append_child(parent, child)?;
        if self.doc.tree().is_connected(child) {
            let pending: Vec<NodeId> = std::iter::once(child)
                .chain(self.doc.tree().shadow_including_descendants(child))
                .filter(|&id| self.matches_definition(id) && !self.widgets.contains_key(&id))
                .collect();
            for element in pending {
                self.upgrade(element)?;
            }
        }
        self.pump();
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), WidgetError> {
        self.doc.remove_child(parent, child)?;
        self.pump();
        Ok(())
    }

    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> Result<(), WidgetError> {
        self.doc.set_attribute(element, name, value)?;
        self.pump();
        Ok(())
    }

    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Result<(), WidgetError> {
        self.doc.remove_attribute(element, name)?;
        self.pump();
        Ok(())
    }

    /// Toggle a presence attribute; returns whether it is present afterwards
    pub fn toggle_attribute(&mut self, element: NodeId, name: &str) -> Result<bool, WidgetError> {
        let present = self.doc.toggle_attribute(element, name, None)?;
        self.pump();
        Ok(present)
    }

    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.doc.tree().get_attribute(element, name)
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Assign a property.
    ///
    /// Before upgrade, or while an own property shadows the accessor, the
    /// value is stored as a plain own property.
    pub fn set_property(
        &mut self,
        element: NodeId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), WidgetError> {
        self.doc.tree().element(element).ok_or(DomError::NotAnElement(element))?;
        let value = value.into();

        if !self.widgets.contains_key(&element) || self.doc.has_own_property(element, name) {
            self.doc.set_own_property(element, name, value);
            return Ok(());
        }

        match ConfigKey::from_property(name) {
            Some(key) => bridge::set(&mut self.doc, element, key, &value)?,
            None if name == REVEALED_PROPERTY => {
                tracing::trace!("Ignoring write to read-only {} on {:?}", name, element);
            }
            None => self.doc.set_own_property(element, name, value),
        }
        self.pump();
        Ok(())
    }

    /// Read a property
    pub fn get_property(&self, element: NodeId, name: &str) -> PropertyValue {
        if let Some(value) = self.doc.own_property(element, name) {
            return value.clone();
        }
        let Some(widget) = self.widgets.get(&element) else {
            return PropertyValue::Absent;
        };
        if name == REVEALED_PROPERTY {
            return PropertyValue::Flag(widget.is_revealed());
        }
        ConfigKey::from_property(name)
            .map(|key| bridge::get(self.doc.tree(), element, key))
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Run one animation frame. Returns the number of callbacks run.
    pub fn run_frame(&mut self) -> usize {
        let due = self.doc.take_animation_frames();
        for owner in &due {
            if let Some(widget) = self.widgets.get_mut(owner) {
                widget.on_frame(&mut self.doc);
            }
        }
        self.pump();
        due.len()
    }

    /// Run frames until none are pending. Returns the number of frames run.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.doc.has_pending_frames() && frames < MAX_SETTLE_FRAMES {
            self.run_frame();
            frames += 1;
        }
        frames
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Pointer activation on `target`. Returns true if it revealed a widget.
    pub fn click(&mut self, target: NodeId) -> bool {
        if cw_a11y::is_inert(self.doc.tree(), target) {
            tracing::trace!("Click on inert {:?} ignored", target);
            return false;
        }
        let path = self.doc.tree().event_path(target, true, true);
        let mut revealed = false;
        for node in path {
            if let Some(widget) = self.widgets.get_mut(&node) {
                revealed |= widget.handle_click(&mut self.doc, target);
            }
        }
        self.doc
            .dispatch_event(CustomEvent::new("click", target).bubbles(true).composed(true));
        self.pump();
        revealed
    }

    /// Key press on `target`. Returns true if it revealed a widget.
    pub fn key_down(&mut self, target: NodeId, key: &str) -> bool {
        if cw_a11y::is_inert(self.doc.tree(), target) {
            tracing::trace!("Key {:?} on inert {:?} ignored", key, target);
            return false;
        }
        let path = self.doc.tree().event_path(target, true, true);
        let mut revealed = false;
        for node in path {
            if let Some(widget) = self.widgets.get_mut(&node) {
                revealed |= widget.handle_key_down(&mut self.doc, target, key);
            }
        }
        self.doc.dispatch_event(
            CustomEvent::new("keydown", target)
                .with_detail(json!({ "key": key }))
                .bubbles(true)
                .composed(true),
        );
        self.pump();
        revealed
    }

    /// Move focus; false when the node cannot take it
    pub fn focus(&mut self, element: NodeId) -> bool {
        cw_a11y::focus(&mut self.doc, element)
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.doc.active_element()
    }

    // ------------------------------------------------------------------
    // Widgets and events
    // ------------------------------------------------------------------

    pub fn widget(&self, element: NodeId) -> Option<&ContentWarning> {
        self.widgets.get(&element)
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Programmatic reveal. Returns false for unknown or revealed elements.
    pub fn reveal(&mut self, element: NodeId) -> bool {
        let revealed = self
            .widgets
            .get_mut(&element)
            .map(|widget| widget.reveal(&mut self.doc))
            .unwrap_or(false);
        self.pump();
        revealed
    }

    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        callback: impl FnMut(&mut CustomEvent) + 'static,
    ) -> ListenerId {
        self.doc.add_event_listener(node, event_type, callback)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.doc.remove_event_listener(id)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn matches_definition(&self, element: NodeId) -> bool {
        self.defined && self.doc.tree().tag_name(element) == Some(self.options.tag_name.as_str())
    }

    fn upgrade(&mut self, element: NodeId) -> Result<(), WidgetError> {
        if self.widgets.contains_key(&element) {
            return Ok(());
        }
        let widget = ContentWarning::new(&mut self.doc, element, self.options.clone())?;
        self.doc.mark_upgraded(element);
        tracing::debug!("Upgraded {:?}", element);

        // `revealed` is read-only once upgraded, so an early assignment is discarded
        if self.doc.take_own_property(element, REVEALED_PROPERTY).is_some() {
            tracing::trace!("Dropped own `revealed` on {:?}", element);
        }

        for key in ConfigKey::ALL.into_iter().filter(|k| k.is_observed()) {
            if let Some(value) = self.doc.tree().get_attribute(element, key.attribute()) {
                let value = value.to_string();
                self.doc.enqueue_reaction(LifecycleCallbackInfo::attribute_changed(
                    element,
                    key.attribute(),
                    None,
                    Some(value),
                ));
            }
        }
        if self.doc.tree().is_connected(element) {
            self.doc.enqueue_reaction(LifecycleCallbackInfo::connected(element));
        }

        self.widgets.insert(element, widget);
        Ok(())
    }

    /// Drop widgets whose host was destroyed
    fn prune(&mut self) {
        let gone: Vec<NodeId> = self
            .widgets
            .keys()
            .copied()
            .filter(|&host| !self.doc.tree().contains(host))
            .collect();
        for host in gone {
            self.widgets.remove(&host);
            self.doc.forget(host);
            tracing::debug!("Pruned destroyed {:?}", host);
        }
    }

    /// Deliver queued lifecycle reactions in order
    fn pump(&mut self) {
        self.prune();
        while let Some(reaction) = self.doc.next_reaction() {
            let Some(widget) = self.widgets.get_mut(&reaction.element) else {
                continue;
            };
            match reaction.callback {
                LifecycleCallback::Connected => widget.on_attach(&mut self.doc),
                LifecycleCallback::Disconnected => widget.on_detach(&mut self.doc),
                LifecycleCallback::AttributeChanged => {
                    let name = reaction.attribute_name.as_deref().unwrap_or_default();
                    widget.on_config_changed(
                        &mut self.doc,
                        name,
                        reaction.old_value.as_deref(),
                        reaction.new_value.as_deref(),
                    );
                }
            }
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(ElementOptions::default())
    }
}
