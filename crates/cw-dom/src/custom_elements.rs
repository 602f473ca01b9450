//! Custom Elements
//!
//! Custom element registry and lifecycle callback queue.

use std::collections::{HashMap, VecDeque};

use crate::{DomError, NodeId};

/// Custom elements registry
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, CustomElementDefinition>,
}

/// Custom element definition
#[derive(Debug, Clone)]
pub struct CustomElementDefinition {
    pub name: String,
    pub observed_attributes: Vec<String>,
}

/// Custom element options
#[derive(Debug, Clone, Default)]
pub struct CustomElementOptions {
    pub observed_attributes: Vec<String>,
}

/// Custom element lifecycle callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCallback {
    Connected,
    Disconnected,
    AttributeChanged,
}

/// Lifecycle callback info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleCallbackInfo {
    pub callback: LifecycleCallback,
    pub element: NodeId,
    pub attribute_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl LifecycleCallbackInfo {
    pub fn connected(element: NodeId) -> Self {
        Self {
            callback: LifecycleCallback::Connected,
            element,
            attribute_name: None,
            old_value: None,
            new_value: None,
        }
    }

    pub fn disconnected(element: NodeId) -> Self {
        Self {
            callback: LifecycleCallback::Disconnected,
            ..Self::connected(element)
        }
    }

    pub fn attribute_changed(
        element: NodeId,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            callback: LifecycleCallback::AttributeChanged,
            element,
            attribute_name: Some(name.to_ascii_lowercase()),
            old_value,
            new_value,
        }
    }
}

/// Pending callback queue, delivered in FIFO order
#[derive(Debug, Default)]
pub struct CallbackQueue {
    callbacks: VecDeque<LifecycleCallbackInfo>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, info: LifecycleCallbackInfo) {
        self.callbacks.push_back(info);
    }

    pub fn pop(&mut self) -> Option<LifecycleCallbackInfo> {
        self.callbacks.pop_front()
    }

    pub fn drain(&mut self) -> Vec<LifecycleCallbackInfo> {
        self.callbacks.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom element
    pub fn define(&mut self, name: &str, options: CustomElementOptions) -> Result<(), DomError> {
        if !Self::is_valid_name(name) {
            return Err(DomError::InvalidCustomElementName(name.to_string()));
        }
        if self.definitions.contains_key(name) {
            return Err(DomError::AlreadyDefined(name.to_string()));
        }

        let definition = CustomElementDefinition {
            name: name.to_string(),
            observed_attributes: options
                .observed_attributes
                .iter()
                .map(|a| a.to_ascii_lowercase())
                .collect(),
        };
        self.definitions.insert(name.to_string(), definition);
        tracing::debug!("Defined custom element <{}>", name);
        Ok(())
    }

    /// Get element definition
    pub fn get(&self, name: &str) -> Option<&CustomElementDefinition> {
        self.definitions.get(name)
    }

    /// Check if element is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Whether the definition for `name` observes `attribute`
    pub fn observes(&self, name: &str, attribute: &str) -> bool {
        self.get(name)
            .map(|d| d.observed_attributes.iter().any(|a| a.eq_ignore_ascii_case(attribute)))
            .unwrap_or(false)
    }

    /// Validate custom element name
    pub fn is_valid_name(name: &str) -> bool {
        // Must contain hyphen
        if !name.contains('-') {
            return false;
        }

        // Must start with lowercase letter
        if !name.chars().next().map(|c| c.is_ascii_lowercase()).unwrap_or(false) {
            return false;
        }

        if name.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace()) {
            return false;
        }

        // Reserved names
        let reserved = [
            "annotation-xml",
            "color-profile",
            "font-face",
            "font-face-src",
            "font-face-uri",
            "font-face-format",
            "font-face-name",
            "missing-glyph",
        ];
        !reserved.contains(&name)
    }
}
