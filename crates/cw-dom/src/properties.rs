//! Script-facing property values
//!
//! `PropertyValue` is what a host framework hands to a property setter.
//! `OwnProperties` holds plain values assigned to an element before its
//! custom behavior was attached; they shadow the accessors until upgraded.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// A value assigned to an element property
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// `null` / `undefined`
    #[default]
    Absent,
    Flag(bool),
    Number(f64),
    Text(String),
}

impl PropertyValue {
    /// Truthiness as a presence flag
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Flag(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// String form written to an attribute; `None` means remove it
    pub fn to_attribute_value(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Flag(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Absent)
    }
}

/// Own (instance) properties per node
#[derive(Debug, Default)]
pub struct OwnProperties {
    by_node: HashMap<NodeId, BTreeMap<String, PropertyValue>>,
}

impl OwnProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: NodeId, name: &str, value: PropertyValue) {
        self.by_node
            .entry(node)
            .or_default()
            .insert(name.to_string(), value);
    }

    pub fn get(&self, node: NodeId, name: &str) -> Option<&PropertyValue> {
        self.by_node.get(&node).and_then(|props| props.get(name))
    }

    pub fn contains(&self, node: NodeId, name: &str) -> bool {
        self.get(node, name).is_some()
    }

    /// Delete an own property, returning its value
    pub fn take(&mut self, node: NodeId, name: &str) -> Option<PropertyValue> {
        let props = self.by_node.get_mut(&node)?;
        let value = props.remove(name);
        if props.is_empty() {
            self.by_node.remove(&node);
        }
        value
    }

    /// Drop every own property of a node
    pub fn clear(&mut self, node: NodeId) {
        self.by_node.remove(&node);
    }
}
