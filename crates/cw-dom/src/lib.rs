//! Content-warning DOM
//!
//! Arena-based DOM tree for hosting the content-warning element.
//!
//! Features:
//! - Elements, text, comments and shadow roots in one arena
//! - Ordered attribute maps
//! - Slot projection and flat-tree traversal
//! - Custom element registry with a lifecycle reaction queue
//! - Custom events with bubbling and composed propagation
//! - Animation frame requests and pre-upgrade own properties

mod attributes;
mod custom_elements;
mod document;
mod events;
mod frames;
mod node;
mod properties;
mod shadow;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use custom_elements::{
    CallbackQueue, CustomElementDefinition, CustomElementOptions, CustomElementRegistry,
    LifecycleCallback, LifecycleCallbackInfo,
};
pub use document::{Document, StyleSheet};
pub use events::{CustomEvent, EventListeners, ListenerId};
pub use frames::FrameQueue;
pub use node::{ElementData, Node, NodeData};
pub use properties::{OwnProperties, PropertyValue};
pub use shadow::{ShadowRootData, ShadowRootInit, ShadowRootMode};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    #[error("Node is not an element: {0:?}")]
    NotAnElement(NodeId),

    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(&'static str),

    #[error("Invalid custom element name: {0}")]
    InvalidCustomElementName(String),

    #[error("Custom element already defined: {0}")]
    AlreadyDefined(String),
}
