//! Content Warning Element
//!
//! A `<content-warning>` element hides embedded content behind a prompt
//! until the viewer explicitly opts in to reveal it.
//!
//! The widget core is split into:
//! - [`label`]: composes the prompt label fragments
//! - [`hiding`]: which hiding attributes the content wrapper carries
//! - [`reveal`]: the one-way Hidden -> Revealed transition
//! - [`announce`]: mirrors revealed content into a live region
//! - [`bridge`]: keeps properties and attributes consistent
//!
//! [`Runtime`] plays the host runtime: it defines the element, upgrades
//! instances, delivers lifecycle reactions and routes user input.

pub mod announce;
pub mod bridge;
pub mod config;
mod element;
mod error;
pub mod hiding;
pub mod label;
mod options;
pub mod render;
pub mod reveal;
mod runtime;
pub mod styles;

pub use config::{ConfigKey, LayoutMode, WidgetConfiguration};
pub use element::ContentWarning;
pub use error::WidgetError;
pub use hiding::{HidingAttributes, HidingMode};
pub use label::{LabelParts, compose};
pub use options::ElementOptions;
pub use render::{CachedReferences, Renderer, ShadowTemplate};
pub use reveal::RevealState;
pub use runtime::{REVEALED_PROPERTY, Runtime};

pub use cw_dom::{CustomEvent, Document, NodeId, PropertyValue};

/// Element tag name
pub const TAG_NAME: &str = "content-warning";

/// Event fired once when the content is revealed
pub const REVEAL_EVENT: &str = "content-revealed";
