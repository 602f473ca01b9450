//! Content-warning Accessibility
//!
//! Accessibility primitives for the content-warning element.
//!
//! Features:
//! - ARIA roles and live-region modes
//! - Live region attribute application
//! - Accessibility/interaction tree exclusion over the flat tree
//! - Focus management

pub mod aria;
pub mod focus;
pub mod live_region;
pub mod tree;

pub use aria::{AriaRole, LiveRegionMode, LiveRelevant};
pub use focus::{TabIndex, blur, focus, is_focusable};
pub use live_region::{LiveRegionConfig, RelevantFlags};
pub use tree::{is_excluded_from_accessibility_tree, is_inert};

/// Accessibility error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("Invalid ARIA role: {0}")]
    InvalidRole(String),

    #[error("Invalid live region mode: {0}")]
    InvalidLiveRegion(String),
}
