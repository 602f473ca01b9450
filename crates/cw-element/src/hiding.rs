//! Content hiding strategy
//!
//! | revealed | mode       | wrapper attributes                 |
//! |----------|------------|------------------------------------|
//! | no       | structural | `hidden`, `inert`                  |
//! | no       | visual     | `aria-hidden="true"`               |
//! | yes      | either     | none                               |

use cw_a11y::aria::ARIA_HIDDEN;
use cw_dom::{DomError, DomTree, NodeId};

use crate::reveal::RevealState;

/// How content is hidden while unrevealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HidingMode {
    /// Removed from rendering, the accessibility tree and interaction
    #[default]
    Structural,
    /// Obscured visually and hidden from assistive technology only
    Visual,
}

impl HidingMode {
    pub fn from_blur(blur: bool) -> Self {
        if blur { Self::Visual } else { Self::Structural }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Visual => "visual",
        }
    }
}

/// Hiding attributes on the content wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HidingAttributes {
    pub hidden: bool,
    pub inert: bool,
    pub aria_hidden: bool,
}

impl HidingAttributes {
    /// No hiding at all
    pub const NONE: Self = Self {
        hidden: false,
        inert: false,
        aria_hidden: false,
    };

    /// Attribute set for a mode and reveal state
    pub fn derive(mode: HidingMode, state: RevealState) -> Self {
        if state.is_revealed() {
            return Self::NONE;
        }
        match mode {
            HidingMode::Structural => Self {
                hidden: true,
                inert: true,
                aria_hidden: false,
            },
            HidingMode::Visual => Self {
                aria_hidden: true,
                ..Self::NONE
            },
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    /// Write exactly this set onto `wrapper`, removing anything else
    pub fn apply(self, tree: &mut DomTree, wrapper: NodeId) -> Result<(), DomError> {
        tree.toggle_attribute(wrapper, "hidden", Some(self.hidden))?;
        tree.toggle_attribute(wrapper, "inert", Some(self.inert))?;
        if self.aria_hidden {
            tree.set_attribute(wrapper, ARIA_HIDDEN, "true")?;
        } else {
            tree.remove_attribute(wrapper, ARIA_HIDDEN)?;
        }
        Ok(())
    }

    /// Read the set currently on `wrapper`
    pub fn read(tree: &DomTree, wrapper: NodeId) -> Self {
        Self {
            hidden: tree.has_attribute(wrapper, "hidden"),
            inert: tree.has_attribute(wrapper, "inert"),
            aria_hidden: tree.get_attribute(wrapper, ARIA_HIDDEN) == Some("true"),
        }
    }
}
