//! Element options

use cw_dom::{ShadowRootInit, ShadowRootMode};
use serde::{Deserialize, Serialize};

use crate::{TAG_NAME, WidgetError};

/// Per-definition options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementOptions {
    /// Tag name the element is defined under
    pub tag_name: String,
    /// Shadow root mode
    pub shadow_mode: ShadowRootMode,
    /// Whether the shadow root delegates focus
    pub delegates_focus: bool,
    /// Frame boundaries to wait after first attachment before initializing
    pub init_frames: u8,
    /// Move focus to the content after reveal
    pub focus_on_reveal: bool,
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            tag_name: TAG_NAME.to_string(),
            shadow_mode: ShadowRootMode::Open,
            delegates_focus: false,
            init_frames: 2,
            focus_on_reveal: true,
        }
    }
}

impl ElementOptions {
    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        if !(1..=2).contains(&self.init_frames) {
            return Err(WidgetError::InitFrames(self.init_frames));
        }
        Ok(())
    }

    /// Frame count clamped to the supported range
    pub fn init_frames(&self) -> u8 {
        self.init_frames.clamp(1, 2)
    }

    pub(crate) fn shadow_init(&self) -> ShadowRootInit {
        ShadowRootInit {
            mode: self.shadow_mode,
            delegates_focus: self.delegates_focus,
        }
    }
}
