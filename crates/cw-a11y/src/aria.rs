//! ARIA Support
//!
//! ARIA roles and live-region values used by disclosure widgets.

use std::fmt;
use std::str::FromStr;

use crate::A11yError;

pub const ROLE: &str = "role";
pub const ARIA_HIDDEN: &str = "aria-hidden";
pub const ARIA_LIVE: &str = "aria-live";
pub const ARIA_ATOMIC: &str = "aria-atomic";
pub const ARIA_RELEVANT: &str = "aria-relevant";

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    Alert,
    Button,
    Group,
    Log,
    Presentation,
    Region,
    Status,
}

impl AriaRole {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "alert" => Self::Alert,
            "button" => Self::Button,
            "group" => Self::Group,
            "log" => Self::Log,
            "none" | "presentation" => Self::Presentation,
            "region" => Self::Region,
            "status" => Self::Status,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Button => "button",
            Self::Group => "group",
            Self::Log => "log",
            Self::Presentation => "presentation",
            Self::Region => "region",
            Self::Status => "status",
        }
    }

    /// Check if role is an interactive widget
    pub fn is_widget(self) -> bool {
        matches!(self, Self::Button)
    }

    /// Live-region politeness implied by the role
    pub fn implicit_live(self) -> LiveRegionMode {
        match self {
            Self::Alert => LiveRegionMode::Assertive,
            Self::Log | Self::Status => LiveRegionMode::Polite,
            _ => LiveRegionMode::Off,
        }
    }
}

impl FromStr for AriaRole {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| A11yError::InvalidRole(s.to_string()))
    }
}

impl fmt::Display for AriaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live region mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveRegionMode {
    #[default]
    Off,
    Polite,
    Assertive,
}

impl LiveRegionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

impl FromStr for LiveRegionMode {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "off" => Ok(Self::Off),
            "polite" => Ok(Self::Polite),
            "assertive" => Ok(Self::Assertive),
            other => Err(A11yError::InvalidLiveRegion(other.to_string())),
        }
    }
}

/// Live region relevant values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveRelevant {
    Additions,
    Removals,
    Text,
    All,
}

impl LiveRelevant {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "additions" => Self::Additions,
            "removals" => Self::Removals,
            "text" => Self::Text,
            "all" => Self::All,
            _ => return None,
        })
    }
}
