//! Live Region Support
//!
//! ARIA live regions for announcing content to assistive technology.

use cw_dom::{DomError, DomTree, NodeId};

use crate::aria::{ARIA_ATOMIC, ARIA_LIVE, ARIA_RELEVANT, LiveRegionMode, LiveRelevant};

/// Live region configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LiveRegionConfig {
    /// Politeness level: off, polite, assertive
    pub politeness: LiveRegionMode,
    /// Whether to announce entire region or just changes
    pub atomic: bool,
    /// What types of changes to announce
    pub relevant: RelevantFlags,
}

impl Default for LiveRegionConfig {
    fn default() -> Self {
        Self {
            politeness: LiveRegionMode::Off,
            atomic: false,
            // ARIA default for aria-relevant is "additions text"
            relevant: RelevantFlags::additions_text(),
        }
    }
}

impl LiveRegionConfig {
    /// Create polite live region
    pub fn polite() -> Self {
        Self {
            politeness: LiveRegionMode::Polite,
            ..Default::default()
        }
    }

    /// Create assertive live region
    pub fn assertive() -> Self {
        Self {
            politeness: LiveRegionMode::Assertive,
            ..Default::default()
        }
    }

    /// Set atomic mode
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Write the configuration onto an element.
    /// `aria-relevant` is only written when it differs from the ARIA default.
    pub fn apply(&self, tree: &mut DomTree, node: NodeId) -> Result<(), DomError> {
        tree.set_attribute(node, ARIA_LIVE, self.politeness.as_str())?;
        if self.atomic {
            tree.set_attribute(node, ARIA_ATOMIC, "true")?;
        } else {
            tree.remove_attribute(node, ARIA_ATOMIC)?;
        }
        if self.relevant == RelevantFlags::additions_text() {
            tree.remove_attribute(node, ARIA_RELEVANT)?;
        } else {
            tree.set_attribute(node, ARIA_RELEVANT, &self.relevant.to_attribute_value())?;
        }
        Ok(())
    }

    /// Read the configuration of an element, if it is a live region
    pub fn from_element(tree: &DomTree, node: NodeId) -> Option<Self> {
        let politeness = tree.get_attribute(node, ARIA_LIVE)?.parse().ok()?;
        let relevant = tree
            .get_attribute(node, ARIA_RELEVANT)
            .map(|value| {
                let tokens: Vec<_> = value.split_ascii_whitespace().filter_map(LiveRelevant::parse).collect();
                RelevantFlags::from_aria(&tokens)
            })
            .unwrap_or_else(RelevantFlags::additions_text);
        Some(Self {
            politeness,
            atomic: tree.get_attribute(node, ARIA_ATOMIC) == Some("true"),
            relevant,
        })
    }
}

/// Relevant change flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelevantFlags {
    pub additions: bool,
    pub removals: bool,
    pub text: bool,
}

impl RelevantFlags {
    pub fn all() -> Self {
        Self { additions: true, removals: true, text: true }
    }

    pub fn additions_text() -> Self {
        Self { additions: true, removals: false, text: true }
    }

    pub fn from_aria(relevant: &[LiveRelevant]) -> Self {
        let mut flags = Self::default();
        for r in relevant {
            match r {
                LiveRelevant::Additions => flags.additions = true,
                LiveRelevant::Removals => flags.removals = true,
                LiveRelevant::Text => flags.text = true,
                LiveRelevant::All => return Self::all(),
            }
        }
        if !flags.additions && !flags.removals && !flags.text {
            // Default is additions text
            Self::additions_text()
        } else {
            flags
        }
    }

    fn to_attribute_value(self) -> String {
        if self == Self::all() {
            return "all".to_string();
        }
        [(self.additions, "additions"), (self.removals, "removals"), (self.text, "text")]
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
