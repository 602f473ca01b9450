//! Widget configuration
//!
//! The host element's attributes are the single source of truth; this
//! module names the keys and reads a normalized snapshot from them.

use cw_dom::{DomTree, NodeId};

use crate::hiding::HidingMode;
use crate::label::{self, LabelParts};

/// Default warning type
pub const DEFAULT_TYPE: &str = "content";
/// Default label prefix
pub const DEFAULT_PREFIX: &str = "Content Warning";
/// Default label suffix
pub const DEFAULT_SUFFIX: &str = "Click to reveal";
/// `label-suffix` value that omits the suffix entirely
pub const SUFFIX_DISABLED: &str = "false";

/// Configuration keys, each an attribute mirrored by a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Type,
    LabelPrefix,
    LabelSuffix,
    Inline,
    Blur,
    Hidden,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 6] = [
        Self::Type,
        Self::LabelPrefix,
        Self::LabelSuffix,
        Self::Inline,
        Self::Blur,
        Self::Hidden,
    ];

    /// Attribute name
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::LabelPrefix => "label-prefix",
            Self::LabelSuffix => "label-suffix",
            Self::Inline => "inline",
            Self::Blur => "blur",
            Self::Hidden => "hidden",
        }
    }

    /// Property name
    pub fn property(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::LabelPrefix => "labelPrefix",
            Self::LabelSuffix => "labelSuffix",
            Self::Inline => "inline",
            Self::Blur => "blur",
            Self::Hidden => "hidden",
        }
    }

    /// Presence flags serialize as attribute presence, not text
    pub fn is_flag(self) -> bool {
        matches!(self, Self::Inline | Self::Blur | Self::Hidden)
    }

    /// Keys whose change re-derives the prompt presentation
    pub fn is_observed(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn from_attribute(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.attribute().eq_ignore_ascii_case(name))
    }

    pub fn from_property(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.property() == name)
    }

    /// Attributes the element definition observes
    pub fn observed_attributes() -> Vec<String> {
        Self::ALL
            .into_iter()
            .filter(|k| k.is_observed())
            .map(|k| k.attribute().to_string())
            .collect()
    }
}

/// Layout of the prompt relative to surrounding text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Block,
    Inline,
}

impl LayoutMode {
    pub fn from_inline(inline: bool) -> Self {
        if inline { Self::Inline } else { Self::Block }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Inline => "inline",
        }
    }
}

/// Snapshot of the configuration carried by a host element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetConfiguration {
    pub warning_type: Option<String>,
    pub label_prefix: Option<String>,
    pub label_suffix: Option<String>,
    pub layout: LayoutMode,
    pub hiding: HidingMode,
    /// Host-level display suppression
    pub host_hidden: bool,
}

impl WidgetConfiguration {
    /// Read the configuration from the host's attributes
    pub fn read(tree: &DomTree, host: NodeId) -> Self {
        let text = |key: ConfigKey| tree.get_attribute(host, key.attribute()).map(str::to_string);
        let flag = |key: ConfigKey| tree.has_attribute(host, key.attribute());
        Self {
            warning_type: text(ConfigKey::Type),
            label_prefix: text(ConfigKey::LabelPrefix),
            label_suffix: text(ConfigKey::LabelSuffix),
            layout: LayoutMode::from_inline(flag(ConfigKey::Inline)),
            hiding: HidingMode::from_blur(flag(ConfigKey::Blur)),
            host_hidden: flag(ConfigKey::Hidden),
        }
    }

    /// Label fragments for the prompt
    pub fn label(&self) -> LabelParts {
        label::compose(
            self.label_prefix.as_deref(),
            self.warning_type.as_deref(),
            self.label_suffix.as_deref(),
        )
    }

    /// Individual warning type tokens ("violence spoilers" -> two tokens)
    pub fn warning_tokens(&self) -> impl Iterator<Item = &str> {
        self.warning_type
            .as_deref()
            .unwrap_or(DEFAULT_TYPE)
            .split_ascii_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(ConfigKey::from_attribute("label-prefix"), Some(ConfigKey::LabelPrefix));
        assert_eq!(ConfigKey::from_attribute("LABEL-SUFFIX"), Some(ConfigKey::LabelSuffix));
        assert_eq!(ConfigKey::from_property("labelSuffix"), Some(ConfigKey::LabelSuffix));
        assert_eq!(ConfigKey::from_property("label-suffix"), None);
        assert_eq!(ConfigKey::from_attribute("role"), None);
    }

    #[test]
    fn test_observed_attributes() {
        let observed = ConfigKey::observed_attributes();
        assert_eq!(observed, vec!["type", "label-prefix", "label-suffix", "inline", "blur"]);
    }

    #[test]
    fn test_read_defaults() {
        let mut tree = DomTree::new();
        let host = tree.create_element("content-warning");
        let config = WidgetConfiguration::read(&tree, host);

        assert_eq!(config, WidgetConfiguration::default());
        assert_eq!(config.warning_tokens().collect::<Vec<_>>(), vec!["content"]);
        tree.set_attribute(host, "inline", "").unwrap();
        assert_eq!(WidgetConfiguration::read(&tree, host).layout, LayoutMode::Inline);
    }

    #[test]
    fn test_read_configured() {
        let mut tree = DomTree::new();
        let host = tree.create_element("content-warning");
        tree.set_attribute(host, "type", "violence  spoilers").unwrap();
        tree.set_attribute(host, "blur", "").unwrap();
        tree.set_attribute(host, "label-suffix", "false").unwrap();

        let config = WidgetConfiguration::read(&tree, host);
        assert_eq!(config.hiding, HidingMode::Visual);
        assert_eq!(config.warning_tokens().collect::<Vec<_>>(), vec!["violence", "spoilers"]);
        assert_eq!(config.label().suffix, None);
    }
}
