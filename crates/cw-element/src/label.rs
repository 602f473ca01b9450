//! Label composition
//!
//! The prompt label is three independent fragments. Punctuation and
//! separators belong to the presentation layer.

use crate::config::{DEFAULT_PREFIX, DEFAULT_SUFFIX, DEFAULT_TYPE, SUFFIX_DISABLED};

/// Prompt label fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParts {
    pub prefix: String,
    pub warning_type: String,
    /// `None` when the suffix is disabled
    pub suffix: Option<String>,
}

/// Compose label fragments, substituting defaults for absent inputs.
///
/// A suffix of exactly `"false"` omits the suffix fragment.
pub fn compose(prefix: Option<&str>, warning_type: Option<&str>, suffix: Option<&str>) -> LabelParts {
    LabelParts {
        prefix: prefix.unwrap_or(DEFAULT_PREFIX).to_string(),
        warning_type: warning_type.unwrap_or(DEFAULT_TYPE).to_string(),
        suffix: match suffix {
            Some(SUFFIX_DISABLED) => None,
            Some(text) => Some(text.to_string()),
            None => Some(DEFAULT_SUFFIX.to_string()),
        },
    }
}
