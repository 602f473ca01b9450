//! Widget errors
//!
//! Lifecycle hooks log and swallow these; only setup APIs such as
//! `Runtime::define` hand them to the caller.

use cw_dom::DomError;

/// Content warning error
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Invalid element options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Invalid init frame count {0}, expected 1 or 2")]
    InitFrames(u8),
}
