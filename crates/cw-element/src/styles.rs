//! Widget style sheet
//!
//! One sheet per document, adopted by every shadow root. The sheet only
//! consumes the theming variables and parts listed here; it never
//! influences the hiding semantics, which live in attributes.

use cw_dom::{Document, NodeId};

/// Style sheet identifier within a document
pub const STYLE_SHEET_ID: &str = "content-warning";

/// Themable custom properties
pub const STYLE_VARIABLES: &[&str] = &[
    "--content-warning-background",
    "--content-warning-color",
    "--content-warning-border",
    "--content-warning-blur",
    "--content-warning-padding",
    "--content-warning-gap",
];

/// Styleable shadow parts
pub const STYLE_PARTS: &[&str] = &[
    "overlay",
    "button",
    "label-prefix",
    "label-type",
    "label-suffix",
    "content",
];

const CSS: &str = r#":host {
  display: block;
  position: relative;
}
:host([hidden]) {
  display: none;
}
:host([inline]) {
  display: inline-block;
}
[part="overlay"] {
  position: absolute;
  inset: 0;
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 1;
}
[part="button"] {
  display: flex;
  flex-direction: column;
  gap: var(--content-warning-gap, 0.25em);
  padding: var(--content-warning-padding, 1em);
  background: var(--content-warning-background, #1f1f1f);
  color: var(--content-warning-color, #ffffff);
  border: var(--content-warning-border, none);
  font: inherit;
  cursor: pointer;
}
[data-layout="inline"] [part="button"] {
  flex-direction: row;
}
[part="label-prefix"] {
  font-weight: bold;
}
[part="label-type"] {
  text-transform: capitalize;
}
[part="label-suffix"] {
  font-size: 0.875em;
  opacity: 0.8;
}
[part="content"][aria-hidden="true"] {
  filter: blur(var(--content-warning-blur, 10px));
  user-select: none;
  pointer-events: none;
}
.announcement {
  position: absolute;
  width: 1px;
  height: 1px;
  overflow: hidden;
  clip-path: inset(50%);
  white-space: nowrap;
}
"#;

/// Install the widget style sheet once per document.
/// Returns true when this call installed it.
pub fn ensure_installed(doc: &mut Document) -> bool {
    let installed = doc.install_style_sheet(STYLE_SHEET_ID, CSS);
    if installed {
        tracing::debug!("Installed {} style sheet", STYLE_SHEET_ID);
    }
    installed
}

/// Adopt the installed sheet into a shadow root
pub fn adopt(doc: &mut Document, shadow_root: NodeId) -> bool {
    doc.tree
        .shadow_root_data_mut(shadow_root)
        .map(|data| data.adopt(STYLE_SHEET_ID))
        .unwrap_or(false)
}

/// Full sheet text
pub fn css() -> &'static str {
    CSS
}
