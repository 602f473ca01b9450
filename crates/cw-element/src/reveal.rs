//! Reveal state machine
//!
//! `Hidden -> Revealed`, once per instance. Every later request is a no-op.

use cw_a11y::aria::ROLE;
use cw_dom::{CustomEvent, Document, DomError};
use serde_json::json;

use crate::element::ContentWarning;
use crate::hiding::HidingAttributes;
use crate::{REVEAL_EVENT, announce};

/// Reveal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

impl RevealState {
    pub fn is_revealed(self) -> bool {
        self == Self::Revealed
    }

    /// Take the single transition. Returns false if already revealed.
    pub fn advance(&mut self) -> bool {
        match self {
            Self::Hidden => {
                *self = Self::Revealed;
                true
            }
            Self::Revealed => false,
        }
    }
}

impl ContentWarning {
    /// Reveal the content.
    ///
    /// Returns true when this call performed the transition. The
    /// `content-revealed` notification fires from that call only.
    pub fn reveal(&mut self, doc: &mut Document) -> bool {
        if !self.state.advance() {
            tracing::trace!("Reveal ignored for {:?}, already revealed", self.host);
            return false;
        }
        tracing::debug!("Revealing content warning {:?}", self.host);

        // Before initialization there is nothing to tear down; init honours
        // the revealed state instead.
        if self.is_initialized() {
            if let Err(err) = self.expose(doc) {
                tracing::warn!("Failed to expose content of {:?}: {}", self.host, err);
            }
        }

        self.notify(doc);

        if self.options.focus_on_reveal {
            if let Some(content) = self.refs.content {
                cw_a11y::focus(doc, content);
            }
        }
        true
    }

    /// Tear down the prompt and present the content
    pub(crate) fn expose(&mut self, doc: &mut Document) -> Result<(), DomError> {
        if let Some(content) = self.refs.content {
            HidingAttributes::NONE.apply(&mut doc.tree, content)?;
        }
        if let Some(prompt) = self.refs.take_prompt() {
            doc.tree.remove_subtree(prompt);
        }
        self.release();

        let announced = announce::sync(&mut doc.tree, &self.refs)?;
        tracing::trace!("Announced {} element(s) for {:?}", announced, self.host);

        doc.remove_attribute(self.host, ROLE)?;
        doc.remove_attribute(self.host, "tabindex")?;
        Ok(())
    }

    fn notify(&self, doc: &mut Document) {
        let warning_type = doc.tree().get_attribute(self.host, "type").map(str::to_string);
        let event = CustomEvent::new(REVEAL_EVENT, self.host)
            .with_detail(json!({ "type": warning_type }))
            .bubbles(true)
            .composed(true);
        doc.dispatch_event(event);
    }
}
