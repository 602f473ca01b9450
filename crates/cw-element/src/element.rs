//! Content warning element
//!
//! Lifecycle hooks are plain methods; [`crate::Runtime`] decides when to
//! call them. None of them fail: DOM errors are logged and dropped.

use cw_a11y::AriaRole;
use cw_a11y::aria::ROLE;
use cw_dom::{Document, DomError, DomTree, NodeId};

use crate::config::{ConfigKey, WidgetConfiguration};
use crate::hiding::{HidingAttributes, HidingMode};
use crate::label::LabelParts;
use crate::render::{CachedReferences, Renderer, ShadowTemplate};
use crate::reveal::RevealState;
use crate::{ElementOptions, WidgetError, bridge, styles};

/// Deferred initialization progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitPhase {
    /// Never attached
    Pending,
    /// Waiting for frame boundaries
    Scheduled { frames_left: u8 },
    Initialized,
}

/// Nodes currently listened on for activation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Listeners {
    pub click: Option<NodeId>,
    pub key_down: Option<NodeId>,
}

/// A `<content-warning>` instance
#[derive(Debug)]
pub struct ContentWarning {
    pub(crate) host: NodeId,
    pub(crate) shadow_root: NodeId,
    pub(crate) options: ElementOptions,
    renderer: Box<dyn Renderer>,
    pub(crate) refs: CachedReferences,
    pub(crate) state: RevealState,
    phase: InitPhase,
    listeners: Listeners,
    connected: bool,
}

impl ContentWarning {
    /// Attach behavior to `host` with the default template
    pub fn new(doc: &mut Document, host: NodeId, options: ElementOptions) -> Result<Self, WidgetError> {
        Self::with_renderer(doc, host, options, Box::new(ShadowTemplate))
    }

    /// Attach behavior to `host` with a custom renderer
    pub fn with_renderer(
        doc: &mut Document,
        host: NodeId,
        options: ElementOptions,
        renderer: Box<dyn Renderer>,
    ) -> Result<Self, WidgetError> {
        let shadow_root = doc.tree.attach_shadow(host, options.shadow_init())?;
        styles::ensure_installed(doc);
        styles::adopt(doc, shadow_root);

        Ok(Self {
            host,
            shadow_root,
            options,
            renderer,
            refs: CachedReferences::default(),
            state: RevealState::Hidden,
            phase: InitPhase::Pending,
            listeners: Listeners::default(),
            connected: false,
        })
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn shadow_root(&self) -> NodeId {
        self.shadow_root
    }

    pub fn options(&self) -> &ElementOptions {
        &self.options
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    pub fn is_initialized(&self) -> bool {
        self.phase == InitPhase::Initialized
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether prompt activation is currently wired
    pub fn is_interactive(&self) -> bool {
        self.listeners != Listeners::default()
    }

    /// Rendered node handles
    pub fn references(&self) -> &CachedReferences {
        &self.refs
    }

    /// Current configuration as read from the host
    pub fn configuration(&self, tree: &DomTree) -> WidgetConfiguration {
        WidgetConfiguration::read(tree, self.host)
    }

    /// Label fragments as currently painted, `None` without a prompt
    pub fn rendered_label(&self, tree: &DomTree) -> Option<LabelParts> {
        Some(LabelParts {
            prefix: tree.text_content(self.refs.label_prefix?),
            warning_type: tree.text_content(self.refs.label_type?),
            suffix: self.refs.label_suffix.map(|span| tree.text_content(span)),
        })
    }

    /// Hiding attributes currently on the content wrapper
    pub fn hiding_attributes(&self, tree: &DomTree) -> Option<HidingAttributes> {
        self.refs.content.map(|content| HidingAttributes::read(tree, content))
    }

    // ------------------------------------------------------------------
    // Lifecycle hooks
    // ------------------------------------------------------------------

    /// Host became connected
    pub fn on_attach(&mut self, doc: &mut Document) {
        self.connected = true;
        match self.phase {
            InitPhase::Pending => {
                let frames_left = self.options.init_frames();
                tracing::debug!("Scheduling init of {:?} in {} frame(s)", self.host, frames_left);
                self.phase = InitPhase::Scheduled { frames_left };
                doc.request_animation_frame(self.host);
            }
            InitPhase::Scheduled { .. } => {}
            InitPhase::Initialized => {
                if !self.state.is_revealed() {
                    tracing::debug!("Restoring interactivity of {:?}", self.host);
                    self.listen();
                }
            }
        }
    }

    /// Host became disconnected. Configuration and state are kept.
    pub fn on_detach(&mut self, _doc: &mut Document) {
        self.connected = false;
        self.release();
        tracing::debug!("Content warning {:?} detached", self.host);
    }

    /// A requested animation frame arrived
    pub fn on_frame(&mut self, doc: &mut Document) {
        let InitPhase::Scheduled { frames_left } = self.phase else {
            return;
        };
        if frames_left > 1 {
            self.phase = InitPhase::Scheduled { frames_left: frames_left - 1 };
            doc.request_animation_frame(self.host);
            return;
        }

        self.phase = InitPhase::Initialized;
        if let Err(err) = self.initialize(doc) {
            tracing::warn!("Failed to initialize content warning {:?}: {}", self.host, err);
        }
    }

    /// An observed attribute changed
    pub fn on_config_changed(&mut self, doc: &mut Document, name: &str, old: Option<&str>, new: Option<&str>) {
        if !self.is_initialized() {
            tracing::trace!("Ignoring {} change on {:?} before init", name, self.host);
            return;
        }
        if self.state.is_revealed() {
            tracing::trace!("Ignoring {} change on {:?} after reveal", name, self.host);
            return;
        }
        if old == new {
            return;
        }
        let Some(key) = ConfigKey::from_attribute(name) else {
            return;
        };
        if let Err(err) = self.repaint(doc, key) {
            tracing::warn!("Failed to apply {} on {:?}: {}", name, self.host, err);
        }
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Pointer activation. Reveals when `target` is inside the prompt control.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        let Some(control) = self.listeners.click else {
            return false;
        };
        if !doc.tree().is_inclusive_ancestor(control, target) {
            return false;
        }
        self.reveal(doc)
    }

    /// Key press on the prompt surface. Only `Enter` reveals.
    pub fn handle_key_down(&mut self, doc: &mut Document, target: NodeId, key: &str) -> bool {
        let Some(surface) = self.listeners.key_down else {
            return false;
        };
        if key != "Enter" {
            tracing::trace!("Ignoring key {:?} on {:?}", key, self.host);
            return false;
        }
        if target != surface && !self.owns(doc, target) {
            return false;
        }
        // Keys only reach the widget through its focused tab stop
        let focused = doc.active_element();
        if focused != Some(surface) && !focused.is_some_and(|node| self.owns(doc, node)) {
            tracing::trace!("Enter on unfocused {:?} ignored", self.host);
            return false;
        }
        if cw_a11y::is_inert(doc.tree(), self.host) {
            tracing::trace!("Enter on inert {:?} ignored", self.host);
            return false;
        }
        self.reveal(doc)
    }

    fn owns(&self, doc: &Document, node: NodeId) -> bool {
        doc.tree().containing_shadow_root(node) == Some(self.shadow_root)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn initialize(&mut self, doc: &mut Document) -> Result<(), DomError> {
        let migrated = bridge::upgrade_properties(doc, self.host)?;
        let config = WidgetConfiguration::read(doc.tree(), self.host);

        self.refs = self.renderer.build(&mut doc.tree, self.shadow_root)?;
        self.renderer.paint_label(&mut doc.tree, &mut self.refs, &config.label())?;
        self.renderer.paint_layout(&mut doc.tree, &self.refs, config.layout)?;

        if self.state.is_revealed() {
            tracing::debug!("Content warning {:?} initialized revealed", self.host);
            return self.expose(doc);
        }

        self.apply_hiding(&mut doc.tree, config.hiding)?;
        doc.set_attribute(self.host, ROLE, AriaRole::Button.as_str())?;
        doc.set_attribute(self.host, "tabindex", "0")?;
        if self.connected {
            self.listen();
        }

        tracing::debug!(
            "Content warning {:?} initialized ({} hiding, {} early properties)",
            self.host,
            config.hiding.as_str(),
            migrated
        );
        Ok(())
    }

    fn repaint(&mut self, doc: &mut Document, key: ConfigKey) -> Result<(), DomError> {
        let config = WidgetConfiguration::read(doc.tree(), self.host);
        match key {
            ConfigKey::Type | ConfigKey::LabelPrefix | ConfigKey::LabelSuffix => {
                self.renderer.paint_label(&mut doc.tree, &mut self.refs, &config.label())
            }
            ConfigKey::Inline => self.renderer.paint_layout(&mut doc.tree, &self.refs, config.layout),
            ConfigKey::Blur => self.apply_hiding(&mut doc.tree, config.hiding),
            ConfigKey::Hidden => Ok(()),
        }
    }

    fn apply_hiding(&self, tree: &mut DomTree, mode: HidingMode) -> Result<(), DomError> {
        match self.refs.content {
            Some(content) => HidingAttributes::derive(mode, self.state).apply(tree, content),
            None => Ok(()),
        }
    }

    fn listen(&mut self) {
        if !self.is_initialized() || self.state.is_revealed() {
            return;
        }
        self.listeners = Listeners {
            click: self.refs.button,
            key_down: Some(self.host),
        };
    }

    pub(crate) fn release(&mut self) {
        self.listeners = Listeners::default();
    }
}
