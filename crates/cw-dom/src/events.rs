//! DOM Events
//!
//! Custom events, listener bookkeeping and propagation paths.

use std::fmt;

use serde_json::Value;

use crate::{DomTree, NodeData, NodeId};

/// Custom event with a JSON detail payload
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent {
    pub event_type: String,
    pub target: NodeId,
    pub detail: Value,
    pub bubbles: bool,
    pub composed: bool,
    current_target: NodeId,
    propagation_stopped: bool,
}

impl CustomEvent {
    /// Non-bubbling, non-composed event with a null detail
    pub fn new(event_type: impl Into<String>, target: NodeId) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            detail: Value::Null,
            bubbles: false,
            composed: false,
            current_target: target,
            propagation_stopped: false,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }

    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    pub fn composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    /// Stop propagation after the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn set_current_target(&mut self, node: NodeId) {
        self.current_target = node;
    }
}

/// Listener registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&mut CustomEvent)>;

struct ListenerEntry {
    id: ListenerId,
    node: NodeId,
    event_type: String,
    callback: Callback,
}

/// Event listeners keyed by node and event type
#[derive(Default)]
pub struct EventListeners {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add(
        &mut self,
        node: NodeId,
        event_type: &str,
        callback: impl FnMut(&mut CustomEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(ListenerEntry {
            id,
            node,
            event_type: event_type.to_string(),
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke listeners along `path`; returns the number of invocations
    pub(crate) fn dispatch(&mut self, event: &mut CustomEvent, path: &[NodeId]) -> usize {
        let event_type = event.event_type.clone();
        let mut invoked = 0;
        for &node in path {
            event.set_current_target(node);
            for entry in self
                .entries
                .iter_mut()
                .filter(|e| e.node == node && e.event_type == event_type)
            {
                (entry.callback)(event);
                invoked += 1;
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        invoked
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl DomTree {
    /// Propagation path of an event dispatched at `target`.
    ///
    /// Bubbling events walk parents up to the document; a non-composed event
    /// stops at its shadow root, a composed one continues at the host.
    pub fn event_path(&self, target: NodeId, bubbles: bool, composed: bool) -> Vec<NodeId> {
        let mut path = vec![target];
        if !bubbles {
            return path;
        }
        let mut current = target;
        loop {
            let Some(node) = self.get(current) else {
                break;
            };
            let next = match &node.data {
                NodeData::ShadowRoot(shadow) if composed => shadow.host,
                NodeData::ShadowRoot(_) => break,
                _ => node.parent,
            };
            if !next.is_valid() {
                break;
            }
            path.push(next);
            current = next;
        }
        path
    }
}
