//! Widget events
//!
//! Synchronous publish/subscribe. Listeners run in subscription order on
//! the thread that handles the host event.

use std::fmt;

use nestable_dom::NodeId;

use crate::Placement;

/// Event kinds a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Init,
    Destroy,
    Enable,
    Disable,
    Start,
    Reorder,
    Nest,
    Unnest,
    Stop,
    Change,
    Collapse,
    Expand,
}

/// Event payload
#[derive(Debug, Clone, PartialEq)]
pub enum NestableEvent {
    /// Decoration finished
    Init { root: NodeId, items: usize },
    Destroy { root: NodeId },
    Enable,
    Disable,
    /// A drag session began on `item`
    Start { item: NodeId },
    /// The placeholder moved next to `target`
    Reorder {
        item: NodeId,
        target: NodeId,
        placement: Placement,
    },
    /// The placeholder became a child of `parent`
    Nest { item: NodeId, parent: NodeId },
    /// The placeholder left `parent`
    Unnest { item: NodeId, parent: NodeId },
    /// The drag session ended
    Stop { item: NodeId },
    /// The dragged item ended up in a different slot; `parent` is its new
    /// parent item, `None` at the top level
    Change { item: NodeId, parent: Option<NodeId> },
    Collapse { item: NodeId },
    Expand { item: NodeId },
}

impl NestableEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NestableEvent::Init { .. } => EventKind::Init,
            NestableEvent::Destroy { .. } => EventKind::Destroy,
            NestableEvent::Enable => EventKind::Enable,
            NestableEvent::Disable => EventKind::Disable,
            NestableEvent::Start { .. } => EventKind::Start,
            NestableEvent::Reorder { .. } => EventKind::Reorder,
            NestableEvent::Nest { .. } => EventKind::Nest,
            NestableEvent::Unnest { .. } => EventKind::Unnest,
            NestableEvent::Stop { .. } => EventKind::Stop,
            NestableEvent::Change { .. } => EventKind::Change,
            NestableEvent::Collapse { .. } => EventKind::Collapse,
            NestableEvent::Expand { .. } => EventKind::Expand,
        }
    }
}

/// Subscription handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener callback
pub type Listener = Box<dyn FnMut(&NestableEvent)>;

/// Event bus
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one kind of event
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&NestableEvent) + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, kind, Box::new(listener)));
        id
    }

    /// Unsubscribe; returns whether the listener existed
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener of its kind
    pub fn emit(&mut self, event: NestableEvent) {
        let kind = event.kind();
        tracing::trace!(?kind, "emit");
        for (_, _, listener) in self.listeners.iter_mut().filter(|(_, k, _)| *k == kind) {
            listener(&event);
        }
    }

    /// Number of listeners for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(_, k, _)| *k == kind).count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
