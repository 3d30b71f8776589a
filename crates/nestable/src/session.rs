//! Drag session state

use nestable_dom::{DomTree, NodeId};

use crate::{Ghost, GeometrySnapshot, Placeholder, PositionTracker, TimerId};

/// Where a node sits in the tree: its parent and previous element sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub parent: Option<NodeId>,
    pub prev: Option<NodeId>,
}

impl Slot {
    pub(crate) fn of(tree: &DomTree, node: NodeId) -> Self {
        Self {
            parent: tree.parent(node),
            prev: tree.prev_element_sibling(node),
        }
    }
}

/// Everything that exists only while one item is being dragged
#[derive(Debug)]
pub(crate) struct DragSession {
    pub source: NodeId,
    pub ghost: Ghost,
    pub placeholder: Option<Placeholder>,
    pub tracker: PositionTracker,
    /// Horizontal anchor the nesting threshold is measured from
    pub change_x: f64,
    /// Source rect at press time, margins included
    pub source_rect: GeometrySnapshot,
    pub origin_slot: Slot,
}

impl DragSession {
    /// Horizontal travel since the last nest / un-nest
    pub(crate) fn accumulated_change(&self) -> f64 {
        self.tracker.mouse().x - self.change_x
    }
}

/// Drag state machine
#[derive(Debug, Default)]
pub(crate) enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
    /// Ghost is travelling home; teardown runs when `timer` fires
    Settling { session: DragSession, timer: TimerId },
}

impl DragState {
    pub(crate) fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) | DragState::Settling { session, .. } => Some(session),
        }
    }

    pub(crate) fn phase(&self) -> crate::DragPhase {
        match self {
            DragState::Idle => crate::DragPhase::Idle,
            DragState::Dragging(_) => crate::DragPhase::Dragging,
            DragState::Settling { .. } => crate::DragPhase::Settling,
        }
    }
}
