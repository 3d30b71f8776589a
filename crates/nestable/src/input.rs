//! Host input events
//!
//! What the host feeds into the widget and what it gets back.

use nestable_dom::NodeId;

use crate::Point;

/// Phase of the drag gesture a host event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// mousedown / touchstart
    Press,
    DragStart,
    DragOver,
    DragEnter,
    Drop,
    DragEnd,
    /// mouseup / touchend
    Release,
    Click,
}

/// Pointer or drag event delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: Phase,
    pub target: NodeId,
    pub page_x: f64,
    pub page_y: f64,
    /// Active touch points, first one wins
    pub touches: Vec<Point>,
}

impl PointerEvent {
    pub fn new(phase: Phase, target: NodeId, page_x: f64, page_y: f64) -> Self {
        Self {
            phase,
            target,
            page_x,
            page_y,
            touches: Vec::new(),
        }
    }

    /// Add a touch point
    pub fn with_touch(mut self, x: f64, y: f64) -> Self {
        self.touches.push(Point::new(x, y));
        self
    }

    /// Page coordinates: the first touch point if any, else the pointer
    pub fn page(&self) -> Point {
        self.touches
            .first()
            .copied()
            .unwrap_or(Point::new(self.page_x, self.page_y))
    }
}

/// `dataTransfer.dropEffect` / `effectAllowed`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

/// What the host should do with the event after the widget handled it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Call `preventDefault()`
    pub default_prevented: bool,
    pub drop_effect: Option<DropEffect>,
    pub effect_allowed: Option<DropEffect>,
    /// `dataTransfer.setData(format, data)`
    pub transfer_data: Option<(String, String)>,
    /// Replace the native drag image with a blank one
    pub blank_drag_image: bool,
}

impl EventResponse {
    pub(crate) fn prevented() -> Self {
        Self {
            default_prevented: true,
            ..Default::default()
        }
    }
}
