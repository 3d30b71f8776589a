//! Geometry Service
//!
//! Page-relative measurements of elements, taken fresh from layout on
//! every call.

use nestable_dom::{Document, EdgeSizes, Float, NodeId};
use nestable_layout::{bounding_client_rect, computed_style};

use crate::Result;

/// Page-relative box of an element at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometrySnapshot {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    /// Computed margins; zero unless requested
    pub margin: EdgeSizes,
    /// Computed float; `none` unless requested
    pub float: Float,
}

impl GeometrySnapshot {
    /// Offset between the top-left corners of two snapshots
    pub fn offset_from(&self, other: &GeometrySnapshot) -> (f64, f64) {
        (self.left - other.left, self.top - other.top)
    }
}

/// Measure `node`: its viewport rect shifted by the current scroll offset
///
/// With `include_margins` the computed margins and float are captured too.
pub fn measure(doc: &Document, node: NodeId, include_margins: bool) -> Result<GeometrySnapshot> {
    let rect = bounding_client_rect(doc, node)?;
    let (sx, sy) = (doc.scroll_x(), doc.scroll_y());

    let mut snapshot = GeometrySnapshot {
        width: rect.width,
        height: rect.height,
        left: rect.left() + sx,
        top: rect.top() + sy,
        right: rect.right() + sx,
        bottom: rect.bottom() + sy,
        ..Default::default()
    };

    if include_margins {
        let style = computed_style(doc, node)?;
        snapshot.margin = style.margin;
        snapshot.float = style.float;
    }
    Ok(snapshot)
}
