//! Nestable Layout
//!
//! CSS box model, block layout and the geometry reads the widget performs
//! against the host document (`getBoundingClientRect`, `getComputedStyle`,
//! `offsetHeight`).
//!
//! Layout is recomputed on every read, so a read always reflects the
//! current tree and two reads with no mutation in between agree.

mod block;
mod box_model;
mod computed;
mod layout_tree;

pub use block::BlockFormattingContext;
pub use box_model::BoxDimensions;
pub use computed::{ComputedStyle, LINE_HEIGHT, LIST_INDENT};
pub use layout_tree::{LayoutBox, LayoutTree};

use nestable_dom::{Document, DomRect, NodeId, Translate};

/// Result type for geometry reads
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Geometry read errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("node {0} is not attached to the document")]
    Detached(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
}

/// Perform layout on the whole document
pub fn layout_document(doc: &Document) -> LayoutTree {
    let mut tree = LayoutTree::new();
    let mut bfc = BlockFormattingContext::new(0.0, doc.viewport_width(), 0.0, Translate::default());
    bfc.layout_children(doc, &mut tree, doc.tree.root());
    tracing::trace!(boxes = tree.len(), "layout pass");
    tree
}

fn check_element(doc: &Document, id: NodeId) -> LayoutResult<()> {
    if doc.tree.get(id).is_none() {
        return Err(LayoutError::NotFound(id));
    }
    if !doc.tree.is_element(id) {
        return Err(LayoutError::NotAnElement(id));
    }
    if !doc.is_connected(id) {
        return Err(LayoutError::Detached(id));
    }
    Ok(())
}

/// `element.getBoundingClientRect()`: border box relative to the viewport
///
/// Elements that are not rendered (`display: none` on themselves or an
/// ancestor) report an all-zero rect.
pub fn bounding_client_rect(doc: &Document, id: NodeId) -> LayoutResult<DomRect> {
    check_element(doc, id)?;
    let tree = layout_document(doc);
    Ok(match tree.get(id) {
        Some(layout_box) => layout_box
            .document_rect()
            .translate(-doc.scroll_x(), -doc.scroll_y()),
        None => DomRect::default(),
    })
}

/// `getComputedStyle(element)`
pub fn computed_style(doc: &Document, id: NodeId) -> LayoutResult<ComputedStyle> {
    check_element(doc, id)?;
    ComputedStyle::of(&doc.tree, id).ok_or(LayoutError::NotAnElement(id))
}

/// `element.offsetHeight`; reading it forces a layout pass
pub fn offset_height(doc: &Document, id: NodeId) -> LayoutResult<f64> {
    check_element(doc, id)?;
    let tree = layout_document(doc);
    Ok(tree
        .get(id)
        .map_or(0.0, |b| b.dimensions.border_box().height))
}
