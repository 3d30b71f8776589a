//! Layout Tree

use std::collections::HashMap;

use nestable_dom::{DomRect, NodeId, Translate};

use crate::BoxDimensions;

/// Boxes produced by one layout pass, keyed by element
#[derive(Debug, Default)]
pub struct LayoutTree {
    boxes: HashMap<NodeId, LayoutBox>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, layout_box: LayoutBox) {
        self.boxes.insert(layout_box.node, layout_box);
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutBox> {
        self.boxes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// A box in the layout tree
#[derive(Debug, Clone, Copy)]
pub struct LayoutBox {
    pub node: NodeId,
    pub dimensions: BoxDimensions,
    /// Sum of the element's own and its ancestors' translations
    pub translate: Translate,
}

impl LayoutBox {
    /// Border box in document coordinates, transforms applied
    pub fn document_rect(&self) -> DomRect {
        self.dimensions
            .border_box()
            .translate(self.translate.x, self.translate.y)
    }
}
