//! Placeholder Manager
//!
//! The placeholder holds the dragged item's slot while the item itself is
//! hidden. All hierarchy moves during a drag act on the placeholder; the
//! item is swapped back in when the session ends.

use nestable_dom::{Display, Document, DomError, NodeId};

use crate::{Config, Result, measure};

/// Stand-in node for the drag source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    node: NodeId,
    source: NodeId,
}

impl Placeholder {
    /// Insert a placeholder right before `source` and hide `source`
    ///
    /// The placeholder copies the source's height, float and margins so the
    /// surrounding layout does not shift.
    pub fn insert(doc: &mut Document, config: &Config, source: NodeId) -> Result<Self> {
        let rect = measure(doc, source, true)?;
        let parent = doc.tree.parent(source).ok_or(DomError::NotFound(source))?;

        let node = doc
            .tree
            .create_element_with_classes(&config.item_name, &[&config.classes.placeholder]);
        doc.tree.insert_before(parent, node, Some(source))?;

        if let Some(style) = doc.tree.style_mut(node) {
            style.height = Some(rect.height);
            style.float = Some(rect.float);
            style.margin = Some(rect.margin);
        }
        if let Some(style) = doc.tree.style_mut(source) {
            style.display = Some(Display::None);
        }

        tracing::debug!(%source, placeholder = %node, height = rect.height, "placeholder inserted");
        Ok(Self { node, source })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Swap the source back in at the placeholder's position and show it
    pub fn remove(self, doc: &mut Document) -> Result<()> {
        if let Some(style) = doc.tree.style_mut(self.source) {
            style.display = None;
        }
        match doc.tree.parent(self.node) {
            Some(parent) => doc.tree.replace_child(parent, self.source, self.node)?,
            None => tracing::debug!(placeholder = %self.node, "placeholder already detached"),
        }
        doc.tree.release(self.node);
        tracing::debug!(source = %self.source, "placeholder removed");
        Ok(())
    }
}
