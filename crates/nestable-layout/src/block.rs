//! Block Layout
//!
//! Block formatting context: boxes stack vertically and expand to fill
//! their container's width. Margins do not collapse. Non-blank text runs
//! take one line each. Absolutely positioned boxes are placed at their
//! `top`/`left` in document coordinates and take no room in the flow.

use nestable_dom::{Display, Document, DomRect, NodeId, Position, Translate};

use crate::computed::{ComputedStyle, LINE_HEIGHT};
use crate::{BoxDimensions, LayoutBox, LayoutTree};

/// Block formatting context
pub struct BlockFormattingContext {
    container_x: f64,
    container_width: f64,
    /// Where the next block will be placed
    cursor_y: f64,
    /// Accumulated ancestor translation
    translate: Translate,
}

impl BlockFormattingContext {
    /// Create a new block formatting context
    pub fn new(container_x: f64, container_width: f64, start_y: f64, translate: Translate) -> Self {
        Self {
            container_x,
            container_width,
            cursor_y: start_y,
            translate,
        }
    }

    /// Current Y position
    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    /// Lay out every child of `parent` inside this context
    pub fn layout_children(&mut self, doc: &Document, tree: &mut LayoutTree, parent: NodeId) {
        for child in doc.tree.children(parent) {
            let Some(node) = doc.tree.get(child) else {
                continue;
            };
            if let Some(text) = node.as_text() {
                if !text.trim().is_empty() {
                    self.cursor_y += LINE_HEIGHT;
                }
                continue;
            }
            let Some(style) = ComputedStyle::of(&doc.tree, child) else {
                continue;
            };
            match (style.display, style.position) {
                (Display::None, _) => {}
                (_, Position::Absolute) => self.layout_absolute(doc, tree, child, &style),
                _ => self.layout_block(doc, tree, child, &style),
            }
        }
    }

    /// Layout a block-level box
    fn layout_block(
        &mut self,
        doc: &Document,
        tree: &mut LayoutTree,
        id: NodeId,
        style: &ComputedStyle,
    ) {
        let (margin, padding) = (style.margin, style.padding);
        let content_width = style
            .width
            .unwrap_or(self.container_width - margin.horizontal() - padding.horizontal())
            .max(0.0);
        let content_x = self.container_x + margin.left + padding.left;
        let content_y = self.cursor_y + margin.top + padding.top;

        let height = self.layout_contents(doc, tree, id, style, content_x, content_y, content_width);
        self.cursor_y = content_y + height + padding.bottom + margin.bottom;
    }

    /// Layout an absolutely positioned box; the flow cursor does not move
    fn layout_absolute(
        &mut self,
        doc: &Document,
        tree: &mut LayoutTree,
        id: NodeId,
        style: &ComputedStyle,
    ) {
        let (margin, padding) = (style.margin, style.padding);
        let origin_x = style.left.unwrap_or(self.container_x);
        let origin_y = style.top.unwrap_or(self.cursor_y);
        let content_width = style
            .width
            .unwrap_or(self.container_width - margin.horizontal() - padding.horizontal())
            .max(0.0);
        let content_x = origin_x + margin.left + padding.left;
        let content_y = origin_y + margin.top + padding.top;

        self.layout_contents(doc, tree, id, style, content_x, content_y, content_width);
    }

    /// Lay out children in a nested context, record the box, return content height
    #[allow(clippy::too_many_arguments)]
    fn layout_contents(
        &self,
        doc: &Document,
        tree: &mut LayoutTree,
        id: NodeId,
        style: &ComputedStyle,
        content_x: f64,
        content_y: f64,
        content_width: f64,
    ) -> f64 {
        let translate = Translate::new(
            self.translate.x + style.transform.x,
            self.translate.y + style.transform.y,
        );

        let mut child_bfc =
            BlockFormattingContext::new(content_x, content_width, content_y, translate);
        child_bfc.layout_children(doc, tree, id);

        let content_height = style
            .height
            .unwrap_or(child_bfc.cursor_y - content_y)
            .max(0.0);

        tree.insert(LayoutBox {
            node: id,
            dimensions: BoxDimensions {
                content: DomRect::from_xywh(content_x, content_y, content_width, content_height),
                padding: style.padding,
                margin: style.margin,
            },
            translate,
        });
        content_height
    }
}
