//! Computed style
//!
//! Inline declarations layered over a tiny user-agent stylesheet.

use nestable_dom::{Display, DomTree, EdgeSizes, Float, NodeId, Position, Translate};

/// Height of one line of text
pub const LINE_HEIGHT: f64 = 20.0;

/// User-agent indentation of `ol` / `ul`
pub const LIST_INDENT: f64 = 40.0;

/// Resolved style of one element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub position: Position,
    pub float: Float,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub margin: EdgeSizes,
    pub padding: EdgeSizes,
    pub transform: Translate,
}

impl ComputedStyle {
    /// `getComputedStyle(element)`; `None` for non-elements
    pub fn of(tree: &DomTree, id: NodeId) -> Option<Self> {
        let element = tree.element(id)?;
        let mut computed = Self::user_agent(&element.tag);
        let style = &element.style;

        if let Some(display) = style.display {
            computed.display = display;
        }
        if let Some(position) = style.position {
            computed.position = position;
        }
        if let Some(float) = style.float {
            computed.float = float;
        }
        if let Some(margin) = style.margin {
            computed.margin = margin;
        }
        if let Some(padding) = style.padding {
            computed.padding = padding;
        }
        if let Some(transform) = style.transform {
            computed.transform = transform;
        }
        computed.width = style.width;
        computed.height = style.height;
        computed.top = style.top;
        computed.left = style.left;
        Some(computed)
    }

    fn user_agent(tag: &str) -> Self {
        let mut style = Self::default();
        match tag {
            "ol" | "ul" => style.padding.left = LIST_INDENT,
            "head" | "script" | "style" | "template" => style.display = Display::None,
            _ => {}
        }
        style
    }

    /// Whether the element takes part in normal flow
    pub fn in_flow(&self) -> bool {
        self.display != Display::None && self.position != Position::Absolute
    }
}
