//! CSS Box Model

use nestable_dom::{DomRect, EdgeSizes};

/// Box dimensions
///
/// Borders are not modelled; the border box equals the padding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxDimensions {
    pub content: DomRect,
    pub padding: EdgeSizes,
    pub margin: EdgeSizes,
}

impl BoxDimensions {
    /// Get the area covered by content + padding
    pub fn padding_box(&self) -> DomRect {
        DomRect {
            x: self.content.x - self.padding.left,
            y: self.content.y - self.padding.top,
            width: self.content.width + self.padding.horizontal(),
            height: self.content.height + self.padding.vertical(),
        }
    }

    /// Get the area covered by content + padding + border
    pub fn border_box(&self) -> DomRect {
        self.padding_box()
    }

    /// Get the area covered by content + padding + border + margin
    pub fn margin_box(&self) -> DomRect {
        let border = self.border_box();
        DomRect {
            x: border.x - self.margin.left,
            y: border.y - self.margin.top,
            width: border.width + self.margin.horizontal(),
            height: border.height + self.margin.vertical(),
        }
    }
}
