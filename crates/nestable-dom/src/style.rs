//! Inline style
//!
//! The subset of `element.style` the widget reads and writes: display,
//! positioning, box sizes, margins, float, transform and transition.
//! Unset properties are `None` so computed style can fall back to the
//! user-agent defaults.

use std::fmt;

/// `display`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Block,
    None,
}

/// `position`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
        }
    }
}

/// `float`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

impl Float {
    pub fn as_str(self) -> &'static str {
        match self {
            Float::None => "none",
            Float::Left => "left",
            Float::Right => "right",
        }
    }
}

/// Edge sizes (top, right, bottom, left)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeSizes {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same size on every edge
    pub fn all(size: f64) -> Self {
        Self::new(size, size, size, size)
    }

    /// Vertical / horizontal pair
    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// left + right
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl fmt::Display for EdgeSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// 2D translation applied through `translate3d(x, y, 0)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

impl Translate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// `transition: transform <duration> [<easing> <delay>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub duration_ms: u64,
    pub easing: Option<String>,
    pub delay_ms: u64,
}

impl Transition {
    /// Linear transition without delay
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms, easing: None, delay_ms: 0 }
    }

    pub fn with_easing(duration_ms: u64, easing: &str) -> Self {
        Self { duration_ms, easing: Some(easing.to_string()), delay_ms: 0 }
    }
}

/// Inline style declarations of one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    pub display: Option<Display>,
    pub position: Option<Position>,
    pub float: Option<Float>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub margin: Option<EdgeSizes>,
    pub padding: Option<EdgeSizes>,
    pub transform: Option<Translate>,
    pub transition: Option<Transition>,
}

impl InlineStyle {
    /// True when nothing is declared
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set `transform` and `transition` together
    pub fn set_transform(&mut self, translate: Translate, transition_ms: u64) {
        self.transform = Some(translate);
        self.transition = Some(Transition::new(transition_ms));
    }

    /// Drop `transform` and `transition`
    pub fn clear_transform(&mut self) {
        self.transform = None;
        self.transition = None;
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut decls: Vec<String> = Vec::new();
        if let Some(display) = self.display {
            let value = match display {
                Display::Block => "block",
                Display::None => "none",
            };
            decls.push(format!("display: {value}"));
        }
        if let Some(position) = self.position {
            decls.push(format!("position: {}", position.as_str()));
        }
        if let Some(float) = self.float {
            decls.push(format!("float: {}", float.as_str()));
        }
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("top", self.top),
            ("left", self.left),
        ] {
            if let Some(v) = value {
                decls.push(format!("{name}: {v}px"));
            }
        }
        if let Some(margin) = self.margin {
            decls.push(format!("margin: {margin}"));
        }
        if let Some(padding) = self.padding {
            decls.push(format!("padding: {padding}"));
        }
        if let Some(t) = self.transform {
            decls.push(format!("transform: translate3d({}px, {}px, 0)", t.x, t.y));
        }
        if let Some(transition) = &self.transition {
            let mut value = format!("transform {}ms", transition.duration_ms);
            if let Some(easing) = &transition.easing {
                value.push_str(&format!(" {easing} {}ms", transition.delay_ms));
            }
            decls.push(format!("transition: {value}"));
        }
        for decl in decls {
            write!(f, "{decl}; ")?;
        }
        Ok(())
    }
}
