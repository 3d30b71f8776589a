//! Position Tracker
//!
//! Turns raw page coordinates into a displacement from the drag origin and
//! a per-axis direction of travel since the previous sample.

use crate::Axis;

/// A point in page coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-axis movement direction, each component in {-1, 0, +1}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Direction {
    pub x: i8,
    pub y: i8,
}

impl Direction {
    fn between(from: f64, to: f64) -> i8 {
        if to > from {
            1
        } else if to < from {
            -1
        } else {
            0
        }
    }
}

/// Result of one tracker update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    /// Displacement including the committed base transform
    pub position: Point,
    pub direction: Direction,
    /// Raw page coordinates
    pub mouse: Point,
}

/// Running displacement tracker for one drag session
#[derive(Debug, Clone)]
pub struct PositionTracker {
    axis: Option<Axis>,
    origin: Point,
    base: Point,
    position: Point,
    direction: Direction,
    mouse: Point,
}

impl PositionTracker {
    /// Start tracking from `origin`
    pub fn new(origin: Point, axis: Option<Axis>) -> Self {
        Self {
            axis,
            origin,
            base: Point::default(),
            position: Point::default(),
            direction: Direction::default(),
            mouse: origin,
        }
    }

    /// Record a new pointer sample
    pub fn update(&mut self, page: Point) -> Sample {
        let x = if self.axis == Some(Axis::Y) {
            0.0
        } else {
            self.base.x + (page.x - self.origin.x)
        };
        let y = if self.axis == Some(Axis::X) {
            0.0
        } else {
            self.base.y + (page.y - self.origin.y)
        };

        self.direction = Direction {
            x: Direction::between(self.position.x, x),
            y: Direction::between(self.position.y, y),
        };
        self.position = Point::new(x, y);
        self.mouse = page;

        tracing::trace!(x, y, dx = self.direction.x, dy = self.direction.y, "pointer sample");
        self.sample()
    }

    /// Make the current position the base of later updates
    pub fn commit(&mut self) {
        self.base = self.position;
    }

    pub fn sample(&self) -> Sample {
        Sample {
            position: self.position,
            direction: self.direction,
            mouse: self.mouse,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn mouse(&self) -> Point {
        self.mouse
    }

    /// Whether the pointer has travelled further horizontally than vertically
    pub fn is_horizontal(&self) -> bool {
        (self.mouse.x - self.origin.x).abs() > (self.mouse.y - self.origin.y).abs()
    }
}
