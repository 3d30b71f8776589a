//! Nestable
//!
//! Drag-and-drop reordering and re-nesting for nested lists.
//!
//! The widget decorates a list (`<ol>` of `<li>` by default), then consumes
//! the host's pointer and drag events. While a drag is in progress a
//! placeholder stands in for the dragged item, a ghost clone follows the
//! pointer, and every relocation of the placeholder is smoothed with a
//! FLIP transform animation. Horizontal travel past a threshold nests the
//! placeholder under its previous sibling or lifts it out of its parent.
//!
//! # Example
//! ```rust,ignore
//! use nestable::{Config, Nestable, PointerEvent, Phase};
//! use std::time::Duration;
//!
//! let mut nestable = Nestable::new(&mut doc, Config::new("#outline"))?;
//! nestable.on(EventKind::Change, |event| println!("{event:?}"));
//!
//! nestable.handle_event(&mut doc, &PointerEvent::new(Phase::Press, handle, 10.0, 10.0));
//! nestable.handle_event(&mut doc, &PointerEvent::new(Phase::DragStart, handle, 10.0, 10.0));
//! // ... drag-over / drag-enter ...
//! nestable.handle_event(&mut doc, &PointerEvent::new(Phase::DragEnd, handle, 10.0, 50.0));
//! nestable.advance(&mut doc, Duration::from_millis(150));
//! ```

mod animator;
mod config;
mod decorate;
mod error;
mod events;
mod geometry;
mod hierarchy;
mod input;
mod nestable;
mod placeholder;
mod position;
mod session;
mod timer;

pub use animator::{FlipFirst, Ghost};
pub use config::{Axis, ClassNames, Config, RootRef};
pub use error::{NestableError, Result};
pub use events::{EventBus, EventKind, ListenerId, NestableEvent};
pub use geometry::{GeometrySnapshot, measure};
pub use hierarchy::Placement;
pub use input::{DropEffect, EventResponse, Phase, PointerEvent};
pub use nestable::{DragPhase, Nestable};
pub use placeholder::Placeholder;
pub use position::{Direction, Point, PositionTracker, Sample};
pub use timer::{TimerId, TimerQueue};

pub use nestable_dom as dom;
pub use nestable_layout as layout;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
