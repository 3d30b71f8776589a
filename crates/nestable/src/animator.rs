//! Ghost & Animator
//!
//! The ghost is a deep clone of the dragged item that follows the pointer.
//! The animator smooths each placeholder relocation with FLIP: measure the
//! first rects, move, measure the last rects, invert with a transform and
//! play it back to zero with a transition.

use std::collections::HashMap;
use std::time::Duration;

use nestable_dom::{Document, NodeId, Position, Transition, Translate};
use nestable_layout::offset_height;

use crate::timer::Task;
use crate::{Config, GeometrySnapshot, Point, Result, TimerId, TimerQueue, measure};

/// Pointer-following clone of the drag source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    node: NodeId,
}

impl Ghost {
    /// Clone `source`, pin the clone over the source's rect and attach it to
    /// the body
    pub fn create(doc: &mut Document, config: &Config, source: NodeId) -> Result<Self> {
        let rect = measure(doc, source, true)?;
        let node = doc.tree.clone_node(source, true)?;
        doc.tree.add_class(node, &config.classes.clone);

        if let Some(style) = doc.tree.style_mut(node) {
            style.clear_transform();
            style.position = Some(Position::Absolute);
            style.width = Some(rect.width);
            style.height = Some(rect.height);
            style.top = Some(rect.top);
            style.left = Some(rect.left);
        }
        let body = doc.body();
        doc.tree.append_child(body, node)?;

        tracing::debug!(%source, ghost = %node, "ghost created");
        Ok(Self { node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Move the ghost to `position` immediately
    pub fn follow(&self, doc: &mut Document, position: Point) {
        if let Some(style) = doc.tree.style_mut(self.node) {
            style.set_transform(Translate::new(position.x, position.y), 0);
        }
    }

    /// Send the ghost onto the placeholder's rect over `duration_ms`
    pub fn settle(
        &self,
        doc: &mut Document,
        placeholder: NodeId,
        position: Point,
        duration_ms: u64,
    ) -> Result<()> {
        let ghost = measure(doc, self.node, false)?;
        let place = measure(doc, placeholder, false)?;
        let (dx, dy) = ghost.offset_from(&place);

        if let Some(style) = doc.tree.style_mut(self.node) {
            style.transform = Some(Translate::new(position.x - dx, position.y - dy));
            style.transition = Some(Transition::with_easing(duration_ms, "ease"));
        }
        Ok(())
    }

    /// Take the ghost out of the document and free its nodes
    pub fn remove(self, doc: &mut Document) {
        doc.tree.release(self.node);
        tracing::debug!(ghost = %self.node, "ghost removed");
    }
}

/// Rects measured before a relocation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlipFirst {
    pub placeholder: GeometrySnapshot,
    /// Target rect; `None` when the placeholder itself is the target
    pub target: Option<GeometrySnapshot>,
}

/// FLIP animator with one completion timer per animated element
#[derive(Debug, Default)]
pub(crate) struct Animator {
    duration_ms: u64,
    pending: HashMap<NodeId, TimerId>,
}

impl Animator {
    pub(crate) fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            pending: HashMap::new(),
        }
    }

    /// Whether `node` still has an animation in flight
    pub(crate) fn is_pending(&self, node: NodeId) -> bool {
        self.pending.contains_key(&node)
    }

    /// Animate `placeholder` (and `target`, when it is another element) from
    /// the `first` rects to where they are now
    pub(crate) fn flip(
        &mut self,
        doc: &mut Document,
        timers: &mut TimerQueue<Task>,
        placeholder: NodeId,
        target: NodeId,
        first: &FlipFirst,
    ) -> Result<()> {
        let last_place = measure(doc, placeholder, false)?;
        let target_move = match first.target {
            Some(before) if target != placeholder => {
                let last = measure(doc, target, false)?;
                Some(before.offset_from(&last))
            }
            _ => None,
        };
        let place_move = first.placeholder.offset_from(&last_place);

        // invert
        set_translate(doc, placeholder, place_move, 0);
        if let Some(delta) = target_move {
            set_translate(doc, target, delta, 0);
        }

        let height = offset_height(doc, target)?;
        tracing::trace!(%target, height, "forced layout");

        // play
        set_translate(doc, placeholder, (0.0, 0.0), self.duration_ms);
        if target_move.is_some() {
            set_translate(doc, target, (0.0, 0.0), self.duration_ms);
        }

        if let Some(previous) = self.pending.remove(&target) {
            timers.cancel(previous);
        }
        let timer = timers.schedule(
            Duration::from_millis(self.duration_ms),
            Task::ClearAnimation(target),
        );
        self.pending.insert(target, timer);
        Ok(())
    }

    /// Completion timer fired: clear the inline transform unless `timer` was
    /// superseded
    pub(crate) fn complete(&mut self, doc: &mut Document, node: NodeId, timer: TimerId) -> bool {
        if self.pending.get(&node) != Some(&timer) {
            tracing::trace!(%node, timer = timer.raw(), "stale animation timer");
            return false;
        }
        self.pending.remove(&node);
        if let Some(style) = doc.tree.style_mut(node) {
            style.clear_transform();
        }
        true
    }

    /// Cancel the pending animation of `node`, leaving its style as is
    pub(crate) fn forget(&mut self, timers: &mut TimerQueue<Task>, node: NodeId) {
        if let Some(timer) = self.pending.remove(&node) {
            timers.cancel(timer);
        }
    }

    /// Cancel every animation and clear the transforms it left behind
    pub(crate) fn cancel_all(&mut self, doc: &mut Document, timers: &mut TimerQueue<Task>) {
        for (node, timer) in self.pending.drain() {
            timers.cancel(timer);
            if let Some(style) = doc.tree.style_mut(node) {
                style.clear_transform();
            }
        }
    }
}

fn set_translate(doc: &mut Document, node: NodeId, (x, y): (f64, f64), duration_ms: u64) {
    if let Some(style) = doc.tree.style_mut(node) {
        style.set_transform(Translate::new(x, y), duration_ms);
    }
}
