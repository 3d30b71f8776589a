//! Nestable widget
//!
//! Owns the configuration, the decoration of the root list, the drag state
//! machine, the animation timers and the event bus. The host feeds it
//! pointer/drag events through [`Nestable::handle_event`] and moves time
//! forward with [`Nestable::advance`].

use std::time::Duration;

use nestable_dom::{Display, Document, NodeId};

use crate::animator::Animator;
use crate::decorate::{self, Decoration};
use crate::hierarchy;
use crate::session::{DragSession, DragState, Slot};
use crate::timer::Task;
use crate::{
    Config, DropEffect, EventBus, EventKind, EventResponse, FlipFirst, Ghost, ListenerId,
    NestableEvent, Phase, Placeholder, PointerEvent, PositionTracker, Result, TimerQueue, measure,
};

/// Where the drag state machine is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    /// The ghost is travelling onto the placeholder
    Settling,
}

/// Drag-and-drop nestable list
#[derive(Debug)]
pub struct Nestable {
    config: Config,
    root: NodeId,
    decoration: Option<Decoration>,
    enabled: bool,
    state: DragState,
    animator: Animator,
    timers: TimerQueue<Task>,
    events: EventBus,
}

impl Nestable {
    /// Validate `config`, decorate the root list and start listening
    pub fn new(doc: &mut Document, config: Config) -> Result<Self> {
        config.validate()?;
        let root = config.resolve_root(doc)?;
        let mut nestable = Self {
            animator: Animator::new(config.animation),
            config,
            root,
            decoration: None,
            enabled: false,
            state: DragState::Idle,
            timers: TimerQueue::new(),
            events: EventBus::new(),
        };
        nestable.init(doc)?;
        Ok(nestable)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Decorate the list and enable dragging; no-op when already initialised
    pub fn init(&mut self, doc: &mut Document) -> Result<()> {
        if self.decoration.is_some() {
            return Ok(());
        }
        self.root = self.config.resolve_root(doc)?;
        let decoration = decorate::decorate(doc, &self.config, self.root)?;
        let items = decoration.items.len();
        self.decoration = Some(decoration);

        tracing::info!(root = %self.root, items, "nestable initialised");
        self.events.emit(NestableEvent::Init {
            root: self.root,
            items,
        });
        self.enable();
        Ok(())
    }

    /// Finish any drag, stop listening and undo the decoration
    pub fn destroy(&mut self, doc: &mut Document) -> Result<()> {
        let Some(decoration) = self.decoration.take() else {
            return Ok(());
        };
        self.disable(doc);
        self.animator.cancel_all(doc, &mut self.timers);
        self.timers.clear();
        decorate::undecorate(doc, &self.config, self.root, &decoration)?;

        tracing::info!(root = %self.root, "nestable destroyed");
        self.events.emit(NestableEvent::Destroy { root: self.root });
        Ok(())
    }

    /// Destroy, then initialise again with the same configuration
    pub fn reinit(&mut self, doc: &mut Document) -> Result<()> {
        self.destroy(doc)?;
        self.init(doc)
    }

    /// Resume event processing
    pub fn enable(&mut self) {
        if self.enabled || self.decoration.is_none() {
            return;
        }
        self.enabled = true;
        tracing::debug!("enabled");
        self.events.emit(NestableEvent::Enable);
    }

    /// Stop event processing; a drag in progress is torn down immediately
    pub fn disable(&mut self, doc: &mut Document) {
        if !self.enabled {
            return;
        }
        self.finish_session(doc);
        self.enabled = false;
        tracing::debug!("disabled");
        self.events.emit(NestableEvent::Disable);
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&NestableEvent) + 'static,
    {
        self.events.on(kind, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Decorated items in document order at init time
    pub fn items(&self) -> &[NodeId] {
        self.decoration
            .as_ref()
            .map(|d| d.items.as_slice())
            .unwrap_or_default()
    }

    /// Items that can be dragged
    pub fn draggable_items(&self) -> &[NodeId] {
        self.decoration
            .as_ref()
            .map(|d| d.draggable.as_slice())
            .unwrap_or_default()
    }

    pub fn is_initialised(&self) -> bool {
        self.decoration.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    /// Item being dragged
    pub fn drag_source(&self) -> Option<NodeId> {
        self.state.session().map(|s| s.source)
    }

    pub fn placeholder(&self) -> Option<NodeId> {
        self.state
            .session()
            .and_then(|s| s.placeholder)
            .map(|p| p.node())
    }

    pub fn ghost(&self) -> Option<NodeId> {
        self.state.session().map(|s| s.ghost.node())
    }

    /// Horizontal travel since the last nest / un-nest
    pub fn accumulated_change(&self) -> Option<f64> {
        self.state.session().map(DragSession::accumulated_change)
    }

    /// Whether `node` has a relocation animation in flight
    pub fn is_animating(&self, node: NodeId) -> bool {
        self.animator.is_pending(node)
    }

    /// Time until the next pending timer fires
    pub fn next_timer(&self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    // ------------------------------------------------------------------
    // Events and time
    // ------------------------------------------------------------------

    /// Process one host event
    ///
    /// Failures inside a step are logged and the step is skipped; the host
    /// always gets a response.
    pub fn handle_event(&mut self, doc: &mut Document, event: &PointerEvent) -> EventResponse {
        if !self.enabled {
            return EventResponse::default();
        }

        let mut response = EventResponse::default();
        let outcome = match event.phase {
            Phase::Press => self.press(doc, event),
            Phase::DragStart => {
                response = EventResponse {
                    effect_allowed: Some(DropEffect::Copy),
                    transfer_data: Some(("text/html".to_string(), String::new())),
                    blank_drag_image: true,
                    ..Default::default()
                };
                self.drag_start(doc)
            }
            Phase::DragOver => {
                response = EventResponse::prevented();
                let inside = doc.tree.contains(self.root, event.target);
                response.drop_effect = Some(if inside { DropEffect::Copy } else { DropEffect::None });
                self.drag_over(doc, event)
            }
            Phase::DragEnter => self.drag_enter(doc, event).map(|entered| {
                if entered {
                    response = EventResponse::prevented();
                }
            }),
            Phase::Drop => {
                response = EventResponse::prevented();
                Ok(())
            }
            Phase::DragEnd => self.stop(doc, false),
            Phase::Release => self.stop(doc, true),
            Phase::Click => {
                self.click(doc, event);
                Ok(())
            }
        };

        if let Err(err) = outcome {
            tracing::debug!(phase = ?event.phase, error = %err, "event step skipped");
        }
        response
    }

    /// Move the clock forward by `elapsed` and run every timer that came due
    pub fn advance(&mut self, doc: &mut Document, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some((id, task)) = self.timers.pop_due(until) {
            match task {
                Task::ClearAnimation(node) => {
                    self.animator.complete(doc, node, id);
                }
                Task::Settle => match std::mem::take(&mut self.state) {
                    DragState::Settling { session, timer } if timer == id => {
                        self.teardown(doc, session);
                    }
                    other => {
                        tracing::trace!(timer = id.raw(), "stale settle timer");
                        self.state = other;
                    }
                },
            }
        }
        self.timers.set_now(until);
    }

    // ------------------------------------------------------------------
    // Drag state machine
    // ------------------------------------------------------------------

    /// Run `f` against the active dragging session, if there is one
    fn with_session<R>(
        &mut self,
        f: impl FnOnce(&mut Self, &mut Document, &mut DragSession) -> Result<R>,
        doc: &mut Document,
    ) -> Option<Result<R>> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(mut session) => {
                let out = f(self, doc, &mut session);
                self.state = DragState::Dragging(session);
                Some(out)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    fn press(&mut self, doc: &mut Document, event: &PointerEvent) -> Result<()> {
        if !matches!(self.state, DragState::Idle) {
            tracing::debug!(phase = ?self.phase(), "press ignored, drag in progress");
            return Ok(());
        }

        let classes = &self.config.classes;
        let Some(handle) = doc.closest(event.target, |tree, id| tree.has_class(id, &classes.handle))
        else {
            return Ok(());
        };
        let Some(source) = doc.closest(handle, |tree, id| {
            tree.has_class(id, &classes.item) && tree.get_attribute(id, "draggable") == Some("true")
        }) else {
            return Ok(());
        };
        if source == self.root || !doc.tree.contains(self.root, source) {
            return Ok(());
        }

        let origin = event.page();
        let source_rect = measure(doc, source, true)?;
        doc.tree.add_class(source, &self.config.classes.dragging);
        let ghost = match Ghost::create(doc, &self.config, source) {
            Ok(ghost) => ghost,
            Err(err) => {
                doc.tree.remove_class(source, &self.config.classes.dragging);
                return Err(err);
            }
        };

        let mut tracker = PositionTracker::new(origin, self.config.axis);
        tracker.update(origin);

        let session = DragSession {
            source,
            ghost,
            placeholder: None,
            tracker,
            change_x: origin.x,
            source_rect,
            origin_slot: Slot::of(&doc.tree, source),
        };
        self.state = DragState::Dragging(session);

        tracing::debug!(%source, x = origin.x, y = origin.y, "drag started");
        self.events.emit(NestableEvent::Start { item: source });
        Ok(())
    }

    fn drag_start(&mut self, doc: &mut Document) -> Result<()> {
        self.with_session(
            |this, doc, session| {
                if session.placeholder.is_none() {
                    session.placeholder = Some(Placeholder::insert(doc, &this.config, session.source)?);
                }
                Ok(())
            },
            doc,
        )
        .unwrap_or(Ok(()))
    }

    fn drag_over(&mut self, doc: &mut Document, event: &PointerEvent) -> Result<()> {
        self.with_session(
            |this, doc, session| {
                let sample = session.tracker.update(event.page());

                if session.placeholder.is_some() && session.tracker.is_horizontal() {
                    let delta = session.accumulated_change();
                    if delta > this.config.threshold {
                        this.nest(doc, session)?;
                    } else if delta < -this.config.threshold {
                        this.unnest(doc, session)?;
                    }
                }

                session.ghost.follow(doc, sample.position);
                Ok(())
            },
            doc,
        )
        .unwrap_or(Ok(()))
    }

    fn nest(&mut self, doc: &mut Document, session: &mut DragSession) -> Result<()> {
        let Some(placeholder) = session.placeholder.map(|p| p.node()) else {
            return Ok(());
        };
        let Some((parent, placement)) =
            hierarchy::plan_set_parent(&doc.tree, &self.config, placeholder, session.source)
        else {
            return Ok(());
        };
        if !placement.is_allowed(&doc.tree, placeholder, session.source) {
            return Ok(());
        }

        let first = self.first_rects(doc, placeholder, None)?;
        placement.apply(&mut doc.tree, placeholder)?;
        doc.tree.add_class(parent, &self.config.classes.parent);
        session.change_x += self.config.threshold;

        tracing::debug!(item = %session.source, %parent, "nested");
        self.events.emit(NestableEvent::Nest {
            item: session.source,
            parent,
        });
        self.animate(doc, placeholder, placeholder, first)
    }

    fn unnest(&mut self, doc: &mut Document, session: &mut DragSession) -> Result<()> {
        let Some(placeholder) = session.placeholder.map(|p| p.node()) else {
            return Ok(());
        };
        let Some((parent, placement)) = hierarchy::plan_unset_parent(
            &doc.tree,
            &self.config,
            self.root,
            placeholder,
            session.source,
        ) else {
            return Ok(());
        };
        if !placement.is_allowed(&doc.tree, placeholder, session.source) {
            return Ok(());
        }

        let first = self.first_rects(doc, placeholder, None)?;
        let vacated = doc.tree.parent(placeholder);
        placement.apply(&mut doc.tree, placeholder)?;
        if let Some(list) = vacated {
            hierarchy::release_list(&mut doc.tree, &self.config, list, session.source);
        }
        session.change_x -= self.config.threshold;

        tracing::debug!(item = %session.source, %parent, "unnested");
        self.events.emit(NestableEvent::Unnest {
            item: session.source,
            parent,
        });
        self.animate(doc, placeholder, placeholder, first)
    }

    /// Returns whether the target resolved to an item
    fn drag_enter(&mut self, doc: &mut Document, event: &PointerEvent) -> Result<bool> {
        self.with_session(|this, doc, session| this.reorder(doc, session, event.target), doc)
            .unwrap_or(Ok(false))
    }

    fn reorder(&mut self, doc: &mut Document, session: &mut DragSession, target: NodeId) -> Result<bool> {
        let classes = &self.config.classes;
        let Some(content) = doc.closest(target, |tree, id| tree.has_class(id, &classes.content))
        else {
            return Ok(false);
        };
        let Some(item) = doc.closest(content, |tree, id| tree.has_class(id, &classes.item)) else {
            return Ok(false);
        };
        if item == self.root || !doc.tree.contains(self.root, item) {
            return Ok(false);
        }
        let Some(placeholder) = session.placeholder.map(|p| p.node()) else {
            return Ok(true);
        };

        if self.config.animation_enabled() && self.animator.is_pending(item) {
            tracing::trace!(%item, "reorder debounced");
            return Ok(true);
        }

        let direction = session.tracker.direction();
        let Some(placement) = hierarchy::plan_reorder(&doc.tree, &self.config, item, direction)
        else {
            return Ok(true);
        };
        if !placement.is_allowed(&doc.tree, placeholder, session.source) {
            tracing::debug!(?placement, "placement rejected");
            return Ok(true);
        }

        let first = self.first_rects(doc, placeholder, Some(item))?;
        let vacated = doc.tree.parent(placeholder);
        placement.apply(&mut doc.tree, placeholder)?;
        if let Some(list) = vacated {
            hierarchy::release_list(&mut doc.tree, &self.config, list, session.source);
        }

        tracing::debug!(source = %session.source, target = %item, ?placement, "reordered");
        self.events.emit(NestableEvent::Reorder {
            item: session.source,
            target: item,
            placement,
        });
        self.animate(doc, placeholder, item, first)?;
        Ok(true)
    }

    /// Rects for a FLIP, when animation is on
    fn first_rects(
        &self,
        doc: &Document,
        placeholder: NodeId,
        target: Option<NodeId>,
    ) -> Result<Option<FlipFirst>> {
        if !self.config.animation_enabled() {
            return Ok(None);
        }
        Ok(Some(FlipFirst {
            placeholder: measure(doc, placeholder, false)?,
            target: target.map(|t| measure(doc, t, false)).transpose()?,
        }))
    }

    fn animate(
        &mut self,
        doc: &mut Document,
        placeholder: NodeId,
        target: NodeId,
        first: Option<FlipFirst>,
    ) -> Result<()> {
        match first {
            Some(first) => self
                .animator
                .flip(doc, &mut self.timers, placeholder, target, &first),
            None => Ok(()),
        }
    }

    /// End the drag; `commit` makes the current position the tracker base
    fn stop(&mut self, doc: &mut Document, commit: bool) -> Result<()> {
        let mut session = match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => session,
            other => {
                self.state = other;
                return Ok(());
            }
        };
        if commit {
            session.tracker.commit();
        }

        let animation = self.config.animation;
        let Some(placeholder) = session.placeholder.filter(|_| animation > 0) else {
            self.teardown(doc, session);
            return Ok(());
        };

        let position = session.tracker.position();
        if let Err(err) = session.ghost.settle(doc, placeholder.node(), position, animation) {
            self.teardown(doc, session);
            return Err(err);
        }
        let timer = self
            .timers
            .schedule(Duration::from_millis(animation), Task::Settle);
        tracing::debug!(source = %session.source, "settling");
        self.state = DragState::Settling { session, timer };
        Ok(())
    }

    /// Tear down whatever session exists, right now
    fn finish_session(&mut self, doc: &mut Document) {
        match std::mem::take(&mut self.state) {
            DragState::Idle => {}
            DragState::Dragging(session) => self.teardown(doc, session),
            DragState::Settling { session, timer } => {
                self.timers.cancel(timer);
                self.teardown(doc, session);
            }
        }
    }

    /// Remove every transient node and put the source back in the tree
    fn teardown(&mut self, doc: &mut Document, session: DragSession) {
        let source = session.source;
        doc.tree.remove_class(source, &self.config.classes.dragging);
        if let Some(style) = doc.tree.style_mut(source) {
            if style.display == Some(Display::None) {
                style.display = None;
            }
        }

        session.ghost.remove(doc);
        if let Some(placeholder) = session.placeholder {
            self.animator.forget(&mut self.timers, placeholder.node());
            if let Err(err) = placeholder.remove(doc) {
                tracing::debug!(error = %err, "placeholder removal failed");
            }
        }

        tracing::debug!(%source, "drag finished");
        self.events.emit(NestableEvent::Stop { item: source });

        let slot = Slot::of(&doc.tree, source);
        if slot != session.origin_slot {
            let parent = slot
                .parent
                .and_then(|list| hierarchy::owner_item(&doc.tree, &self.config, list));
            tracing::debug!(%source, ?parent, "hierarchy changed");
            self.events.emit(NestableEvent::Change { item: source, parent });
        }
    }

    fn click(&mut self, doc: &mut Document, event: &PointerEvent) {
        let classes = &self.config.classes;
        let Some(button) = doc.closest(event.target, |tree, id| tree.has_class(id, &classes.button))
        else {
            return;
        };
        if !doc.tree.contains(self.root, button) {
            return;
        }
        if let Some((item, collapsed)) = decorate::toggle_collapsed(doc, &self.config, button) {
            tracing::debug!(%item, collapsed, "collapse toggled");
            self.events.emit(if collapsed {
                NestableEvent::Collapse { item }
            } else {
                NestableEvent::Expand { item }
            });
        }
    }
}
