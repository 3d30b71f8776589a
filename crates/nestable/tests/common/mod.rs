//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use nestable::dom::{Document, NodeId};
use nestable::{Config, EventKind, EventResponse, Nestable, NestableEvent, Phase, PointerEvent};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Outline description: label and children
pub struct Outline(pub &'static str, pub Vec<Outline>);

pub fn leaf(label: &'static str) -> Outline {
    Outline(label, Vec::new())
}

fn build(doc: &mut Document, list: NodeId, outline: &[Outline]) {
    for Outline(label, children) in outline {
        let li = doc.tree.create_element("li");
        let text = doc.tree.create_text(label);
        doc.tree.append_child(li, text).unwrap();
        if !children.is_empty() {
            let sub = doc.tree.create_element("ol");
            doc.tree.append_child(li, sub).unwrap();
            build(doc, sub, children);
        }
        doc.tree.append_child(list, li).unwrap();
    }
}

/// A document with a decorated outline and a record of emitted events
pub struct Harness {
    pub doc: Document,
    pub nestable: Nestable,
    pub events: Rc<RefCell<Vec<NestableEvent>>>,
}

impl Harness {
    pub fn new(outline: Vec<Outline>, configure: impl FnOnce(Config) -> Config) -> Self {
        init_tracing();
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.tree.create_element("ol");
        doc.tree.set_attribute(root, "id", "outline");
        doc.tree.append_child(body, root).unwrap();
        build(&mut doc, root, &outline);

        let mut nestable = Nestable::new(&mut doc, configure(Config::new("#outline"))).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            EventKind::Start,
            EventKind::Reorder,
            EventKind::Nest,
            EventKind::Unnest,
            EventKind::Stop,
            EventKind::Change,
        ] {
            let sink = Rc::clone(&events);
            nestable.on(kind, move |event| sink.borrow_mut().push(event.clone()));
        }
        Self { doc, nestable, events }
    }

    pub fn root(&self) -> NodeId {
        self.nestable.root()
    }

    /// Item whose own label is `label`
    pub fn item(&self, label: &str) -> NodeId {
        self.nestable
            .items()
            .iter()
            .copied()
            .find(|&item| self.label(item) == label)
            .unwrap_or_else(|| panic!("no item {label}"))
    }

    pub fn label(&self, item: NodeId) -> String {
        self.doc
            .query_selector(item, ".nst-content")
            .map(|content| self.doc.tree.text_content(content))
            .unwrap_or_default()
    }

    pub fn content(&self, item: NodeId) -> NodeId {
        self.doc.query_selector(item, ".nst-content").unwrap()
    }

    pub fn handle(&self, item: NodeId) -> NodeId {
        self.doc.query_selector(item, ".nst-handle").unwrap()
    }

    /// Child list of a decorated item
    pub fn list_of(&self, item: NodeId) -> NodeId {
        self.doc.tree.last_element_child(item).unwrap()
    }

    /// Labels of the element children of `list`, placeholders shown as `_`
    pub fn labels(&self, list: NodeId) -> Vec<String> {
        self.doc
            .tree
            .element_children(list)
            .map(|child| {
                if self.doc.tree.has_class(child, "nst-placeholder") {
                    "_".to_string()
                } else {
                    self.label(child)
                }
            })
            .collect()
    }

    pub fn send(&mut self, phase: Phase, target: NodeId, x: f64, y: f64) -> EventResponse {
        self.nestable
            .handle_event(&mut self.doc, &PointerEvent::new(phase, target, x, y))
    }

    pub fn press(&mut self, item: NodeId, x: f64, y: f64) {
        let handle = self.handle(item);
        self.send(Phase::Press, handle, x, y);
        self.send(Phase::DragStart, handle, x, y);
    }

    pub fn over(&mut self, x: f64, y: f64) {
        let root = self.root();
        self.send(Phase::DragOver, root, x, y);
    }

    /// Drag over `item` and enter its content
    pub fn enter(&mut self, item: NodeId, x: f64, y: f64) {
        let content = self.content(item);
        self.send(Phase::DragOver, content, x, y);
        self.send(Phase::DragEnter, content, x, y);
    }

    pub fn end(&mut self) {
        let root = self.root();
        self.send(Phase::DragEnd, root, 0.0, 0.0);
    }

    pub fn advance(&mut self, ms: u64) {
        self.nestable
            .advance(&mut self.doc, Duration::from_millis(ms));
    }

    pub fn take_events(&self) -> Vec<NestableEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Every decorated item sits exactly once under the root
    pub fn assert_tree(&self) {
        let root = self.root();
        let in_root = self.doc.query_selector_all(root, ".nst-item");
        assert_eq!(in_root.len(), self.nestable.items().len());
        for &item in self.nestable.items() {
            assert!(self.doc.tree.contains(root, item), "{item} left the root");
            assert_eq!(in_root.iter().filter(|&&i| i == item).count(), 1);
        }
        assert!(self.doc.query_selector_all(root, ".nst-placeholder").len() <= 1);
    }
}
