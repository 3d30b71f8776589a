//! Drag sessions driven end to end against the in-memory document

mod common;

use common::{Harness, Outline, leaf};
use nestable::dom::Display;
use nestable::{DragPhase, NestableEvent, Placement};

fn flat(labels: &[&'static str]) -> Vec<Outline> {
    labels.iter().map(|&l| leaf(l)).collect()
}

fn no_animation(config: nestable::Config) -> nestable::Config {
    config.with_animation(0)
}

#[test]
fn test_reorder_below_sibling() {
    let mut h = Harness::new(flat(&["A", "B", "C"]), no_animation);
    let (a, b) = (h.item("A"), h.item("B"));

    h.press(a, 50.0, 10.0);
    h.enter(b, 50.0, 30.0);
    assert_eq!(h.labels(h.root()), ["A", "B", "_", "C"]);

    h.end();
    assert_eq!(h.labels(h.root()), ["B", "A", "C"]);
    for item in h.nestable.items().to_vec() {
        assert!(!h.doc.tree.has_class(item, "nst-parent"));
        assert_eq!(h.doc.tree.child_element_count(h.list_of(item)), 0);
    }

    let events = h.take_events();
    assert_eq!(events[0], NestableEvent::Start { item: a });
    assert_eq!(
        events[1],
        NestableEvent::Reorder {
            item: a,
            target: b,
            placement: Placement::After(b)
        }
    );
    assert_eq!(events[2], NestableEvent::Stop { item: a });
    assert_eq!(events[3], NestableEvent::Change { item: a, parent: None });
}

#[test]
fn test_reorder_above_sibling() {
    let mut h = Harness::new(flat(&["A", "B", "C"]), no_animation);
    let (a, c) = (h.item("A"), h.item("C"));

    h.press(c, 50.0, 50.0);
    h.enter(a, 50.0, 10.0);
    h.end();

    assert_eq!(h.labels(h.root()), ["C", "A", "B"]);
}

#[test]
fn test_nest_under_previous_sibling() {
    let mut h = Harness::new(flat(&["A", "B"]), no_animation);
    let (a, b) = (h.item("A"), h.item("B"));

    h.press(b, 50.0, 30.0);
    h.over(80.0, 30.0);

    assert!(h.doc.tree.has_class(a, "nst-parent"));
    assert_eq!(h.labels(h.list_of(a)), ["_"]);
    assert_eq!(h.nestable.accumulated_change(), Some(30.0 - 25.0));

    h.end();
    assert_eq!(h.labels(h.root()), ["A"]);
    assert_eq!(h.labels(h.list_of(a)), ["B"]);

    let events = h.take_events();
    assert!(events.contains(&NestableEvent::Nest { item: b, parent: a }));
    assert_eq!(
        events.last(),
        Some(&NestableEvent::Change { item: b, parent: Some(a) })
    );
}

#[test]
fn test_unnest_last_child() {
    let mut h = Harness::new(vec![Outline("A", vec![leaf("B")])], no_animation);
    let (a, b) = (h.item("A"), h.item("B"));
    assert!(h.doc.tree.has_class(a, "nst-parent"));

    h.press(b, 100.0, 30.0);
    h.over(70.0, 30.0);

    assert_eq!(h.labels(h.root()), ["A", "_"]);
    assert!(!h.doc.tree.has_class(a, "nst-parent"));
    assert_eq!(h.nestable.accumulated_change(), Some(-30.0 + 25.0));

    h.end();
    assert_eq!(h.labels(h.root()), ["A", "B"]);
    assert!(h.labels(h.list_of(a)).is_empty());
    assert!(h.take_events().contains(&NestableEvent::Unnest { item: b, parent: a }));
}

#[test]
fn test_unnest_blocked_mid_list() {
    let mut h = Harness::new(
        vec![Outline("A", vec![leaf("A1"), leaf("A2"), leaf("A3")])],
        no_animation,
    );
    let a1 = h.item("A1");

    h.press(a1, 100.0, 30.0);
    h.over(60.0, 30.0);

    assert_eq!(h.labels(h.root()), ["A"]);
    assert_eq!(h.nestable.accumulated_change(), Some(-40.0));
}

#[test]
fn test_unnest_blocked_by_visible_last_child() {
    let mut h = Harness::new(
        vec![Outline("A", vec![leaf("A1"), leaf("A2")]), leaf("B")],
        no_animation,
    );
    let (a, a1, b) = (h.item("A"), h.item("A1"), h.item("B"));

    h.press(b, 100.0, 70.0);
    h.enter(a1, 100.0, 30.0);
    h.enter(a1, 100.0, 35.0);
    assert_eq!(h.labels(h.list_of(a)), ["A1", "_", "A2"]);

    h.over(60.0, 35.0);

    assert_eq!(h.labels(h.list_of(a)), ["A1", "_", "A2"]);
    assert_eq!(h.labels(h.root()), ["A", "B"]);
    assert_eq!(h.nestable.accumulated_change(), Some(-40.0));
}

#[test]
fn test_unnest_past_hidden_source() {
    let mut h = Harness::new(
        vec![Outline("A", vec![leaf("A1"), leaf("A2")])],
        no_animation,
    );
    let (a, a2) = (h.item("A"), h.item("A2"));

    h.press(a2, 100.0, 50.0);
    assert_eq!(h.labels(h.list_of(a)), ["A1", "_", "A2"]);
    h.over(70.0, 50.0);

    assert_eq!(h.labels(h.root()), ["A", "_"]);
    assert!(h.doc.tree.has_class(a, "nst-parent"));

    h.end();
    assert_eq!(h.labels(h.root()), ["A", "A2"]);
    assert_eq!(h.labels(h.list_of(a)), ["A1"]);
}

#[test]
fn test_nest_then_unnest_restores_parent() {
    let mut h = Harness::new(flat(&["A", "B", "C"]), no_animation);
    let (a, b) = (h.item("A"), h.item("B"));

    h.press(b, 50.0, 30.0);
    h.over(80.0, 30.0);
    assert_eq!(h.labels(h.list_of(a)), ["_"]);

    h.over(45.0, 30.0);
    assert_eq!(h.labels(h.root()), ["A", "_", "B", "C"]);
    assert!(!h.doc.tree.has_class(a, "nst-parent"));

    h.end();
    assert_eq!(h.labels(h.root()), ["A", "B", "C"]);
    assert_eq!(h.doc.tree.parent(b), Some(h.root()));
    assert!(
        !h.take_events()
            .iter()
            .any(|e| matches!(e, NestableEvent::Change { .. }))
    );
}

#[test]
fn test_vertical_travel_never_nests() {
    let mut h = Harness::new(flat(&["A", "B"]), no_animation);
    let (a, b) = (h.item("A"), h.item("B"));

    h.press(b, 50.0, 30.0);
    h.over(90.0, 90.0);

    assert!(!h.doc.tree.has_class(a, "nst-parent"));
    assert_eq!(h.doc.tree.parent(h.nestable.placeholder().unwrap()), Some(h.root()));
    h.end();
    assert_eq!(h.doc.tree.parent(b), Some(h.root()));
}

#[test]
fn test_parent_target_takes_first_child() {
    let mut h = Harness::new(
        vec![leaf("X"), Outline("A", vec![leaf("A1")])],
        no_animation,
    );
    let (x, a) = (h.item("X"), h.item("A"));

    h.press(x, 50.0, 10.0);
    h.enter(a, 50.0, 30.0);
    assert_eq!(h.labels(h.list_of(a)), ["_", "A1"]);

    h.end();
    assert_eq!(h.labels(h.root()), ["A"]);
    assert_eq!(h.labels(h.list_of(a)), ["X", "A1"]);
}

#[test]
fn test_leaving_list_clears_parent() {
    let mut h = Harness::new(
        vec![Outline("A", vec![leaf("A1")]), leaf("B")],
        no_animation,
    );
    let (a, a1, b) = (h.item("A"), h.item("A1"), h.item("B"));

    h.press(a1, 100.0, 30.0);
    h.enter(b, 100.0, 50.0);

    assert_eq!(h.labels(h.root()), ["A", "B", "_"]);
    assert!(!h.doc.tree.has_class(a, "nst-parent"));

    h.end();
    assert_eq!(h.labels(h.root()), ["A", "B", "A1"]);
    assert!(h.labels(h.list_of(a)).is_empty());
}

#[test]
fn test_press_then_end_changes_nothing() {
    let mut h = Harness::new(flat(&["A", "B", "C"]), |c| c);
    let b = h.item("B");
    let handle = h.handle(b);

    h.send(nestable::Phase::Press, handle, 50.0, 30.0);
    let ghost = h.nestable.ghost().unwrap();
    h.end();

    assert_eq!(h.nestable.phase(), DragPhase::Idle);
    assert_eq!(h.labels(h.root()), ["A", "B", "C"]);
    assert!(!h.doc.is_connected(ghost));
    assert!(h.doc.query_selector(h.root(), ".nst-placeholder").is_none());
    assert_eq!(h.doc.tree.style(b).unwrap().display, None);
    assert_eq!(h.doc.tree.get_attribute(b, "draggable"), Some("true"));
    assert!(!h.doc.tree.has_class(b, "nst-dragging"));

    let events = h.take_events();
    assert_eq!(
        events,
        [NestableEvent::Start { item: b }, NestableEvent::Stop { item: b }]
    );
}

#[test]
fn test_repeated_drags_reuse_nodes() {
    let mut h = Harness::new(flat(&["A", "B", "C"]), |c| c.with_animation(0));
    let (a, b) = (h.item("A"), h.item("B"));

    h.press(a, 50.0, 10.0);
    h.enter(b, 50.0, 30.0);
    h.end();
    let len = h.doc.tree.len();

    for _ in 0..5 {
        h.press(a, 50.0, 30.0);
        h.enter(b, 50.0, 10.0);
        h.end();
        h.press(a, 50.0, 10.0);
        h.enter(b, 50.0, 30.0);
        h.end();
    }

    assert_eq!(h.labels(h.root()), ["B", "A", "C"]);
    assert_eq!(h.doc.tree.len(), len);
}

#[test]
fn test_release_settles_with_animation() {
    let mut h = Harness::new(flat(&["A", "B", "C"]), |c| c);
    let (a, b) = (h.item("A"), h.item("B"));

    h.press(a, 50.0, 10.0);
    h.enter(b, 50.0, 30.0);
    let ghost = h.nestable.ghost().unwrap();
    let root = h.root();
    h.send(nestable::Phase::Release, root, 50.0, 30.0);

    assert_eq!(h.nestable.phase(), DragPhase::Settling);
    let style = h.doc.tree.style(ghost).unwrap();
    assert_eq!(style.transition.as_ref().map(|t| t.duration_ms), Some(150));
    assert_eq!(
        style.transition.as_ref().and_then(|t| t.easing.as_deref()),
        Some("ease")
    );

    // events during settling are harmless
    h.send(nestable::Phase::DragEnd, root, 0.0, 0.0);
    h.enter(b, 50.0, 10.0);
    assert_eq!(h.labels(h.root()), ["A", "B", "_", "C"]);

    h.advance(150);
    assert_eq!(h.nestable.phase(), DragPhase::Idle);
    assert_eq!(h.labels(h.root()), ["B", "A", "C"]);
    assert!(!h.doc.is_connected(ghost));
    assert_eq!(h.doc.tree.style(a).unwrap().display, None);
}

#[test]
fn test_reorder_debounced_while_animating() {
    let mut h = Harness::new(flat(&["A", "B", "C", "D"]), |c| c);
    let (a, b) = (h.item("A"), h.item("B"));

    h.press(a, 50.0, 10.0);
    h.enter(b, 50.0, 30.0);
    assert_eq!(h.labels(h.root()), ["A", "B", "_", "C", "D"]);
    assert!(h.nestable.is_animating(b));

    h.enter(b, 50.0, 20.0);
    h.advance(100);
    h.enter(b, 50.0, 18.0);
    assert_eq!(h.labels(h.root()), ["A", "B", "_", "C", "D"]);

    h.advance(50);
    assert!(!h.nestable.is_animating(b));
    assert_eq!(h.doc.tree.style(b).unwrap().transform, None);

    h.enter(b, 50.0, 15.0);
    assert_eq!(h.labels(h.root()), ["A", "_", "B", "C", "D"]);

    let reorders = h
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, NestableEvent::Reorder { target, .. } if *target == b))
        .count();
    assert_eq!(reorders, 2);
}

#[test]
fn test_flip_transform_on_target() {
    let mut h = Harness::new(flat(&["A", "B", "C"]), |c| c);
    let (a, b) = (h.item("A"), h.item("B"));

    h.press(a, 50.0, 10.0);
    h.enter(b, 50.0, 30.0);

    let placeholder = h.nestable.placeholder().unwrap();
    for node in [placeholder, b] {
        let style = h.doc.tree.style(node).unwrap();
        assert_eq!(style.transform.map(|t| t.is_identity()), Some(true));
        assert_eq!(style.transition.as_ref().map(|t| t.duration_ms), Some(150));
    }
}

#[test]
fn test_axis_restriction_moves_ghost_vertically() {
    let mut h = Harness::new(flat(&["A", "B"]), |c| c.with_axis(nestable::Axis::Y));
    let b = h.item("B");

    h.press(b, 50.0, 30.0);
    h.over(90.0, 34.0);

    let ghost = h.nestable.ghost().unwrap();
    let transform = h.doc.tree.style(ghost).unwrap().transform.unwrap();
    assert_eq!((transform.x, transform.y), (0.0, 4.0));
}

#[test]
fn test_hidden_source_is_not_a_target() {
    let mut h = Harness::new(vec![Outline("A", vec![leaf("A1")]), leaf("B")], no_animation);
    let (a, a1) = (h.item("A"), h.item("A1"));

    h.press(a, 50.0, 10.0);
    h.enter(a1, 50.0, 30.0);

    assert_eq!(h.doc.tree.parent(h.nestable.placeholder().unwrap()), Some(h.root()));
    assert_eq!(h.doc.tree.style(a).unwrap().display, Some(Display::None));
    h.end();
    assert_eq!(h.labels(h.root()), ["A", "B"]);
}

/// Linear congruential generator for reproducible pseudo-random walks
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

#[test]
fn test_random_walk_keeps_tree() {
    let outline = vec![
        Outline("A", vec![leaf("A1"), leaf("A2")]),
        leaf("B"),
        Outline("C", vec![Outline("C1", vec![leaf("C1a")])]),
        leaf("D"),
    ];
    let mut h = Harness::new(outline, |c| c.with_animation(40));
    let items = h.nestable.items().to_vec();
    let mut rng = Lcg(0x5eed);

    for _ in 0..40 {
        let source = items[rng.below(items.len() as u64) as usize];
        let (mut x, mut y) = (200.0, 200.0);
        h.press(source, x, y);

        for _ in 0..12 {
            x += rng.below(81) as f64 - 40.0;
            y += rng.below(61) as f64 - 30.0;
            if rng.below(2) == 0 {
                h.over(x, y);
            } else {
                let target = items[rng.below(items.len() as u64) as usize];
                h.enter(target, x, y);
            }
            h.assert_tree();
            h.advance(rng.below(30));
        }

        h.end();
        h.advance(100);
        assert_eq!(h.nestable.phase(), DragPhase::Idle);
        h.assert_tree();
        assert!(h.doc.query_selector(h.root(), ".nst-placeholder").is_none());
        assert!(h.doc.query_selector(h.doc.body(), ".nst-clone").is_none());
    }
}
