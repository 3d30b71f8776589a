//! Document - High-level document API

use crate::{DomTree, NodeId, SimpleSelector};

/// Default viewport size
const DEFAULT_VIEWPORT: (f64, f64) = (1024.0, 768.0);

/// HTML Document
///
/// Owns the tree plus the window state layout needs: viewport size and
/// scroll offset.
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    html_element: NodeId,
    body_element: NodeId,
    scroll_x: f64,
    scroll_y: f64,
    viewport_width: f64,
    viewport_height: f64,
}

impl Document {
    /// Create a document with `<html><body></body></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let root = tree.root();
        // Fresh detached nodes under the document node: cannot fail
        let _ = tree.append_child(root, html);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            body_element: body,
            scroll_x: 0.0,
            scroll_y: 0.0,
            viewport_width: DEFAULT_VIEWPORT.0,
            viewport_height: DEFAULT_VIEWPORT.1,
        }
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// `window.pageXOffset`
    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    /// `window.pageYOffset`
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Scroll the window to an absolute offset
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.scroll_x = x.max(0.0);
        self.scroll_y = y.max(0.0);
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
    }

    /// Whether the node is attached to this document
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some() && self.tree.contains(self.tree.root(), id)
    }

    /// First descendant of `scope` matching `selector`, in document order
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let selector = SimpleSelector::parse(selector)?;
        self.tree
            .descendants(scope)
            .into_iter()
            .find(|&id| selector.matches(&self.tree, id))
    }

    /// All descendants of `scope` matching `selector`, in document order
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = SimpleSelector::parse(selector) else {
            return Vec::new();
        };
        self.tree
            .descendants(scope)
            .into_iter()
            .filter(|&id| selector.matches(&self.tree, id))
            .collect()
    }

    /// Check if an element matches a selector
    pub fn matches(&self, id: NodeId, selector: &str) -> bool {
        SimpleSelector::parse(selector).is_some_and(|s| s.matches(&self.tree, id))
    }

    /// Get element by `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(self.tree.root(), &format!("#{id}"))
    }

    /// Closest inclusive ancestor element satisfying `predicate`
    ///
    /// A text `start` begins at its parent. The walk stops at `<body>`.
    pub fn closest<F>(&self, start: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&DomTree, NodeId) -> bool,
    {
        let mut current = if self.tree.is_element(start) {
            Some(start)
        } else {
            self.tree.parent(start)
        };
        while let Some(id) = current {
            if id == self.body_element || !self.tree.is_element(id) {
                return None;
            }
            if predicate(&self.tree, id) {
                return Some(id);
            }
            current = self.tree.parent(id);
        }
        None
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
