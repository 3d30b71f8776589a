//! Nestable Configuration
//!
//! Built once, validated at construction and never mutated afterwards.
//! Every field has a default, so a partial serialized config is enough.

use nestable_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

use crate::{NestableError, Result};

/// Movement axis restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// How the root list is located
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RootRef {
    /// An element already resolved by the host
    Node(NodeId),
    /// A simple selector (`#id`, `.class` or tag) searched in the document
    Selector(String),
}

impl From<NodeId> for RootRef {
    fn from(id: NodeId) -> Self {
        RootRef::Node(id)
    }
}

impl From<&str> for RootRef {
    fn from(selector: &str) -> Self {
        RootRef::Selector(selector.to_string())
    }
}

/// Class names for every structural and state marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub root: String,
    pub list: String,
    pub item: String,
    pub parent: String,
    pub handle: String,
    pub button: String,
    pub content: String,
    pub dragging: String,
    pub placeholder: String,
    pub clone: String,
    pub draggable: String,
    pub collapsed: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            root: "nst-root".into(),
            list: "nst-list".into(),
            item: "nst-item".into(),
            parent: "nst-parent".into(),
            handle: "nst-handle".into(),
            button: "nst-button".into(),
            content: "nst-content".into(),
            dragging: "nst-dragging".into(),
            placeholder: "nst-placeholder".into(),
            clone: "nst-clone".into(),
            draggable: "nst-draggable".into(),
            collapsed: "nst-collapsed".into(),
        }
    }
}

impl ClassNames {
    fn fields(&self) -> [(&'static str, &str); 12] {
        [
            ("classes.root", &self.root),
            ("classes.list", &self.list),
            ("classes.item", &self.item),
            ("classes.parent", &self.parent),
            ("classes.handle", &self.handle),
            ("classes.button", &self.button),
            ("classes.content", &self.content),
            ("classes.dragging", &self.dragging),
            ("classes.placeholder", &self.placeholder),
            ("classes.clone", &self.clone),
            ("classes.draggable", &self.draggable),
            ("classes.collapsed", &self.collapsed),
        ]
    }
}

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root list (required)
    pub list: Option<RootRef>,

    /// Selector for the items; defaults to every `item_name` under the root
    pub items: Option<String>,

    /// Tag name of list containers
    pub list_name: String,

    /// Tag name of items (also used for the placeholder)
    pub item_name: String,

    /// Selector an item must match to be draggable
    pub draggable: String,

    /// Selector of an existing drag handle inside each item.
    /// When unset, the generated content wrapper is the handle.
    pub handle: Option<String>,

    pub classes: ClassNames,

    /// Horizontal travel (px) needed to nest or un-nest
    pub threshold: f64,

    /// Animation duration (ms); 0 disables animation
    pub animation: u64,

    /// Restrict movement to one axis
    pub axis: Option<Axis>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list: None,
            items: None,
            list_name: "ol".into(),
            item_name: "li".into(),
            draggable: "li".into(),
            handle: None,
            classes: ClassNames::default(),
            threshold: 25.0,
            animation: 150,
            axis: None,
        }
    }
}

impl Config {
    /// Default configuration for the given root list
    pub fn new(list: impl Into<RootRef>) -> Self {
        Self {
            list: Some(list.into()),
            ..Default::default()
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_animation(mut self, animation_ms: u64) -> Self {
        self.animation = animation_ms;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_handle(mut self, selector: &str) -> Self {
        self.handle = Some(selector.to_string());
        self
    }

    pub fn with_items(mut self, selector: &str) -> Self {
        self.items = Some(selector.to_string());
        self
    }

    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    /// Whether relocations are animated
    pub fn animation_enabled(&self) -> bool {
        self.animation > 0
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        if self.list.is_none() {
            return Err(NestableError::MissingRoot);
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(NestableError::InvalidThreshold(self.threshold));
        }

        let names = [
            ("list_name", self.list_name.as_str()),
            ("item_name", self.item_name.as_str()),
            ("draggable", self.draggable.as_str()),
        ];
        for (field, value) in names.into_iter().chain(self.classes.fields()) {
            if value.trim().is_empty() {
                return Err(NestableError::EmptyName(field));
            }
        }
        if self.handle.as_deref().is_some_and(|h| h.trim().is_empty()) {
            return Err(NestableError::EmptyName("handle"));
        }
        Ok(())
    }

    /// Locate the root list element in `doc`
    pub(crate) fn resolve_root(&self, doc: &Document) -> Result<NodeId> {
        let root = match self.list.as_ref().ok_or(NestableError::MissingRoot)? {
            RootRef::Node(id) => *id,
            RootRef::Selector(selector) => doc
                .query_selector(doc.tree.root(), selector)
                .ok_or_else(|| NestableError::RootNotFound(selector.clone()))?,
        };
        if !doc.tree.is_element(root) || !doc.is_connected(root) {
            return Err(NestableError::InvalidRoot(root));
        }
        Ok(root)
    }
}
