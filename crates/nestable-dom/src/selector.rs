//! Simple selectors
//!
//! Tag, `.class`, `#id` and `*` selectors: enough for the role names the
//! widget is configured with.

use crate::{DomTree, NodeId};

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            (!id.is_empty()).then(|| Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            (!class.is_empty()).then(|| Self::Class(class.to_string()))
        } else {
            Some(Self::Tag(s.to_ascii_lowercase()))
        }
    }

    /// Check if an element matches
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(element) = tree.element(id) else {
            return false;
        };
        match self {
            Self::Universal => true,
            Self::Tag(tag) => element.is(tag),
            Self::Id(wanted) => element.id() == Some(wanted.as_str()),
            Self::Class(class) => element.classes.contains(class),
        }
    }
}
