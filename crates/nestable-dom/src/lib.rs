//! Nestable DOM - host document model
//!
//! Arena-allocated element tree with class lists, attributes, inline style
//! and simple selectors. This is the document the nestable core reads and
//! mutates while a drag is in progress.

mod attributes;
mod classlist;
mod document;
mod error;
mod geometry;
mod node;
mod selector;
mod style;
mod tree;

pub use attributes::Attributes;
pub use classlist::ClassList;
pub use document::Document;
pub use error::{DomError, DomResult};
pub use geometry::DomRect;
pub use node::{ElementData, Node, NodeData};
pub use selector::SimpleSelector;
pub use style::{Display, EdgeSizes, Float, InlineStyle, Position, Transition, Translate};
pub use tree::{Ancestors, Children, DomTree};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for missing links
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Build an ID from a raw arena index
    pub fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Raw arena index
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
