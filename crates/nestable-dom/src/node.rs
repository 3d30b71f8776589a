//! DOM Node
//!
//! Nodes link to each other by `NodeId` instead of pointers, so the whole
//! tree lives in one `Vec` and relinking a subtree is a handful of index
//! writes.

use crate::{Attributes, ClassList, InlineStyle, NodeId};

/// DOM Node - link fields plus payload
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: NodeId,
    pub(crate) first_child: NodeId,
    pub(crate) last_child: NodeId,
    pub(crate) prev_sibling: NodeId,
    pub(crate) next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.option()
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child.option()
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child.option()
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling.option()
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling.option()
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Copy of the payload without any links
    pub(crate) fn detached_copy(&self) -> Self {
        Self::with_data(self.data.clone())
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes other than `class` and `style`
    pub attrs: Attributes,
    /// Class list
    pub classes: ClassList,
    /// Inline style
    pub style: InlineStyle,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Attributes::new(),
            classes: ClassList::new(),
            style: InlineStyle::default(),
        }
    }

    /// Case-insensitive tag comparison
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Value of the `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }
}
