//! Nestable errors
//!
//! Only construction and lifecycle calls surface these. Event handling
//! logs and skips a failed step instead of returning an error.

use nestable_dom::{DomError, NodeId};
use nestable_layout::LayoutError;

/// Result type for nestable operations
pub type Result<T> = std::result::Result<T, NestableError>;

/// Nestable error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NestableError {
    #[error("configuration has no root list")]
    MissingRoot,

    #[error("root list `{0}` not found")]
    RootNotFound(String),

    #[error("root {0} is not an element attached to the document")]
    InvalidRoot(NodeId),

    #[error("invalid threshold {0}: must be positive and finite")]
    InvalidThreshold(f64),

    #[error("configuration field `{0}` must not be empty")]
    EmptyName(&'static str),

    #[error("geometry unavailable: {0}")]
    Geometry(#[from] LayoutError),

    #[error("DOM operation failed: {0}")]
    Dom(#[from] DomError),
}
