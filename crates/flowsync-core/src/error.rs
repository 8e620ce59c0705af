//! Core error types for flowsync-core.
//!
//! Uses `thiserror` for structured, matchable variants covering the shape
//! checks applied to incoming nodes and edges.

use thiserror::Error;

/// Errors produced while validating flow data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A field that must hold a JSON array held something else.
    #[error("invalid data format: '{field}' must be an array")]
    InvalidArray { field: &'static str },

    /// A node entry could not be interpreted as a node.
    #[error("invalid node at index {index}: {reason}")]
    InvalidNode { index: usize, reason: String },

    /// An edge entry could not be interpreted as an edge.
    #[error("invalid edge at index {index}: {reason}")]
    InvalidEdge { index: usize, reason: String },

    /// A node's `data` field is present but is not an object.
    #[error("node '{id}' has non-object data")]
    NodeDataNotObject { id: String },
}
