//! Data model for flowsync flow documents.
//!
//! A flow document is one user's saved editor state: an ordered list of
//! nodes, an ordered list of edges, and a theme. This crate defines the
//! types, the shape checks applied to client input, and the pure edits
//! (array-union append, cascading node removal) that storage backends run
//! inside their atomic write scope.

pub mod document;
pub mod edge;
pub mod error;
pub mod id;
pub mod node;
pub mod validate;

// Re-export commonly used types
pub use document::{FlowContent, FlowDocument, Removal, Theme};
pub use edge::FlowEdge;
pub use error::CoreError;
pub use id::UserId;
pub use node::{local_timestamp, FlowNode};
