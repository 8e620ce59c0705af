//! Flow editor edges.
//!
//! Edges reference nodes by id through `source` and `target`. Nothing checks
//! that the referenced nodes exist; dangling edges are allowed until a node
//! removal cleans them up.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A connection between two nodes as sent by the flow editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Id of the node the edge starts at.
    pub source: String,
    /// Id of the node the edge ends at.
    pub target: String,
    /// All remaining fields (`id`, `type`, `animated`, ...), preserved as-is.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FlowEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        FlowEdge {
            source: source.into(),
            target: target.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Returns `true` if either endpoint is `node_id`.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
