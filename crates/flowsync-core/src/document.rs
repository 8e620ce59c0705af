//! The per-user flow document and the graph edits applied to it.
//!
//! [`FlowContent`] is what a client writes (nodes, edges, theme).
//! [`FlowDocument`] is what a store holds: the content plus its key, the
//! denormalized counts, and the store-assigned `updated_at`.
//!
//! The edit methods on [`FlowDocument`] are pure; stores call them inside
//! their own atomic scope (a transaction or a write lock) so that a
//! read-modify-write never interleaves with another writer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::edge::FlowEdge;
use crate::id::UserId;
use crate::node::FlowNode;

/// Visual theme identifier. Open set; nothing is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(pub String);

impl Theme {
    pub const DEFAULT: &'static str = "light";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Theme {
    fn from(s: &str) -> Self {
        Theme(s.to_string())
    }
}

/// Client-supplied content of a flow document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowContent {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    #[serde(default)]
    pub theme: Theme,
}

impl FlowContent {
    pub fn new(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>, theme: Theme) -> Self {
        FlowContent {
            nodes,
            edges,
            theme,
        }
    }
}

/// A stored flow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    pub user_id: UserId,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub theme: Theme,
    /// Node count as of the last write. Trusted on load, never re-derived.
    pub node_count: usize,
    /// Edge count as of the last write. Trusted on load, never re-derived.
    pub edge_count: usize,
    /// Write time assigned by the store.
    pub updated_at: DateTime<Utc>,
}

/// What a [`FlowDocument::remove_node`] call took out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removal {
    pub nodes: usize,
    pub edges: usize,
}

impl FlowDocument {
    /// Builds a document from freshly written content, computing counts.
    pub fn from_content(user_id: UserId, content: FlowContent, updated_at: DateTime<Utc>) -> Self {
        let mut doc = FlowDocument {
            user_id,
            nodes: content.nodes,
            edges: content.edges,
            theme: content.theme,
            node_count: 0,
            edge_count: 0,
            updated_at,
        };
        doc.refresh_counts();
        doc
    }

    /// Recomputes `node_count`/`edge_count` from the arrays.
    pub fn refresh_counts(&mut self) {
        self.node_count = self.nodes.len();
        self.edge_count = self.edges.len();
    }

    /// Moves `updated_at` forward to `now`, never backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Appends `node` with array-union semantics.
    ///
    /// The node is skipped when an equal node is already present. Two nodes
    /// sharing an id but differing in any field are both kept. Returns
    /// `true` if the node was appended.
    pub fn append_node(&mut self, node: FlowNode) -> bool {
        if self.nodes.contains(&node) {
            return false;
        }
        self.nodes.push(node);
        self.refresh_counts();
        true
    }

    /// Removes every node with id `node_id` and every edge touching it.
    pub fn remove_node(&mut self, node_id: &str) -> Removal {
        let nodes_before = self.nodes.len();
        let edges_before = self.edges.len();
        self.nodes.retain(|n| n.id != node_id);
        self.edges.retain(|e| !e.touches(node_id));
        self.refresh_counts();
        Removal {
            nodes: nodes_before - self.nodes.len(),
            edges: edges_before - self.edges.len(),
        }
    }

    /// Splits the document back into its client-visible content.
    pub fn content(&self) -> FlowContent {
        FlowContent {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            theme: self.theme.clone(),
        }
    }
}
