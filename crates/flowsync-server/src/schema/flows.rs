//! Flow document request/response types.
//!
//! Request bodies keep `nodes`, `edges`, and `node` as raw JSON so that a
//! wrong type produces a 400 with a readable message instead of an
//! extractor rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use flowsync_core::{validate, FlowContent, FlowDocument, FlowEdge, FlowNode, Theme, UserId};

use crate::error::ApiError;

/// Body of `POST /api/flow/save`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveFlowRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub nodes: Option<Value>,
    #[serde(default)]
    pub edges: Option<Value>,
    #[serde(default)]
    pub theme: Option<String>,
}

impl SaveFlowRequest {
    /// Applies defaults and shape checks.
    pub fn into_parts(self) -> Result<(UserId, FlowContent), ApiError> {
        if !is_array_or_absent(&self.nodes) || !is_array_or_absent(&self.edges) {
            return Err(ApiError::BadRequest("Invalid data format".to_string()));
        }
        let nodes = validate::nodes_from_value(self.nodes)?;
        let edges = validate::edges_from_value(self.edges)?;
        let theme = self.theme.map(Theme).unwrap_or_default();
        Ok((
            UserId::or_default(self.user_id),
            FlowContent::new(nodes, edges, theme),
        ))
    }
}

fn is_array_or_absent(value: &Option<Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::Array(_)))
}

/// Response from a successful save.
#[derive(Debug, Clone, Serialize)]
pub struct SaveFlowResponse {
    pub message: String,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Body of `POST /api/flow/node`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddNodeRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub node: Option<Value>,
}

impl AddNodeRequest {
    /// Applies the user id default and requires a non-empty node object.
    pub fn into_parts(self) -> Result<(UserId, FlowNode), ApiError> {
        let node = match self.node {
            Some(node) if !is_empty_value(&node) => node,
            _ => return Err(ApiError::BadRequest("Node data required".to_string())),
        };
        let node = validate::node_from_value(node)
            .map_err(|reason| ApiError::BadRequest(format!("invalid node: {}", reason)))?;
        Ok((UserId::or_default(self.user_id), node))
    }
}

/// Null, false, zero, and empty strings/arrays/objects count as "no node".
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Response body carrying only a message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Response from `GET /api/flow/load/{user_id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LoadFlowResponse {
    Found(StoredFlowView),
    Empty(EmptyFlowView),
}

/// Projection of a stored document.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFlowView {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub theme: Theme,
    pub updated_at: DateTime<Utc>,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Default payload returned when the user has no document.
#[derive(Debug, Clone, Serialize)]
pub struct EmptyFlowView {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub theme: Theme,
    pub message: String,
}

impl From<Option<FlowDocument>> for LoadFlowResponse {
    fn from(doc: Option<FlowDocument>) -> Self {
        match doc {
            Some(doc) => LoadFlowResponse::Found(StoredFlowView {
                nodes: doc.nodes,
                edges: doc.edges,
                theme: doc.theme,
                updated_at: doc.updated_at,
                node_count: doc.node_count,
                edge_count: doc.edge_count,
            }),
            None => LoadFlowResponse::Empty(EmptyFlowView {
                nodes: Vec::new(),
                edges: Vec::new(),
                theme: Theme::default(),
                message: "No data found for user".to_string(),
            }),
        }
    }
}
