//! Shape checks for client-supplied node and edge arrays.
//!
//! Only types are checked: arrays must be arrays, nodes need a string `id`,
//! edges need string `source` and `target`. Nothing else about the payload
//! is inspected.

use serde_json::Value;

use crate::edge::FlowEdge;
use crate::error::CoreError;
use crate::node::FlowNode;

/// Parses the `nodes` field of a request. `None` means an empty list.
pub fn nodes_from_value(value: Option<Value>) -> Result<Vec<FlowNode>, CoreError> {
    let items = array_items(value, "nodes")?;
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            node_from_value(item).map_err(|reason| CoreError::InvalidNode { index, reason })
        })
        .collect()
}

/// Parses the `edges` field of a request. `None` means an empty list.
pub fn edges_from_value(value: Option<Value>) -> Result<Vec<FlowEdge>, CoreError> {
    let items = array_items(value, "edges")?;
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(CoreError::InvalidEdge {
                    index,
                    reason: "expected an object".to_string(),
                });
            }
            serde_json::from_value(item).map_err(|e| CoreError::InvalidEdge {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Parses a single node payload.
pub fn node_from_value(value: Value) -> Result<FlowNode, String> {
    if !value.is_object() {
        return Err("expected an object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn array_items(value: Option<Value>, field: &'static str) -> Result<Vec<Value>, CoreError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(CoreError::InvalidArray { field }),
    }
}
