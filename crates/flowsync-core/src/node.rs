//! Flow editor nodes.
//!
//! A [`FlowNode`] only interprets its `id`. Every other field the editor
//! sends (`type`, `position`, `data`, `style`, ...) is carried verbatim in
//! [`FlowNode::fields`] so a stored node round-trips unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Key under which editor payload lives on a node.
pub const DATA_FIELD: &str = "data";

/// Key stamped into a node's data when it is added on its own.
pub const CREATED_AT_FIELD: &str = "created_at";

/// A graph vertex as sent by the flow editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Node identifier, referenced by edge `source`/`target`.
    pub id: String,
    /// All remaining fields, preserved as-is.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FlowNode {
    pub fn new(id: impl Into<String>) -> Self {
        FlowNode {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style helper for attaching a field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// The node's `data` object, if it has one.
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.fields.get(DATA_FIELD).and_then(Value::as_object)
    }

    /// Writes `data.created_at = timestamp`, creating `data` when absent.
    pub fn stamp_created_at(&mut self, timestamp: &str) -> Result<(), CoreError> {
        let data = self
            .fields
            .entry(DATA_FIELD)
            .or_insert_with(|| Value::Object(Map::new()));
        if data.is_null() {
            *data = Value::Object(Map::new());
        }
        match data.as_object_mut() {
            Some(map) => {
                map.insert(
                    CREATED_AT_FIELD.to_string(),
                    Value::String(timestamp.to_string()),
                );
                Ok(())
            }
            None => Err(CoreError::NodeDataNotObject {
                id: self.id.clone(),
            }),
        }
    }
}

/// Current local time in ISO-8601, as stamped into `data.created_at`.
pub fn local_timestamp() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_round_trip() {
        let raw = json!({
            "id": "n1",
            "type": "input",
            "position": { "x": 10, "y": 20 },
            "data": { "label": "Start" }
        });
        let node: FlowNode = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(node.id, "n1");
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }

    #[test]
    fn stamp_creates_missing_data() {
        let mut node = FlowNode::new("n1");
        node.stamp_created_at("2026-01-01T00:00:00").unwrap();
        assert_eq!(
            node.data().unwrap()["created_at"],
            json!("2026-01-01T00:00:00")
        );
    }

    #[test]
    fn stamp_keeps_existing_data_fields() {
        let mut node = FlowNode::new("n1").with_field("data", json!({ "label": "A" }));
        node.stamp_created_at("ts").unwrap();
        let data = node.data().unwrap();
        assert_eq!(data["label"], json!("A"));
        assert_eq!(data["created_at"], json!("ts"));
    }

    #[test]
    fn stamp_rejects_scalar_data() {
        let mut node = FlowNode::new("n1").with_field("data", json!(42));
        let err = node.stamp_created_at("ts").unwrap_err();
        assert!(matches!(err, CoreError::NodeDataNotObject { .. }));
    }

    #[test]
    fn local_timestamp_parses_as_rfc3339() {
        let ts = local_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok(), "{ts}");
    }
}
