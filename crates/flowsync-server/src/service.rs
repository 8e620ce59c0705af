//! FlowService: the data access layer between HTTP handlers and the store.
//!
//! All document operations flow through [`FlowService`]. Handlers stay thin:
//! they parse and default request fields, then delegate here. Every
//! operation logs its outcome; failures are logged with full detail before
//! being returned as [`ApiError`].

use flowsync_core::{local_timestamp, FlowContent, FlowDocument, FlowNode, Removal, UserId};
use flowsync_storage::{FlowStore, StorageError, UserSummary};

use crate::error::ApiError;

/// Counts reported back after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub node_count: usize,
    pub edge_count: usize,
}

/// Data access layer over a [`FlowStore`].
pub struct FlowService {
    store: Box<dyn FlowStore>,
}

impl FlowService {
    /// Wraps an already-opened store.
    pub fn new(store: Box<dyn FlowStore>) -> Self {
        FlowService { store }
    }

    /// Creates or fully replaces the document for `user_id`.
    pub fn save(
        &mut self,
        user_id: &UserId,
        content: FlowContent,
    ) -> Result<SaveOutcome, ApiError> {
        let doc = self
            .store
            .put_document(user_id, content)
            .map_err(|e| log_failure("saving flow data", user_id, e))?;
        tracing::info!(
            user_id = %user_id,
            nodes = doc.node_count,
            edges = doc.edge_count,
            "flow data saved"
        );
        Ok(SaveOutcome {
            node_count: doc.node_count,
            edge_count: doc.edge_count,
        })
    }

    /// Loads the document for `user_id`; `Ok(None)` when there is none.
    pub fn get(&self, user_id: &UserId) -> Result<Option<FlowDocument>, ApiError> {
        let doc = self
            .store
            .get_document(user_id)
            .map_err(|e| log_failure("retrieving flow data", user_id, e))?;
        match &doc {
            Some(_) => tracing::info!(user_id = %user_id, "flow data retrieved"),
            None => tracing::info!(user_id = %user_id, "no flow data found"),
        }
        Ok(doc)
    }

    /// Deletes the document for `user_id`. Absent documents are not an error.
    pub fn delete(&mut self, user_id: &UserId) -> Result<(), ApiError> {
        let existed = self
            .store
            .delete_document(user_id)
            .map_err(|e| log_failure("deleting flow data", user_id, e))?;
        tracing::info!(user_id = %user_id, existed, "flow data deleted");
        Ok(())
    }

    /// Stamps `node.data.created_at` and appends it to the user's nodes.
    pub fn add_node(&mut self, user_id: &UserId, mut node: FlowNode) -> Result<(), ApiError> {
        node.stamp_created_at(&local_timestamp())?;
        let node_id = node.id.clone();
        let (doc, appended) = self
            .store
            .append_node(user_id, node)
            .map_err(|e| log_failure("adding node", user_id, e))?;
        if appended {
            tracing::info!(
                user_id = %user_id,
                node_id = %node_id,
                nodes = doc.node_count,
                "node added"
            );
        } else {
            tracing::info!(
                user_id = %user_id,
                node_id = %node_id,
                "identical node already present"
            );
        }
        Ok(())
    }

    /// Removes node `node_id` and every edge that references it.
    pub fn remove_node(&mut self, user_id: &UserId, node_id: &str) -> Result<Removal, ApiError> {
        let (_, removal) = self
            .store
            .remove_node(user_id, node_id)
            .map_err(|e| log_failure("removing node", user_id, e))?;
        tracing::info!(
            user_id = %user_id,
            node_id,
            removed_nodes = removal.nodes,
            removed_edges = removal.edges,
            "node removed"
        );
        Ok(removal)
    }

    /// Summaries of every stored document.
    pub fn list_users(&self) -> Result<Vec<UserSummary>, ApiError> {
        let users = self.store.list_documents().map_err(|e| {
            tracing::error!(error = %e, "error listing users");
            ApiError::from(e)
        })?;
        Ok(users)
    }
}

fn log_failure(action: &str, user_id: &UserId, err: StorageError) -> ApiError {
    if err.is_not_found() {
        tracing::warn!(user_id = %user_id, "{} failed: {}", action, err);
    } else {
        tracing::error!(user_id = %user_id, error = ?err, "error {}", action);
    }
    ApiError::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowsync_core::{FlowEdge, Theme};
    use flowsync_storage::InMemoryStore;
    use serde_json::json;

    fn service() -> FlowService {
        FlowService::new(Box::new(InMemoryStore::new()))
    }

    #[test]
    fn save_reports_array_lengths() {
        let mut svc = service();
        let outcome = svc
            .save(
                &UserId::from("u"),
                FlowContent::new(
                    vec![FlowNode::new("a"), FlowNode::new("b")],
                    vec![FlowEdge::new("a", "b")],
                    Theme::default(),
                ),
            )
            .unwrap();
        assert_eq!(outcome, SaveOutcome { node_count: 2, edge_count: 1 });
    }

    #[test]
    fn add_node_stamps_created_at() {
        let mut svc = service();
        let user = UserId::from("u");
        svc.save(&user, FlowContent::default()).unwrap();
        svc.add_node(&user, FlowNode::new("x").with_field("data", json!({ "label": "X" })))
            .unwrap();

        let doc = svc.get(&user).unwrap().unwrap();
        let data = doc.nodes[0].data().unwrap();
        assert_eq!(data["label"], json!("X"));
        let stamped = data["created_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamped).is_ok());
        assert_eq!(doc.node_count, 1);
    }

    #[test]
    fn add_node_without_document_is_not_found() {
        let mut svc = service();
        let err = svc.add_node(&UserId::from("nobody"), FlowNode::new("x")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn add_node_with_scalar_data_is_bad_request() {
        let mut svc = service();
        let user = UserId::from("u");
        svc.save(&user, FlowContent::default()).unwrap();
        let err = svc
            .add_node(&user, FlowNode::new("x").with_field("data", json!("text")))
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn remove_node_reports_what_was_dropped() {
        let mut svc = service();
        let user = UserId::from("u");
        svc.save(
            &user,
            FlowContent::new(
                vec![FlowNode::new("a"), FlowNode::new("b"), FlowNode::new("c")],
                vec![FlowEdge::new("a", "b"), FlowEdge::new("c", "a"), FlowEdge::new("b", "c")],
                Theme::default(),
            ),
        )
        .unwrap();

        let removal = svc.remove_node(&user, "a").unwrap();
        assert_eq!(removal, Removal { nodes: 1, edges: 2 });
    }
}
