//! In-memory implementation of [`FlowStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral
//! deployments. Documents live in a `BTreeMap` keyed by user id, with the
//! same semantics as the SQLite backend: server-assigned monotonic
//! `updated_at`, counts recomputed on every write, and absent-document
//! failures for node-level edits.

use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};

use flowsync_core::{FlowContent, FlowDocument, FlowNode, Removal, UserId};

use crate::error::StorageError;
use crate::traits::FlowStore;
use crate::types::UserSummary;

/// In-memory backend. Exclusive access comes from `&mut self`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: BTreeMap<UserId, FlowDocument>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn existing_mut(&mut self, user_id: &UserId) -> Result<&mut FlowDocument, StorageError> {
        self.documents
            .get_mut(user_id)
            .ok_or_else(|| StorageError::DocumentNotFound(user_id.to_string()))
    }
}

/// Write clock, at the same millisecond precision SQLite's `strftime` gives.
fn store_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl FlowStore for InMemoryStore {
    fn put_document(
        &mut self,
        user_id: &UserId,
        content: FlowContent,
    ) -> Result<FlowDocument, StorageError> {
        let now = store_now();
        let mut doc = FlowDocument::from_content(user_id.clone(), content, now);
        if let Some(previous) = self.documents.get(user_id) {
            // Keep updated_at monotonic even if the wall clock steps back.
            doc.updated_at = previous.updated_at.max(now);
        }
        self.documents.insert(user_id.clone(), doc.clone());
        Ok(doc)
    }

    fn get_document(&self, user_id: &UserId) -> Result<Option<FlowDocument>, StorageError> {
        Ok(self.documents.get(user_id).cloned())
    }

    fn delete_document(&mut self, user_id: &UserId) -> Result<bool, StorageError> {
        Ok(self.documents.remove(user_id).is_some())
    }

    fn append_node(
        &mut self,
        user_id: &UserId,
        node: FlowNode,
    ) -> Result<(FlowDocument, bool), StorageError> {
        let doc = self.existing_mut(user_id)?;
        let appended = doc.append_node(node);
        doc.touch(store_now());
        Ok((doc.clone(), appended))
    }

    fn remove_node(
        &mut self,
        user_id: &UserId,
        node_id: &str,
    ) -> Result<(FlowDocument, Removal), StorageError> {
        let doc = self.existing_mut(user_id)?;
        let removal = doc.remove_node(node_id);
        doc.touch(store_now());
        Ok((doc.clone(), removal))
    }

    fn list_documents(&self) -> Result<Vec<UserSummary>, StorageError> {
        Ok(self.documents.values().map(UserSummary::from).collect())
    }
}
