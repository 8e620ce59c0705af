//! The [`FlowStore`] trait defining the storage contract for flow documents.
//!
//! Every method is one atomic operation against the backing store. The
//! node-level edits (`append_node`, `remove_node`) are read-modify-write
//! internally, and implementations must run the read and the write inside a
//! single transaction or lock scope so concurrent writers cannot interleave.
//!
//! All backends (InMemoryStore, SqliteStore) implement this trait and are
//! swappable without touching the service layer.

use flowsync_core::{FlowContent, FlowDocument, FlowNode, Removal, UserId};

use crate::error::StorageError;
use crate::types::UserSummary;

/// The storage contract for per-user flow documents.
///
/// The trait is synchronous; the server serializes access behind an async
/// mutex, matching the single-connection SQLite backend.
pub trait FlowStore: Send {
    /// Create-or-replace the document for `user_id`.
    ///
    /// Overwrites nodes, edges, and theme, recomputes counts, and assigns a
    /// fresh `updated_at`. Returns the document as stored.
    fn put_document(
        &mut self,
        user_id: &UserId,
        content: FlowContent,
    ) -> Result<FlowDocument, StorageError>;

    /// Loads the document for `user_id`, or `None` when there is none.
    fn get_document(&self, user_id: &UserId) -> Result<Option<FlowDocument>, StorageError>;

    /// Deletes the document for `user_id`.
    ///
    /// Deleting an absent document succeeds. Returns whether a document
    /// existed.
    fn delete_document(&mut self, user_id: &UserId) -> Result<bool, StorageError>;

    /// Appends `node` to an existing document with array-union semantics.
    ///
    /// Fails with [`StorageError::DocumentNotFound`] when no document exists;
    /// nothing is created in that case. Returns the updated document and
    /// whether the node was actually appended.
    fn append_node(
        &mut self,
        user_id: &UserId,
        node: FlowNode,
    ) -> Result<(FlowDocument, bool), StorageError>;

    /// Removes node `node_id` and every edge touching it, atomically.
    ///
    /// Fails with [`StorageError::DocumentNotFound`] when no document exists.
    fn remove_node(
        &mut self,
        user_id: &UserId,
        node_id: &str,
    ) -> Result<(FlowDocument, Removal), StorageError>;

    /// Lists every stored document.
    fn list_documents(&self) -> Result<Vec<UserSummary>, StorageError>;
}
