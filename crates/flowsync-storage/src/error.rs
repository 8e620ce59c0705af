//! Storage error types for flowsync-storage.
//!
//! [`StorageError`] separates "the document does not exist" from every
//! other failure so callers never have to guess which one happened.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A SQLite call failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization or deserialization of a stored array failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// No document is stored for the given user.
    #[error("no flow document for user '{0}'")]
    DocumentNotFound(String),

    /// A stored row could not be turned back into a document.
    #[error("corrupt document for user '{user_id}': {reason}")]
    Corrupt { user_id: String, reason: String },
}

impl StorageError {
    /// Returns `true` for the absent-document case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::DocumentNotFound(_))
    }
}
