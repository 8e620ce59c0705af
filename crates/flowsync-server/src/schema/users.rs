//! User listing response types.

use serde::Serialize;

use flowsync_storage::UserSummary;

/// Response from `GET /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    /// One entry per stored document. Order is not part of the contract.
    pub users: Vec<UserSummary>,
}
