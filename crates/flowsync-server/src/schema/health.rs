//! Health check response type.

use serde::Serialize;

/// Response from `GET /health`. Always returned with 200.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Whether the document store opened at startup. The field keeps the
    /// name existing editor clients already read.
    pub firebase_connected: bool,
    /// Local ISO-8601 time the check ran.
    pub timestamp: String,
}
