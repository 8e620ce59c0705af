//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse` to produce `{"error": "<message>"}` bodies
//! with the matching status code. No machine-readable error codes are
//! exposed; clients only see the message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Message returned on every data route when the store failed to open.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "Document store not initialized";

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input (400).
    #[error("{0}")]
    BadRequest(String),

    /// The addressed document does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The store could not be opened at startup (500, permanent).
    #[error("Document store not initialized")]
    StoreUnavailable,

    /// A store operation failed (500).
    #[error("{0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

impl From<flowsync_core::CoreError> for ApiError {
    fn from(err: flowsync_core::CoreError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<flowsync_storage::StorageError> for ApiError {
    fn from(err: flowsync_storage::StorageError) -> Self {
        match &err {
            flowsync_storage::StorageError::DocumentNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}
