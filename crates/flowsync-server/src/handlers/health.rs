//! Liveness endpoint.

use axum::extract::State;
use axum::Json;

use crate::schema::health::HealthResponse;
use crate::state::AppState;

/// `GET /health`
///
/// Answers even when the store is unavailable; `firebase_connected` tells
/// the caller which mode the process is in.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        firebase_connected: state.store_connected(),
        timestamp: flowsync_core::local_timestamp(),
    })
}
