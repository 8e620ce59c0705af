//! Router assembly for the flowsync HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with CORS,
//! tracing, and panic-catching middleware layers.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
/// CORS is permissive (the flow editor is served from other origins).
/// Unmatched paths get a JSON 404; panics become a JSON 500.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Flow documents
        .route("/api/flow/save", post(handlers::flows::save_flow))
        .route("/api/flow/load/{user_id}", get(handlers::flows::load_flow))
        .route("/api/flow/node", post(handlers::flows::add_node))
        .route(
            "/api/flow/node/{user_id}/{node_id}",
            delete(handlers::flows::delete_node),
        )
        .route("/api/flow/{user_id}", delete(handlers::flows::delete_flow))
        // Users
        .route("/api/users", get(handlers::users::list_users))
        .fallback(handlers::fallback::not_found)
        .layer(CatchPanicLayer::custom(handlers::fallback::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
