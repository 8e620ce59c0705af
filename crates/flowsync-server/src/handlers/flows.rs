//! Flow document handlers (save, load, add node, delete node, delete flow).
//!
//! Every handler checks for the store first, so a process that failed to
//! open its store answers 500 before looking at the request.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use flowsync_core::UserId;

use crate::error::ApiError;
use crate::schema::flows::{
    AddNodeRequest, LoadFlowResponse, MessageResponse, SaveFlowRequest, SaveFlowResponse,
};
use crate::state::AppState;

/// Saves (creates or overwrites) a user's whole flow.
///
/// `POST /api/flow/save`
pub async fn save_flow(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveFlowResponse>, ApiError> {
    let service = state.service()?;
    let req: SaveFlowRequest = object_body(payload)?;
    let (user_id, content) = req.into_parts()?;

    let outcome = service.lock().await.save(&user_id, content)?;
    Ok(Json(SaveFlowResponse {
        message: "Flow data saved successfully".to_string(),
        node_count: outcome.node_count,
        edge_count: outcome.edge_count,
    }))
}

/// Loads a user's flow, or the empty default when none is stored.
///
/// `GET /api/flow/load/{user_id}`
pub async fn load_flow(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<LoadFlowResponse>, ApiError> {
    let service = state.service()?.lock().await;
    let doc = service.get(&UserId(user_id))?;
    Ok(Json(LoadFlowResponse::from(doc)))
}

/// Appends one node to an existing flow.
///
/// `POST /api/flow/node`
pub async fn add_node(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let service = state.service()?;
    let req: AddNodeRequest = object_body(payload)?;
    let (user_id, node) = req.into_parts()?;

    service.lock().await.add_node(&user_id, node)?;
    Ok(Json(MessageResponse::new("Node added successfully")))
}

/// Removes a node and every edge attached to it.
///
/// `DELETE /api/flow/node/{user_id}/{node_id}`
pub async fn delete_node(
    State(state): State<AppState>,
    Path((user_id, node_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut service = state.service()?.lock().await;
    service.remove_node(&UserId(user_id), &node_id)?;
    Ok(Json(MessageResponse::new("Node deleted successfully")))
}

/// Deletes a user's whole flow. Succeeds when nothing was stored.
///
/// `DELETE /api/flow/{user_id}`
pub async fn delete_flow(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut service = state.service()?.lock().await;
    service.delete(&UserId(user_id))?;
    Ok(Json(MessageResponse::new("Flow data deleted successfully")))
}

/// Decodes a request body that must be a JSON object.
///
/// serde's struct derive also accepts a JSON array positionally, so the
/// object check runs on the raw value before the typed decode.
fn object_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    if !value.is_object() {
        return Err(ApiError::BadRequest("Invalid data format".to_string()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}
