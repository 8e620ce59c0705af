//! User enumeration handler.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::schema::users::UserListResponse;
use crate::state::AppState;

/// Lists every user that has a stored flow.
///
/// `GET /api/users`
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let service = state.service()?.lock().await;
    let users = service.list_users()?;
    Ok(Json(UserListResponse { users }))
}
