use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use std::sync::Arc;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::LoginRequest;
use crate::response_types::LoginResponse;

use super::session_id_from;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = state.sessions.login(&req.code)?;
    Ok(Json(LoginResponse { session_id: session.id, team: session.team }))
}

/// Logout is idempotent: an unknown or missing session id still returns 204.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> StatusCode {
    if let Ok(session_id) = session_id_from(&headers) {
        state.sessions.logout(&session_id);
    }
    StatusCode::NO_CONTENT
}
