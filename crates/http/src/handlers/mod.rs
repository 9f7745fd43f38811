#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod analyze;
pub mod auth;
pub mod documents;
pub mod export;
pub mod history;

use axum::http::HeaderMap;

use crate::api_error::ApiError;

pub(crate) const SESSION_HEADER: &str = "x-session-id";

/// Pulls the session id out of the `x-session-id` request header.
pub(crate) fn session_id_from(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {SESSION_HEADER} header")))
}
