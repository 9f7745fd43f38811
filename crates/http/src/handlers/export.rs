use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::AppState;
use crate::api_error::ApiError;

use super::session_id_from;

/// Downloads the latest analysis as a plain-text attachment.
pub async fn export(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let session_id = session_id_from(&headers)?;
    let text = state.sessions.export_text(&session_id)?;
    let response_headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
        (header::CONTENT_DISPOSITION, "attachment; filename=\"meeting_feedback.txt\""),
    ];
    Ok((response_headers, text).into_response())
}
