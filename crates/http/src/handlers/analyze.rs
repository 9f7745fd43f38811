use axum::{Json, extract::State, http::HeaderMap};
use std::sync::Arc;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::AnalyzeRequest;
use crate::response_types::AnalyzeResponse;

use super::session_id_from;

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let session_id = session_id_from(&headers)?;
    let outcome = state.analysis.analyze(&session_id, &req.document_id).await?;
    Ok(Json(outcome.into()))
}
