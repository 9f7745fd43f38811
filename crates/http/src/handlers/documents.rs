use axum::{Json, extract::State, http::HeaderMap};
use std::sync::Arc;

use retroscope_docs::DocumentEntry;

use crate::AppState;
use crate::api_error::ApiError;

use super::session_id_from;

pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<DocumentEntry>>, ApiError> {
    let session_id = session_id_from(&headers)?;
    let documents = state.analysis.list_documents(&session_id).await?;
    Ok(Json(documents))
}
