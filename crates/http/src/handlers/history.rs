use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use std::sync::Arc;

use retroscope_core::HistoryScope;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{HistoryFormat, HistoryQuery};

use super::session_id_from;

/// Returns the full stored history for the session's team, regardless of the
/// scope configured for prompt building.
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session_id = session_id_from(&headers)?;
    match query.format {
        HistoryFormat::Block => {
            let block = state.history.block(&session_id, HistoryScope::Full).await?;
            Ok(Json(serde_json::json!({"history": block})))
        },
        HistoryFormat::Records => {
            let records = state.history.records(&session_id).await?;
            Ok(Json(serde_json::json!({"records": records})))
        },
    }
}
