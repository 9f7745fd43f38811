//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into proper HTTP responses with JSON body and status codes.
//! Handlers can return `Result<Json<T>, ApiError>` instead of losing error context
//! with bare `StatusCode`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use retroscope_docs::DocsError;
use retroscope_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Use via `Result<Json<T>, ApiError>` in handlers.
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` variant logs the real error server-side and returns
/// a static message to the client, so no error detail leaks.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input from caller.
    BadRequest(String),
    /// 401 Unauthorized — missing session or bad team code.
    Unauthorized(String),
    /// 404 Not Found — requested resource doesn't exist.
    NotFound(String),
    /// 409 Conflict — another analysis is already running for this session.
    Conflict(String),
    /// 429 Too Many Requests — the chat backend rate-limited us.
    RateLimited(String),
    /// 502 Bad Gateway — a Google or chat API call failed.
    Upstream(String),
    /// 500 Internal Server Error — unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_rate_limited() {
            return Self::RateLimited(
                "chat backend rate limit exceeded, try again shortly".to_owned(),
            );
        }
        match err {
            e @ (ServiceError::InvalidCode | ServiceError::UnknownSession) => {
                Self::Unauthorized(e.to_string())
            },
            ServiceError::UnknownTeam(name) => Self::NotFound(format!("unknown team '{name}'")),
            e @ ServiceError::AnalysisInProgress => Self::Conflict(e.to_string()),
            e @ ServiceError::NoResult => Self::NotFound(e.to_string()),
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Docs(DocsError::NotFound(id)) => {
                Self::NotFound(format!("document '{id}' not found"))
            },
            e @ (ServiceError::Docs(_) | ServiceError::Sheets(_) | ServiceError::Llm(_)) => {
                Self::Upstream(e.to_string())
            },
        }
    }
}
