//! Typed error enum for the service layer.
//!
//! Unifies docs, sheets, and LLM failures into a single error type, enabling
//! callers to match on specific failure modes instead of downcasting opaque
//! `anyhow::Error` boxes.

use retroscope_docs::DocsError;
use retroscope_llm::LlmError;
use retroscope_sheets::SheetsError;
use thiserror::Error;

/// Service-layer error unifying upstream and session failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Document store call failed.
    #[error("documents: {0}")]
    Docs(#[from] DocsError),

    /// Spreadsheet call failed.
    #[error("sheet: {0}")]
    Sheets(#[from] SheetsError),

    /// Chat completion call failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Submitted team code matches no configured team.
    #[error("invalid team code")]
    InvalidCode,

    /// Session id does not resolve to a live session.
    #[error("unknown session")]
    UnknownSession,

    /// Team name is not in the configured registry.
    #[error("unknown team: {0}")]
    UnknownTeam(String),

    /// The session already has an analysis in flight.
    #[error("analysis already running for this session")]
    AnalysisInProgress,

    /// Export requested before any analysis completed.
    #[error("no analysis result for this session yet")]
    NoResult,

    /// Caller provided invalid input (empty text, malformed data).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether the chat endpoint refused the call for rate limiting.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Llm(e) if e.is_rate_limited())
    }

    /// Whether this error should be presented as an auth failure.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::InvalidCode | Self::UnknownSession)
    }

    /// Whether an upstream service failed, as opposed to caller error.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Docs(_) | Self::Sheets(_) | Self::Llm(_))
    }
}
