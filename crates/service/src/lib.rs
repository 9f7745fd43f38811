//! Service layer for retroscope
//!
//! Centralizes business logic between the HTTP/CLI surfaces and the
//! docs/sheets/llm clients.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod analysis_service;
mod error;
mod history_service;
mod session_service;

pub use analysis_service::{AnalysisOutcome, AnalysisService};
pub use error::ServiceError;
pub use history_service::HistoryService;
pub use session_service::{AnalysisGuard, SessionService};
