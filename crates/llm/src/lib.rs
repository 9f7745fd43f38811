//! LLM integration for retroscope.
//!
//! Builds the analysis prompt from team history and current minutes, calls a
//! chat completion endpoint, and maps the response onto the configured
//! section schema.

mod analysis;
pub(crate) mod ai_types;
mod client;
mod error;

#[cfg(test)]
mod analysis_tests;

pub use analysis::*;
pub use client::*;
pub use error::*;
