//! Core domain types for retroscope
//!
//! Meeting records, the section schema and splitter, history rendering,
//! team sessions, and configuration shared across all other crates.

mod config;
mod constants;
mod env_config;
mod history;
mod record;
mod sections;
mod session;
mod text;

pub use config::*;
pub use constants::*;
pub use env_config::*;
pub use history::*;
pub use record::*;
pub use sections::*;
pub use session::*;
pub use text::*;
