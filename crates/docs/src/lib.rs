//! Google Drive and Docs access for retroscope.
//!
//! Lists the meeting documents inside a team's Drive folder and fetches a
//! document's plain text for analysis.

mod client;
mod error;
mod types;

#[cfg(test)]
mod client_tests;

pub use client::*;
pub use error::*;
pub use types::*;
