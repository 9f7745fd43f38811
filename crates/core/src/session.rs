//! Team sessions.
//!
//! A session is created on successful login and lives in memory until
//! logout. It carries the working state of the most recent analysis so
//! the export endpoint can serve it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSession {
    pub id: String,
    pub team: String,
    /// Extracted text of the most recently analyzed document.
    pub meeting_text: String,
    /// Raw chat response of the most recent analysis.
    pub result_text: String,
    /// Title of the most recently analyzed document.
    pub selected_document: String,
    pub started_at: DateTime<Utc>,
    /// Set while an analysis is running; concurrent submits are rejected.
    pub busy: bool,
}

impl TeamSession {
    #[must_use]
    pub fn new(id: String, team: String) -> Self {
        Self {
            id,
            team,
            meeting_text: String::new(),
            result_text: String::new(),
            selected_document: String::new(),
            started_at: Utc::now(),
            busy: false,
        }
    }

    /// Whether an analysis has completed in this session.
    #[must_use]
    pub fn has_result(&self) -> bool {
        !self.result_text.is_empty()
    }
}
