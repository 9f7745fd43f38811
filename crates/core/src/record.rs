//! Stored meeting records.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::{TIMESTAMP_FORMAT, UNTITLED_PLACEHOLDER};
use crate::sections::SectionMap;

/// One stored analysis: a row of the shared sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    /// Parsed timestamp; `None` when the stored cell does not match the wire format.
    pub timestamp: Option<NaiveDateTime>,
    /// The timestamp cell as written.
    pub timestamp_raw: String,
    pub team: String,
    pub title: String,
    pub sections: SectionMap,
    /// Extracted minutes text, present when the full-text column is stored.
    pub full_text: Option<String>,
}

impl MeetingRecord {
    /// Record for a just-completed analysis, stamped with the current local time.
    #[must_use]
    pub fn new(
        team: String,
        title: String,
        sections: SectionMap,
        full_text: Option<String>,
    ) -> Self {
        let now = Local::now().naive_local();
        Self {
            timestamp: Some(now),
            timestamp_raw: format_timestamp(now),
            team,
            title,
            sections,
            full_text,
        }
    }

    /// Timestamp for display: the parsed value formatted, or the raw cell as written.
    #[must_use]
    pub fn display_timestamp(&self) -> String {
        self.timestamp.map_or_else(|| self.timestamp_raw.clone(), format_timestamp)
    }

    /// Title for display, substituting the placeholder for an empty cell.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_PLACEHOLDER
        } else {
            &self.title
        }
    }
}

/// Parse a timestamp cell. Cells not matching the wire format yield `None`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

/// Format a timestamp in the wire format of the timestamp column.
#[must_use]
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}
