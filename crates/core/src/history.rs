//! Team history aggregation and rendering.
//!
//! Stored rows become the context block that prefixes every chat request.

use serde::{Deserialize, Serialize};

use crate::constants::NO_HISTORY_PLACEHOLDER;
use crate::record::MeetingRecord;

/// How much stored history is fed back into the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryScope {
    /// Only the team's most recent meeting.
    #[default]
    Latest,
    /// Every stored meeting, oldest first.
    Full,
}

/// Keep one team's records, ordered by timestamp ascending.
///
/// Records whose timestamp cell did not parse keep their load order and
/// sort after every parseable record.
#[must_use]
pub fn team_records(records: Vec<MeetingRecord>, team: &str) -> Vec<MeetingRecord> {
    let mut rows: Vec<MeetingRecord> =
        records.into_iter().filter(|r| r.team == team).collect();
    rows.sort_by_key(|r| (r.timestamp.is_none(), r.timestamp));
    rows
}

/// Render the history block fed into the prompt.
///
/// `Latest` renders only the newest record; `Full` renders every record,
/// oldest first, separated by blank lines. No records renders the fixed
/// placeholder, never an error.
#[must_use]
pub fn render_history(records: &[MeetingRecord], scope: HistoryScope) -> String {
    match scope {
        HistoryScope::Latest => records
            .last()
            .map_or_else(|| NO_HISTORY_PLACEHOLDER.to_owned(), render_record),
        HistoryScope::Full => {
            if records.is_empty() {
                NO_HISTORY_PLACEHOLDER.to_owned()
            } else {
                records.iter().map(render_record).collect::<Vec<_>>().join("\n")
            }
        },
    }
}

/// One record as a history entry: `[timestamp] title` plus one
/// `- label: content` line per section.
fn render_record(record: &MeetingRecord) -> String {
    let mut block =
        format!("[{}] {}\n", record.display_timestamp(), record.display_title());
    for (label, value) in record.sections.iter() {
        block.push_str(&format!("- {label}: {value}\n"));
    }
    block
}
