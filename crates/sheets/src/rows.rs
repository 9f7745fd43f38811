use retroscope_core::{ColumnNames, MeetingRecord, SectionSchema, parse_timestamp};
use serde_json::Value;

/// Renders a single cell as text.
///
/// The values API normally returns strings, but unformatted reads can yield
/// numbers or booleans. Those are rendered through their JSON form.
#[must_use]
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Maps a raw sheet grid to meeting records.
///
/// The first row is the header; columns are located by name, so column order
/// in the sheet does not matter. A sheet whose header lacks the timestamp or
/// team column cannot be attributed to teams at all and maps to no records.
/// Other missing columns degrade to blank fields.
#[must_use]
pub fn grid_to_records(
    values: &[Vec<Value>],
    columns: &ColumnNames,
    schema: &SectionSchema,
) -> Vec<MeetingRecord> {
    let Some((header_row, data_rows)) = values.split_first() else {
        return Vec::new();
    };
    let header: Vec<String> =
        header_row.iter().map(|cell| cell_text(cell).trim().to_owned()).collect();
    let find = |name: &str| header.iter().position(|h| h == name);

    let Some(timestamp_idx) = find(&columns.timestamp) else {
        tracing::warn!("Sheet header has no '{}' column; ignoring all rows", columns.timestamp);
        return Vec::new();
    };
    let Some(team_idx) = find(&columns.team) else {
        tracing::warn!("Sheet header has no '{}' column; ignoring all rows", columns.team);
        return Vec::new();
    };
    let title_idx = find(&columns.title);
    if title_idx.is_none() {
        tracing::warn!("Sheet header has no '{}' column; titles will be blank", columns.title);
    }
    let full_text_idx = find(&columns.full_text);

    let label_indices: Vec<(&str, Option<usize>)> =
        schema.labels().iter().map(|label| (label.as_str(), find(label))).collect();
    for (label, idx) in &label_indices {
        if idx.is_none() {
            tracing::warn!("Sheet header has no '{label}' column; that section will be blank");
        }
    }

    data_rows
        .iter()
        .map(|row| {
            let cell = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();
            let timestamp_raw = cell(timestamp_idx);
            let pairs = label_indices
                .iter()
                .map(|(label, idx)| ((*label).to_owned(), idx.map(&cell).unwrap_or_default()));
            MeetingRecord {
                timestamp: parse_timestamp(&timestamp_raw),
                team: cell(team_idx),
                title: title_idx.map(&cell).unwrap_or_default(),
                sections: schema.conform(pairs),
                full_text: full_text_idx.map(&cell),
                timestamp_raw,
            }
        })
        .collect()
}

/// Builds the row appended to the sheet for a freshly analyzed meeting.
///
/// Column order is fixed: timestamp, team, title, one cell per section in
/// schema order, then the full minutes text when storing it is enabled. This
/// must stay in step with the provisioned header row.
#[must_use]
pub fn record_to_row(record: &MeetingRecord, store_full_text: bool) -> Vec<String> {
    let mut row = vec![record.timestamp_raw.clone(), record.team.clone(), record.title.clone()];
    for (_, value) in record.sections.iter() {
        row.push(value.to_owned());
    }
    if store_full_text {
        row.push(record.full_text.clone().unwrap_or_default());
    }
    row
}
