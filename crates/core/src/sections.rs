//! Section schema and the label splitter.
//!
//! Analysis output is divided into named sections by scanning for literal
//! label strings. The splitter is a best-effort heuristic, not a parser:
//! a label's literal text occurring inside another section's prose will
//! truncate that section early. Accepted limitation, pinned by tests.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Invalid label vocabulary in configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("section schema must contain at least one label")]
    Empty,

    #[error("section schema contains a blank label")]
    BlankLabel,

    #[error("duplicate section label: {0}")]
    DuplicateLabel(String),
}

/// Ordered, fixed label vocabulary the analysis output is split into.
///
/// Labels double as spreadsheet column headers, so their order is part of
/// the stored-row contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SectionSchema {
    labels: Vec<String>,
}

impl SectionSchema {
    /// Validates and builds a schema from an ordered label list.
    ///
    /// # Errors
    /// Returns an error if the list is empty, contains a blank label, or
    /// contains the same label twice.
    pub fn new(labels: Vec<String>) -> Result<Self, SchemaError> {
        if labels.is_empty() {
            return Err(SchemaError::Empty);
        }
        for (i, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(SchemaError::BlankLabel);
            }
            if labels[..i].contains(label) {
                return Err(SchemaError::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self { labels })
    }

    /// The labels in schema order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Split free text into one span per label.
    ///
    /// A label's span starts immediately after the label's first occurrence
    /// and ends at the earliest following occurrence of any other label, or
    /// end of text. Spans are trimmed. A label absent from the text maps to
    /// the empty string. Later occurrences of the same label do not anchor
    /// anything.
    #[must_use]
    pub fn split(&self, text: &str) -> SectionMap {
        let entries = self
            .labels
            .iter()
            .map(|label| {
                let value = match text.find(label.as_str()) {
                    Some(pos) => {
                        let after = &text[pos + label.len()..];
                        let mut end = after.len();
                        for other in &self.labels {
                            if other == label {
                                continue;
                            }
                            if let Some(p) = after.find(other.as_str()) {
                                end = end.min(p);
                            }
                        }
                        after[..end].trim().to_owned()
                    },
                    None => String::new(),
                };
                (label.clone(), value)
            })
            .collect();
        SectionMap { entries }
    }

    /// Conform arbitrary label/content pairs to this schema.
    ///
    /// Keys of the result equal the schema's labels exactly: pairs for
    /// unknown labels are dropped, labels without a pair map to the empty
    /// string. The last pair wins when a label is supplied twice.
    #[must_use]
    pub fn conform<I>(&self, pairs: I) -> SectionMap
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries: Vec<(String, String)> =
            self.labels.iter().map(|l| (l.clone(), String::new())).collect();
        for (label, value) in pairs {
            if let Some(entry) = entries.iter_mut().find(|(l, _)| *l == label) {
                entry.1 = value.trim().to_owned();
            }
        }
        SectionMap { entries }
    }
}

impl Default for SectionSchema {
    /// The shipped vocabulary: the three feedback sections the shared sheet
    /// was provisioned with.
    fn default() -> Self {
        Self {
            labels: vec![
                "잘한 점".to_owned(),
                "개선점".to_owned(),
                "다음 회의 추천".to_owned(),
            ],
        }
    }
}

impl TryFrom<Vec<String>> for SectionSchema {
    type Error = SchemaError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<SectionSchema> for Vec<String> {
    fn from(schema: SectionSchema) -> Self {
        schema.labels
    }
}

/// Ordered mapping from every schema label to its extracted span.
///
/// Built by [`SectionSchema::split`] or [`SectionSchema::conform`], so keys
/// always equal the producing schema's label set and absent content is the
/// empty string, never a missing key. Serializes as a JSON object in label
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<(String, String)>,
}

impl SectionMap {
    /// Content for one label, if the label is part of the map.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, v)| v.as_str())
    }

    /// Iterate `(label, content)` in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SectionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionMapVisitor;

        impl<'de> Visitor<'de> for SectionMapVisitor {
            type Value = SectionMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of section labels to content")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, value)) = access.next_entry::<String, String>()? {
                    entries.push((label, value));
                }
                Ok(SectionMap { entries })
            }
        }

        deserializer.deserialize_map(SectionMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(labels: &[&str]) -> SectionSchema {
        SectionSchema::new(labels.iter().map(|s| (*s).to_owned()).collect()).expect("valid schema")
    }

    #[test]
    fn keys_equal_label_set_exactly() {
        let s = schema(&["Wins", "Risks", "Next steps"]);
        let map = s.split("Wins\nshipped the importer\nNext steps\nplan the demo");
        let keys: Vec<&str> = map.iter().map(|(l, _)| l).collect();
        assert_eq!(keys, vec!["Wins", "Risks", "Next steps"]);
    }

    #[test]
    fn missing_label_yields_empty_string() {
        let s = schema(&["Wins", "Risks"]);
        let map = s.split("Wins\nshipped the importer");
        assert_eq!(map.get("Risks"), Some(""));
    }

    #[test]
    fn adjacent_labels_extract_trimmed_span_between() {
        let s = schema(&["Wins", "Risks"]);
        let map = s.split("Wins\n  shipped the importer  \nRisks\nnone");
        assert_eq!(map.get("Wins"), Some("shipped the importer"));
        assert_eq!(map.get("Risks"), Some("none"));
    }

    #[test]
    fn only_first_occurrence_anchors() {
        let s = schema(&["Wins", "Risks"]);
        let map = s.split("Wins\nfirst\nWins\nsecond\nRisks\nnone");
        assert_eq!(map.get("Wins"), Some("first\nWins\nsecond"));
    }

    #[test]
    fn label_text_inside_prose_truncates() {
        // the splitter is literal: "Risks" inside the Wins prose ends the span
        let s = schema(&["Wins", "Risks"]);
        let map = s.split("Wins\nwe discussed Risks mitigation\nRisks\nnone");
        assert_eq!(map.get("Wins"), Some("we discussed"));
    }

    #[test]
    fn splits_korean_label_set() {
        let s = schema(&["잘한 점", "개선점", "다음 회의 추천"]);
        let map = s.split("잘한 점\n협업이 좋았다\n개선점\n시간관리가 부족했다");
        assert_eq!(map.get("잘한 점"), Some("협업이 좋았다"));
        assert_eq!(map.get("개선점"), Some("시간관리가 부족했다"));
        assert_eq!(map.get("다음 회의 추천"), Some(""));
    }

    #[test]
    fn label_at_end_of_text_yields_empty_span() {
        let s = schema(&["Wins", "Risks"]);
        let map = s.split("Wins\nshipped\nRisks");
        assert_eq!(map.get("Risks"), Some(""));
    }

    #[test]
    fn conform_fills_missing_and_drops_unknown() {
        let s = schema(&["Wins", "Risks"]);
        let map = s.conform(vec![
            ("Risks".to_owned(), " latency ".to_owned()),
            ("Bogus".to_owned(), "dropped".to_owned()),
        ]);
        assert_eq!(map.get("Wins"), Some(""));
        assert_eq!(map.get("Risks"), Some("latency"));
        assert_eq!(map.get("Bogus"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn serializes_as_object_in_schema_order() {
        let s = schema(&["b", "a"]);
        let map = s.split("b\none\na\ntwo");
        let json = serde_json::to_string(&map).expect("serialize");
        assert_eq!(json, r#"{"b":"one","a":"two"}"#);
    }

    #[test]
    fn deserializes_from_object() {
        let map: SectionMap = serde_json::from_str(r#"{"Wins":"shipped","Risks":""}"#)
            .expect("deserialize");
        assert_eq!(map.get("Wins"), Some("shipped"));
        assert_eq!(map.get("Risks"), Some(""));
    }

    #[test]
    fn rejects_empty_label_list() {
        assert_eq!(SectionSchema::new(vec![]), Err(SchemaError::Empty));
    }

    #[test]
    fn rejects_blank_label() {
        let labels = vec!["Wins".to_owned(), "   ".to_owned()];
        assert_eq!(SectionSchema::new(labels), Err(SchemaError::BlankLabel));
    }

    #[test]
    fn rejects_duplicate_label() {
        let labels = vec!["Wins".to_owned(), "Wins".to_owned()];
        assert_eq!(
            SectionSchema::new(labels),
            Err(SchemaError::DuplicateLabel("Wins".to_owned()))
        );
    }

    #[test]
    fn schema_deserializes_from_label_array() {
        let s: SectionSchema = serde_json::from_str(r#"["Wins","Risks"]"#).expect("deserialize");
        assert_eq!(s.labels(), ["Wins".to_owned(), "Risks".to_owned()]);
    }

    #[test]
    fn schema_rejects_duplicate_in_json() {
        let result: Result<SectionSchema, _> = serde_json::from_str(r#"["Wins","Wins"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn default_schema_matches_sheet_columns() {
        let s = SectionSchema::default();
        assert_eq!(s.labels(), ["잘한 점", "개선점", "다음 회의 추천"]);
    }
}
