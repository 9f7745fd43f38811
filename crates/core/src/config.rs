//! Service configuration.
//!
//! Structural configuration (teams, sheet layout, prompt, policies) lives in
//! a JSON file; connection secrets stay in the environment. The default file
//! location is `<user config dir>/retroscope/config.json`, overridable with
//! `RETROSCOPE_CONFIG` or an explicit `--config` argument.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_INSTRUCTION, DEFAULT_SHEET_RANGE};
use crate::history::HistoryScope;
use crate::sections::SectionSchema;

/// Env var naming an explicit config file path.
pub const CONFIG_ENV: &str = "RETROSCOPE_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot resolve a config path: {0}")]
    NotFound(String),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {path}: {reason}")]
    Invalid { path: String, reason: String },
}

/// One team in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    /// Shared login code. Plain comparison; not a security boundary.
    pub code: String,
    /// Document-store folder holding the team's meeting documents.
    pub folder_id: String,
}

/// Header names of the sheet's fixed (non-section) columns.
///
/// Defaults match the headers the shared sheet was provisioned with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub timestamp: String,
    pub team: String,
    pub title: String,
    pub full_text: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            timestamp: "시간".to_owned(),
            team: "팀명".to_owned(),
            title: "회의록 제목".to_owned(),
            full_text: "회의록 전문".to_owned(),
        }
    }
}

/// How the chat endpoint is asked to shape its reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Free text, divided by the section splitter.
    #[default]
    Text,
    /// JSON object keyed by section label; any parse failure falls back to
    /// the splitter on the raw text.
    Json,
}

/// Service configuration, deserialized from the JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Team registry: login codes and document folders.
    pub teams: Vec<TeamConfig>,
    /// Spreadsheet holding one row per analysis.
    pub spreadsheet_id: String,
    /// Worksheet range read and appended.
    pub sheet_range: String,
    pub columns: ColumnNames,
    /// Ordered section labels; also the sheet's section column headers.
    pub sections: SectionSchema,
    /// System-prompt instruction prefixed to every chat request.
    pub instruction: String,
    pub history_scope: HistoryScope,
    pub response_mode: ResponseMode,
    /// Skip the append when the team already stored an identical
    /// (title, full text) row.
    pub skip_duplicates: bool,
    /// Store the extracted minutes in the full-text column.
    pub store_full_text: bool,
    /// Fixed delay inserted before the external calls of an analysis, in ms.
    pub submit_delay_ms: u64,
    /// Base URL overrides for the document and spreadsheet APIs.
    pub drive_base_url: Option<String>,
    pub docs_base_url: Option<String>,
    pub sheets_base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            teams: Vec::new(),
            spreadsheet_id: String::new(),
            sheet_range: DEFAULT_SHEET_RANGE.to_owned(),
            columns: ColumnNames::default(),
            sections: SectionSchema::default(),
            instruction: DEFAULT_INSTRUCTION.to_owned(),
            history_scope: HistoryScope::default(),
            response_mode: ResponseMode::default(),
            skip_duplicates: false,
            store_full_text: true,
            submit_delay_ms: 0,
            drive_base_url: None,
            docs_base_url: None,
            sheets_base_url: None,
        }
    }
}

impl AppConfig {
    /// Per-user default config file location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("retroscope").join("config.json"))
    }

    /// Resolve the config path: explicit argument, then `RETROSCOPE_CONFIG`,
    /// then the per-user default location.
    ///
    /// # Errors
    /// Returns an error when no explicit path is given and the platform has
    /// no user config directory.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(p) = explicit {
            return Ok(p.to_path_buf());
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            if !p.is_empty() {
                return Ok(PathBuf::from(p));
            }
        }
        Self::default_path()
            .ok_or_else(|| ConfigError::NotFound("no user config directory available".to_owned()))
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, is not valid JSON, or
    /// fails validation (no teams, duplicate team names, missing sheet id).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: shown.clone(), source })?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::Parse { path: shown.clone(), source })?;
        config.validate(&shown)?;
        Ok(config)
    }

    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid { path: path.to_owned(), reason };
        if self.teams.is_empty() {
            return Err(invalid("no teams configured".to_owned()));
        }
        for (i, team) in self.teams.iter().enumerate() {
            if team.name.trim().is_empty() {
                return Err(invalid("team with an empty name".to_owned()));
            }
            if self.teams[..i].iter().any(|t| t.name == team.name) {
                return Err(invalid(format!("duplicate team name: {}", team.name)));
            }
        }
        if self.spreadsheet_id.trim().is_empty() {
            return Err(invalid("spreadsheet_id is required".to_owned()));
        }
        Ok(())
    }

    /// Look up a team by name.
    #[must_use]
    pub fn team(&self, name: &str) -> Option<&TeamConfig> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// First team whose login code matches, if any.
    #[must_use]
    pub fn team_for_code(&self, code: &str) -> Option<&TeamConfig> {
        self.teams.iter().find(|t| t.code == code)
    }
}
