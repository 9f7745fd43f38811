//! Shared constants for retroscope.
//!
//! Centralizes strings and limits that would otherwise be duplicated across crates.

/// Wire format of the timestamp column in the shared sheet.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default worksheet range when the config does not name one.
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1";

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";

/// Default chat endpoint base URL.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com";

/// Default base URL for the document-listing API.
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com";

/// Default base URL for the document-content API.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.googleapis.com";

/// Default base URL for the spreadsheet API.
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// Maximum number of documents requested from a team folder per listing.
pub const DOCS_PAGE_SIZE: u32 = 10;

/// Header line introducing the aggregated history block in the chat prompt.
pub const HISTORY_BLOCK_HEADER: &str = "[Meeting history]";

/// Header line introducing the current minutes in the chat prompt.
pub const CURRENT_BLOCK_HEADER: &str = "[Current meeting minutes]";

/// Fixed text used in place of the history block when a team has no stored rows.
pub const NO_HISTORY_PLACEHOLDER: &str =
    "No previous meeting summaries for this team. Treat this as the first meeting.";

/// System-prompt instruction used when the config file does not supply one.
pub const DEFAULT_INSTRUCTION: &str = "You are a feedback assistant for student project teams. \
Read the team's accumulated meeting history and the current meeting minutes, then write \
educational feedback that helps the team collaborate better in the next meeting.";

/// Shown for a stored row whose title cell is empty.
pub const UNTITLED_PLACEHOLDER: &str = "(untitled)";
