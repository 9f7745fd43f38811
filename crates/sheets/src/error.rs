use thiserror::Error;

/// Errors from the Sheets values API.
#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("API returned error status {code}: {body}")]
    HttpStatus { code: u16, body: String },

    #[error("Failed to parse {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),
}
