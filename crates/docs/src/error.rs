use thiserror::Error;

/// Errors from the Drive and Docs APIs.
#[derive(Error, Debug)]
pub enum DocsError {
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

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),
}

impl DocsError {
    /// True when the failure is on our side of the wire (bad token, bad id)
    /// rather than a Google outage.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::HttpStatus { code, .. } => (400..500).contains(code),
            Self::NotFound(_) => true,
            _ => false,
        }
    }
}
