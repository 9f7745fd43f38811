use crate::error::DocsError;
use crate::types::{DocumentEntry, DocumentRaw, FetchedDocument, FileListResponse, flatten_text};
use retroscope_core::{DEFAULT_DOCS_BASE_URL, DEFAULT_DRIVE_BASE_URL, DOCS_PAGE_SIZE, truncate};

/// Client for the Drive file listing and Docs content APIs.
///
/// Both APIs accept the same OAuth bearer token; they live on different
/// hosts, so the two base URLs are overridable separately.
pub struct DocsClient {
    pub(crate) client: reqwest::Client,
    pub(crate) token: String,
    pub(crate) drive_base_url: String,
    pub(crate) docs_base_url: String,
}

impl std::fmt::Debug for DocsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsClient")
            .field("client", &self.client)
            .field("token", &"***")
            .field("drive_base_url", &self.drive_base_url)
            .field("docs_base_url", &self.docs_base_url)
            .finish()
    }
}

impl DocsClient {
    /// Creates a new client with the given OAuth bearer token.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(token: String) -> Result<Self, DocsError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| DocsError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            token,
            drive_base_url: DEFAULT_DRIVE_BASE_URL.to_owned(),
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_owned(),
        })
    }

    /// Sets a custom Drive API base URL.
    #[must_use]
    pub fn with_drive_base_url(mut self, base_url: &str) -> Self {
        self.drive_base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Sets a custom Docs API base URL.
    #[must_use]
    pub fn with_docs_base_url(mut self, base_url: &str) -> Self {
        self.docs_base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Lists the Google Docs inside a Drive folder, oldest first.
    ///
    /// Only native Docs are returned; uploaded PDFs and the like are filtered
    /// out by the mime type clause. Capped at the most recent page of results.
    ///
    /// # Errors
    /// Returns an error if the request fails, the API returns a non-success
    /// status, or the response body cannot be parsed.
    pub async fn list_documents(&self, folder_id: &str) -> Result<Vec<DocumentEntry>, DocsError> {
        let query = format!(
            "'{folder_id}' in parents and mimeType='application/vnd.google-apps.document'"
        );
        let page_size = DOCS_PAGE_SIZE.to_string();

        let response = self
            .client
            .get(format!("{}/drive/v3/files", self.drive_base_url))
            .bearer_auth(&self.token)
            .query(&[
                ("q", query.as_str()),
                ("pageSize", page_size.as_str()),
                ("fields", "files(id, name, createdTime)"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(DocsError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let listing: FileListResponse =
            serde_json::from_str(&body).map_err(|e| DocsError::JsonParse {
                context: format!("file list response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        let mut entries: Vec<DocumentEntry> = listing
            .files
            .into_iter()
            .map(|file| DocumentEntry {
                id: file.id,
                name: file.name.unwrap_or_default(),
                created_time: file.created_time.unwrap_or_default(),
            })
            .collect();

        // RFC 3339 timestamps order chronologically as strings.
        entries.sort_by(|a, b| a.created_time.cmp(&b.created_time));
        Ok(entries)
    }

    /// Fetches a document and flattens its body to plain text.
    ///
    /// # Errors
    /// Returns [`DocsError::NotFound`] when the document id does not resolve,
    /// and the usual request/status/parse errors otherwise.
    pub async fn fetch_document(&self, document_id: &str) -> Result<FetchedDocument, DocsError> {
        let response = self
            .client
            .get(format!("{}/v1/documents/{document_id}", self.docs_base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DocsError::NotFound(document_id.to_owned()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(DocsError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let document: DocumentRaw =
            serde_json::from_str(&body).map_err(|e| DocsError::JsonParse {
                context: format!("document response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        let text = document
            .body
            .as_ref()
            .map(|body| flatten_text(&body.content))
            .unwrap_or_default();

        Ok(FetchedDocument { title: document.title.unwrap_or_default(), text })
    }
}
