use crate::error::SheetsError;
use crate::rows::{grid_to_records, record_to_row};
use retroscope_core::{
    ColumnNames, DEFAULT_SHEETS_BASE_URL, MeetingRecord, SectionSchema, truncate,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AppendRequest {
    pub values: Vec<Vec<String>>,
}

/// Client for one spreadsheet's values range.
pub struct SheetsClient {
    pub(crate) client: reqwest::Client,
    pub(crate) token: String,
    pub(crate) base_url: String,
    pub(crate) spreadsheet_id: String,
    pub(crate) range: String,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("client", &self.client)
            .field("token", &"***")
            .field("base_url", &self.base_url)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .finish()
    }
}

impl SheetsClient {
    /// Creates a new client bound to one spreadsheet and range.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(token: String, spreadsheet_id: String, range: String) -> Result<Self, SheetsError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| SheetsError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            token,
            base_url: DEFAULT_SHEETS_BASE_URL.to_owned(),
            spreadsheet_id,
            range,
        })
    }

    /// Sets a custom Sheets API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Loads every row in the range and maps it to meeting records.
    ///
    /// Rows are returned in sheet order, which for an append-only sheet is
    /// insertion order.
    ///
    /// # Errors
    /// Returns an error if the request fails, the API returns a non-success
    /// status, or the response body cannot be parsed.
    pub async fn load_records(
        &self,
        columns: &ColumnNames,
        schema: &SectionSchema,
    ) -> Result<Vec<MeetingRecord>, SheetsError> {
        let response = self
            .client
            .get(format!(
                "{}/v4/spreadsheets/{}/values/{}",
                self.base_url, self.spreadsheet_id, self.range
            ))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(SheetsError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let range: ValueRange = serde_json::from_str(&body).map_err(|e| SheetsError::JsonParse {
            context: format!("values response (body: {})", truncate(&body, 200)),
            source: e,
        })?;

        Ok(grid_to_records(&range.values, columns, schema))
    }

    /// Appends one record as a new row after the last row of the range.
    ///
    /// Values go in raw (unparsed by Sheets), so timestamps stay exactly the
    /// text we wrote.
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns a non-success
    /// status.
    pub async fn append_record(
        &self,
        record: &MeetingRecord,
        store_full_text: bool,
    ) -> Result<(), SheetsError> {
        let request = AppendRequest { values: vec![record_to_row(record, store_full_text)] };

        let response = self
            .client
            .post(format!(
                "{}/v4/spreadsheets/{}/values/{}:append",
                self.base_url, self.spreadsheet_id, self.range
            ))
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(SheetsError::HttpStatus { code: status.as_u16(), body });
        }

        Ok(())
    }
}
