use std::sync::Arc;

use retroscope_core::{
    AppConfig, MeetingRecord, SectionMap, TeamConfig, render_history, team_records,
};
use retroscope_docs::{DocsClient, DocumentEntry};
use retroscope_llm::{AnalysisInput, LlmClient};
use retroscope_sheets::SheetsClient;

use crate::error::ServiceError;
use crate::session_service::SessionService;

/// Runs the document-to-spreadsheet analysis pipeline.
pub struct AnalysisService {
    config: Arc<AppConfig>,
    sessions: Arc<SessionService>,
    docs: Arc<DocsClient>,
    sheets: Arc<SheetsClient>,
    llm: Arc<LlmClient>,
}

/// What one analysis run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub document_title: String,
    pub analysis: String,
    pub sections: SectionMap,
    pub saved: bool,
    pub skipped_duplicate: bool,
}

impl AnalysisService {
    #[must_use]
    pub const fn new(
        config: Arc<AppConfig>,
        sessions: Arc<SessionService>,
        docs: Arc<DocsClient>,
        sheets: Arc<SheetsClient>,
        llm: Arc<LlmClient>,
    ) -> Self {
        Self { config, sessions, docs, sheets, llm }
    }

    /// Lists the documents in the folder of the session's team, oldest first.
    pub async fn list_documents(
        &self,
        session_id: &str,
    ) -> Result<Vec<DocumentEntry>, ServiceError> {
        let session = self.sessions.get(session_id)?;
        self.list_documents_for_team(&session.team).await
    }

    pub async fn list_documents_for_team(
        &self,
        team_name: &str,
    ) -> Result<Vec<DocumentEntry>, ServiceError> {
        let team = self.team(team_name)?;
        Ok(self.docs.list_documents(&team.folder_id).await?)
    }

    /// Analyzes one document for a logged-in session.
    ///
    /// Holds the session's busy flag for the whole run; a second analyze on
    /// the same session is rejected until this one finishes.
    pub async fn analyze(
        &self,
        session_id: &str,
        document_id: &str,
    ) -> Result<AnalysisOutcome, ServiceError> {
        let session = self.sessions.get(session_id)?;
        let team = self.team(&session.team)?.clone();
        let _guard = self.sessions.begin_analysis(session_id)?;
        self.run(&team, document_id, Some(session_id)).await
    }

    /// Analyzes one document for a team directly, without a session.
    ///
    /// One-shot path for the CLI.
    pub async fn analyze_for_team(
        &self,
        team_name: &str,
        document_id: &str,
    ) -> Result<AnalysisOutcome, ServiceError> {
        let team = self.team(team_name)?.clone();
        self.run(&team, document_id, None).await
    }

    async fn run(
        &self,
        team: &TeamConfig,
        document_id: &str,
        session_id: Option<&str>,
    ) -> Result<AnalysisOutcome, ServiceError> {
        let document_id = document_id.trim();
        if document_id.is_empty() {
            return Err(ServiceError::InvalidInput("document id must not be empty".to_owned()));
        }

        if self.config.submit_delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.submit_delay_ms))
                .await;
        }

        let document = self.docs.fetch_document(document_id).await?;
        if let Some(id) = session_id {
            self.sessions.set_meeting(id, &document.title, &document.text);
        }

        let records =
            self.sheets.load_records(&self.config.columns, &self.config.sections).await?;
        let history = team_records(records, &team.name);
        let history_block = render_history(&history, self.config.history_scope);

        let output = self
            .llm
            .analyze_minutes(AnalysisInput {
                instruction: &self.config.instruction,
                schema: &self.config.sections,
                history_block: &history_block,
                meeting_text: &document.text,
                response_mode: self.config.response_mode,
            })
            .await?;

        if let Some(id) = session_id {
            self.sessions.set_result(id, &output.analysis);
        }

        let full_text = self.config.store_full_text.then(|| document.text.clone());
        let record = MeetingRecord::new(
            team.name.clone(),
            document.title.clone(),
            output.sections.clone(),
            full_text,
        );

        let skipped_duplicate = if self.config.skip_duplicates {
            if !self.config.store_full_text {
                tracing::warn!("skip_duplicates without store_full_text compares titles only");
            }
            is_duplicate(&history, &record)
        } else {
            false
        };

        let saved = if skipped_duplicate {
            tracing::info!(
                "Skipping duplicate row for team '{}': '{}'",
                team.name,
                record.display_title()
            );
            false
        } else {
            self.sheets.append_record(&record, self.config.store_full_text).await?;
            true
        };

        Ok(AnalysisOutcome {
            document_title: document.title,
            analysis: output.analysis,
            sections: output.sections,
            saved,
            skipped_duplicate,
        })
    }

    fn team(&self, name: &str) -> Result<&TeamConfig, ServiceError> {
        self.config.team(name).ok_or_else(|| ServiceError::UnknownTeam(name.to_owned()))
    }
}

/// A stored row counts as a duplicate when the title matches and, where both
/// sides carry the full text, the text matches too.
fn is_duplicate(history: &[MeetingRecord], candidate: &MeetingRecord) -> bool {
    history.iter().any(|stored| {
        if stored.title != candidate.title {
            return false;
        }
        match (&stored.full_text, &candidate.full_text) {
            (Some(stored_text), Some(candidate_text)) => stored_text == candidate_text,
            _ => true,
        }
    })
}
