use std::sync::Arc;

use retroscope_core::{AppConfig, HistoryScope, MeetingRecord, render_history, team_records};
use retroscope_sheets::SheetsClient;

use crate::error::ServiceError;
use crate::session_service::SessionService;

/// Read-side access to a team's accumulated meeting history.
pub struct HistoryService {
    config: Arc<AppConfig>,
    sessions: Arc<SessionService>,
    sheets: Arc<SheetsClient>,
}

impl HistoryService {
    #[must_use]
    pub const fn new(
        config: Arc<AppConfig>,
        sessions: Arc<SessionService>,
        sheets: Arc<SheetsClient>,
    ) -> Self {
        Self { config, sessions, sheets }
    }

    /// Stored records for the session's team, oldest first.
    pub async fn records(&self, session_id: &str) -> Result<Vec<MeetingRecord>, ServiceError> {
        let session = self.sessions.get(session_id)?;
        self.records_for_team(&session.team).await
    }

    pub async fn records_for_team(
        &self,
        team_name: &str,
    ) -> Result<Vec<MeetingRecord>, ServiceError> {
        if self.config.team(team_name).is_none() {
            return Err(ServiceError::UnknownTeam(team_name.to_owned()));
        }
        let records =
            self.sheets.load_records(&self.config.columns, &self.config.sections).await?;
        Ok(team_records(records, team_name))
    }

    /// The rendered history block for the session's team.
    pub async fn block(
        &self,
        session_id: &str,
        scope: HistoryScope,
    ) -> Result<String, ServiceError> {
        let session = self.sessions.get(session_id)?;
        self.block_for_team(&session.team, scope).await
    }

    pub async fn block_for_team(
        &self,
        team_name: &str,
        scope: HistoryScope,
    ) -> Result<String, ServiceError> {
        let records = self.records_for_team(team_name).await?;
        Ok(render_history(&records, scope))
    }
}
