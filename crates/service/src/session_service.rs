use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use retroscope_core::{AppConfig, TeamSession};

use crate::error::ServiceError;

/// In-memory session registry keyed by session id.
///
/// Sessions live for the lifetime of the process; a restart logs every team
/// out, which is acceptable for a classroom tool.
pub struct SessionService {
    config: Arc<AppConfig>,
    sessions: RwLock<HashMap<String, TeamSession>>,
}

impl SessionService {
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config, sessions: RwLock::new(HashMap::new()) }
    }

    /// Exchanges a team code for a new session.
    ///
    /// The code is shared within a team, so several live sessions may belong
    /// to the same team. The code itself is never logged.
    pub fn login(&self, code: &str) -> Result<TeamSession, ServiceError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ServiceError::InvalidCode);
        }
        let team = self.config.team_for_code(code).ok_or(ServiceError::InvalidCode)?;
        let session = TeamSession::new(uuid::Uuid::new_v4().to_string(), team.name.clone());
        self.write().insert(session.id.clone(), session.clone());
        tracing::info!("Team '{}' logged in", team.name);
        Ok(session)
    }

    /// Drops a session. Returns whether one existed.
    pub fn logout(&self, session_id: &str) -> bool {
        self.write().remove(session_id).is_some()
    }

    pub fn get(&self, session_id: &str) -> Result<TeamSession, ServiceError> {
        self.read().get(session_id).cloned().ok_or(ServiceError::UnknownSession)
    }

    /// Records which document the session is analyzing and its text.
    pub fn set_meeting(&self, session_id: &str, document_name: &str, text: &str) {
        if let Some(session) = self.write().get_mut(session_id) {
            session.selected_document = document_name.to_owned();
            session.meeting_text = text.to_owned();
        }
    }

    /// Stores the raw analysis result on the session.
    pub fn set_result(&self, session_id: &str, result: &str) {
        if let Some(session) = self.write().get_mut(session_id) {
            session.result_text = result.to_owned();
        }
    }

    /// Marks the session busy for the duration of one analysis run.
    ///
    /// The returned guard clears the flag on drop, so the flag cannot leak
    /// past an early return or a failed pipeline step.
    pub fn begin_analysis(
        self: &Arc<Self>,
        session_id: &str,
    ) -> Result<AnalysisGuard, ServiceError> {
        let mut sessions = self.write();
        let session = sessions.get_mut(session_id).ok_or(ServiceError::UnknownSession)?;
        if session.busy {
            return Err(ServiceError::AnalysisInProgress);
        }
        session.busy = true;
        Ok(AnalysisGuard { sessions: Arc::clone(self), session_id: session_id.to_owned() })
    }

    /// The session's last analysis as exportable text, newlines normalized.
    pub fn export_text(&self, session_id: &str) -> Result<String, ServiceError> {
        let session = self.get(session_id)?;
        if !session.has_result() {
            return Err(ServiceError::NoResult);
        }
        let mut text: String =
            session.result_text.lines().collect::<Vec<_>>().join("\n");
        text.push('\n');
        Ok(text)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, TeamSession>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, TeamSession>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the busy flag of one session when dropped.
pub struct AnalysisGuard {
    sessions: Arc<SessionService>,
    session_id: String,
}

impl Drop for AnalysisGuard {
    fn drop(&mut self) {
        if let Some(session) = self.sessions.write().get_mut(&self.session_id) {
            session.busy = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retroscope_core::TeamConfig;

    fn service() -> Arc<SessionService> {
        let mut config = AppConfig::default();
        config.teams = vec![
            TeamConfig {
                name: "알파".to_owned(),
                code: "1234".to_owned(),
                folder_id: "folder-a".to_owned(),
            },
            TeamConfig {
                name: "베타".to_owned(),
                code: "5678".to_owned(),
                folder_id: "folder-b".to_owned(),
            },
        ];
        Arc::new(SessionService::new(Arc::new(config)))
    }

    #[test]
    fn login_with_valid_code_creates_session() {
        let sessions = service();

        let session = sessions.login("5678").unwrap();
        assert_eq!(session.team, "베타");
        assert!(!session.id.is_empty());

        let fetched = sessions.get(&session.id).unwrap();
        assert_eq!(fetched.team, "베타");
    }

    #[test]
    fn login_trims_the_submitted_code() {
        let sessions = service();
        let session = sessions.login("  1234 ").unwrap();
        assert_eq!(session.team, "알파");
    }

    #[test]
    fn login_rejects_unknown_and_empty_codes() {
        let sessions = service();

        assert!(matches!(sessions.login("0000"), Err(ServiceError::InvalidCode)));
        assert!(matches!(sessions.login(""), Err(ServiceError::InvalidCode)));
        assert!(matches!(sessions.login("   "), Err(ServiceError::InvalidCode)));
    }

    #[test]
    fn logout_drops_the_session() {
        let sessions = service();
        let session = sessions.login("1234").unwrap();

        assert!(sessions.logout(&session.id));
        assert!(!sessions.logout(&session.id));
        assert!(matches!(sessions.get(&session.id), Err(ServiceError::UnknownSession)));
    }

    #[test]
    fn busy_flag_blocks_concurrent_analysis_until_guard_drops() {
        let sessions = service();
        let session = sessions.login("1234").unwrap();

        let guard = sessions.begin_analysis(&session.id).unwrap();
        assert!(matches!(
            sessions.begin_analysis(&session.id),
            Err(ServiceError::AnalysisInProgress)
        ));

        drop(guard);
        let second = sessions.begin_analysis(&session.id);
        assert!(second.is_ok());
    }

    #[test]
    fn export_requires_a_result() {
        let sessions = service();
        let session = sessions.login("1234").unwrap();

        assert!(matches!(sessions.export_text(&session.id), Err(ServiceError::NoResult)));

        sessions.set_result(&session.id, "잘한 점\r\n참석률이 높았습니다.\r\n개선점\n기록");
        let text = sessions.export_text(&session.id).unwrap();
        assert_eq!(text, "잘한 점\n참석률이 높았습니다.\n개선점\n기록\n");
    }

    #[test]
    fn meeting_state_is_stored_on_the_session() {
        let sessions = service();
        let session = sessions.login("1234").unwrap();

        sessions.set_meeting(&session.id, "3월 1주차 회의", "회의 내용");
        sessions.set_result(&session.id, "피드백");

        let fetched = sessions.get(&session.id).unwrap();
        assert_eq!(fetched.selected_document, "3월 1주차 회의");
        assert_eq!(fetched.meeting_text, "회의 내용");
        assert!(fetched.has_result());
    }
}
