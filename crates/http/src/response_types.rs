//! Response types (Serialize)

use serde::Serialize;

use retroscope_core::SectionMap;
use retroscope_service::AnalysisOutcome;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub session_id: String,
    pub team: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub document_title: String,
    pub analysis: String,
    pub sections: SectionMap,
    pub saved: bool,
    pub skipped_duplicate: bool,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            document_title: outcome.document_title,
            analysis: outcome.analysis,
            sections: outcome.sections,
            saved: outcome.saved,
            skipped_duplicate: outcome.skipped_duplicate,
        }
    }
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
