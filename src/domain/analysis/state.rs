use serde::Serialize;
use uuid::Uuid;

use crate::domain::summary::Summary;

/// Popup view states driven by an analysis run
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum AnalysisState {
    Loading,
    #[serde(rename_all = "camelCase")]
    Summary { summary: Summary, summary_id: Uuid },
    NoReviews,
    Upgrade,
    Error { message: String },
}

impl AnalysisState {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisState::Loading => "loading",
            AnalysisState::Summary { .. } => "summary",
            AnalysisState::NoReviews => "noReviews",
            AnalysisState::Upgrade => "upgrade",
            AnalysisState::Error { .. } => "error",
        }
    }
}
