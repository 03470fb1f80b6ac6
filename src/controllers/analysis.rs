use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::analysis::{AnalysisServiceApi, AnalyzeRequest, AnalyzeResponse};
use crate::domain::history::SummaryRecord;
use crate::domain::session::SessionContext;
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

pub struct AnalysisController {
    analysis_service: Arc<dyn AnalysisServiceApi>,
}

impl AnalysisController {
    pub fn new(analysis_service: Arc<dyn AnalysisServiceApi>) -> Self {
        Self { analysis_service }
    }

    /// POST /api/analyze - Quota-checked summary of a page
    pub async fn analyze(
        State(controller): State<Arc<AnalysisController>>,
        Extension(session): Extension<SessionContext>,
        Json(request): Json<AnalyzeRequest>,
    ) -> AppResult<Json<AnalyzeResponse>> {
        let response = controller.analysis_service.analyze(&session, request).await?;
        Ok(Json(response))
    }

    /// GET /api/summaries?limit= - Caller's recent summaries
    pub async fn history(
        State(controller): State<Arc<AnalysisController>>,
        Extension(session): Extension<SessionContext>,
        Query(query): Query<HistoryQuery>,
    ) -> AppResult<Json<Vec<SummaryRecord>>> {
        let records = controller
            .analysis_service
            .history(&session, query.limit)
            .await?;
        Ok(Json(records))
    }
}
