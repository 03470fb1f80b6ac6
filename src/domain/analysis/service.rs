use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::error::AnalysisServiceError;
use super::{AnalyzeRequest, AnalyzeResponse, AnalysisState};
use crate::domain::extraction::{PageSnapshot, ProductInfo, ReviewExtractor};
use crate::domain::history::{clamp_limit, SummaryRecord};
use crate::domain::profile::ProfileServiceApi;
use crate::domain::quota;
use crate::domain::review::{retain_valid, Review};
use crate::domain::session::SessionContext;
use crate::domain::summary::{summarize, Summary};
use crate::infrastructure::events::{DomainEvent, EventBus};
use crate::infrastructure::repositories::SummaryHistoryStore;

const QUOTA_MESSAGE: &str = "Summary limit reached. Upgrade to Pro for unlimited summaries.";

/// History page sizes
#[derive(Debug, Clone, Copy)]
pub struct HistoryLimits {
    pub default: i64,
    pub max: i64,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            default: 10,
            max: 50,
        }
    }
}

pub struct AnalysisService {
    profiles: Arc<dyn ProfileServiceApi>,
    history: Arc<dyn SummaryHistoryStore>,
    extractor: Arc<ReviewExtractor>,
    events: EventBus,
    history_limits: HistoryLimits,
}

impl AnalysisService {
    pub fn new(
        profiles: Arc<dyn ProfileServiceApi>,
        history: Arc<dyn SummaryHistoryStore>,
        extractor: Arc<ReviewExtractor>,
        events: EventBus,
        history_limits: HistoryLimits,
    ) -> Self {
        Self {
            profiles,
            history,
            extractor,
            events,
            history_limits,
        }
    }
}

#[async_trait]
pub trait AnalysisServiceApi: Send + Sync {
    /// Reviews found on a captured page, after the length filter
    async fn extract_reviews(&self, page: PageSnapshot) -> Vec<Review>;

    async fn check_reviews(&self, page: PageSnapshot) -> bool;

    /// Score reviews without touching quota or history
    async fn process_reviews(&self, reviews: Vec<Review>) -> Summary;

    /// Full run for a signed-in user.
    ///
    /// Quota is checked before any work; usage is only recorded once a summary
    /// exists. Every state change is published on the analysis topic.
    async fn analyze(
        &self,
        session: &SessionContext,
        request: AnalyzeRequest,
    ) -> Result<AnalyzeResponse, AnalysisServiceError>;

    async fn history(
        &self,
        session: &SessionContext,
        limit: Option<i64>,
    ) -> Result<Vec<SummaryRecord>, AnalysisServiceError>;
}

#[async_trait]
impl AnalysisServiceApi for AnalysisService {
    async fn extract_reviews(&self, page: PageSnapshot) -> Vec<Review> {
        self.extractor.extract(&page)
    }

    async fn check_reviews(&self, page: PageSnapshot) -> bool {
        self.extractor.has_reviews(&page)
    }

    async fn process_reviews(&self, reviews: Vec<Review>) -> Summary {
        let reviews = retain_valid(reviews);
        tracing::debug!(count = reviews.len(), "Processing reviews");
        summarize(&reviews)
    }

    async fn analyze(
        &self,
        session: &SessionContext,
        request: AnalyzeRequest,
    ) -> Result<AnalyzeResponse, AnalysisServiceError> {
        let user_id = session
            .require_user()
            .map_err(AnalysisServiceError::from)?
            .uid;

        if request.reviews.is_none() && request.html.is_none() {
            return Err(AnalysisServiceError::Invalid(
                "Either html or reviews is required".to_string(),
            ));
        }

        match self.run(session, user_id, request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                match &err {
                    // these already published their own state
                    AnalysisServiceError::QuotaExceeded(_) | AnalysisServiceError::NoReviewsFound => {}
                    other => {
                        tracing::error!(user_id = %user_id, error = %other, "Analysis failed");
                        self.publish_state(
                            user_id,
                            AnalysisState::Error {
                                message: other.to_string(),
                            },
                        );
                    }
                }
                Err(err)
            }
        }
    }

    async fn history(
        &self,
        session: &SessionContext,
        limit: Option<i64>,
    ) -> Result<Vec<SummaryRecord>, AnalysisServiceError> {
        let user = session.require_user().map_err(AnalysisServiceError::from)?;
        let limit = clamp_limit(limit, self.history_limits.default, self.history_limits.max);

        let records = self.history.list_for_user(user.uid, limit).await?;
        Ok(records)
    }
}

impl AnalysisService {
    async fn run(
        &self,
        session: &SessionContext,
        user_id: Uuid,
        request: AnalyzeRequest,
    ) -> Result<AnalyzeResponse, AnalysisServiceError> {
        let profile = self.profiles.load_profile(session).await?;

        if !quota::can_generate(&profile) {
            tracing::info!(
                user_id = %user_id,
                monthly_used = profile.monthly_summaries_used,
                today_used = profile.today_summaries_used,
                "Quota exhausted"
            );
            self.publish_state(user_id, AnalysisState::Upgrade);
            return Err(AnalysisServiceError::QuotaExceeded(QUOTA_MESSAGE.to_string()));
        }

        self.publish_state(user_id, AnalysisState::Loading);

        let AnalyzeRequest {
            url,
            html,
            reviews,
            product,
        } = request;

        let page = html.map(|html| PageSnapshot {
            url: url.clone(),
            html,
        });

        let reviews = match (reviews, &page) {
            (Some(reviews), _) => retain_valid(reviews),
            (None, Some(page)) => self.extractor.extract(page),
            (None, None) => Vec::new(),
        };

        if reviews.is_empty() {
            self.publish_state(user_id, AnalysisState::NoReviews);
            return Err(AnalysisServiceError::NoReviewsFound);
        }

        let summary = summarize(&reviews);

        self.profiles.record_usage(session, profile).await?;

        let product = product
            .or_else(|| page.as_ref().map(|p| self.extractor.product_info(p)))
            .unwrap_or_else(|| ProductInfo::unknown(&url));
        let record = SummaryRecord::new(user_id, product, summary.clone(), Utc::now());
        self.history.append(&record).await?;

        tracing::info!(
            user_id = %user_id,
            summary_id = %record.id,
            reviews = summary.total_reviews,
            sentiment = summary.sentiment.percentage,
            "Generated summary"
        );

        self.publish_state(
            user_id,
            AnalysisState::Summary {
                summary: summary.clone(),
                summary_id: record.id,
            },
        );

        Ok(AnalyzeResponse {
            result: summary,
            summary_id: record.id,
        })
    }

    fn publish_state(&self, user_id: Uuid, state: AnalysisState) {
        self.events
            .publish(DomainEvent::AnalysisStateChanged { user_id, state });
    }
}
