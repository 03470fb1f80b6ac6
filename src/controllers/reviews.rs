use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::analysis::{
    AnalysisServiceApi, CheckReviewsResponse, ExtractReviewsResponse, ProcessReviewsRequest,
    ProcessReviewsResponse, ProductPageResponse,
};
use crate::domain::extraction::{is_product_page, PageSnapshot, SiteId};
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct ProductPageQuery {
    pub url: String,
}

/// Stateless page and review actions; no session required
pub struct ReviewsController {
    analysis_service: Arc<dyn AnalysisServiceApi>,
}

impl ReviewsController {
    pub fn new(analysis_service: Arc<dyn AnalysisServiceApi>) -> Self {
        Self { analysis_service }
    }

    /// POST /api/reviews/extract
    pub async fn extract(
        State(controller): State<Arc<ReviewsController>>,
        Json(page): Json<PageSnapshot>,
    ) -> AppResult<Json<ExtractReviewsResponse>> {
        let reviews = controller.analysis_service.extract_reviews(page).await;
        Ok(Json(ExtractReviewsResponse { reviews }))
    }

    /// POST /api/reviews/check
    pub async fn check(
        State(controller): State<Arc<ReviewsController>>,
        Json(page): Json<PageSnapshot>,
    ) -> AppResult<Json<CheckReviewsResponse>> {
        let has_reviews = controller.analysis_service.check_reviews(page).await;
        Ok(Json(CheckReviewsResponse { has_reviews }))
    }

    /// POST /api/reviews/process
    pub async fn process(
        State(controller): State<Arc<ReviewsController>>,
        Json(request): Json<ProcessReviewsRequest>,
    ) -> AppResult<Json<ProcessReviewsResponse>> {
        let result = controller
            .analysis_service
            .process_reviews(request.reviews)
            .await;
        Ok(Json(ProcessReviewsResponse {
            success: true,
            result,
        }))
    }

    /// GET /api/pages/product?url=
    pub async fn product_page(
        Query(query): Query<ProductPageQuery>,
    ) -> AppResult<Json<ProductPageResponse>> {
        Ok(Json(ProductPageResponse {
            is_product_page: is_product_page(&query.url),
            site: SiteId::from_url(&query.url).to_string(),
        }))
    }
}
