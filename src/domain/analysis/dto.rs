use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::extraction::ProductInfo;
use crate::domain::review::Review;
use crate::domain::summary::Summary;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub url: String,
    #[serde(default)]
    pub html: Option<String>,
    /// Reviews the client already extracted; takes precedence over `html`
    #[serde(default)]
    pub reviews: Option<Vec<Review>>,
    #[serde(default)]
    pub product: Option<ProductInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub result: Summary,
    pub summary_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessReviewsRequest {
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessReviewsResponse {
    pub success: bool,
    pub result: Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractReviewsResponse {
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReviewsResponse {
    pub has_reviews: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageResponse {
    pub is_product_page: bool,
    pub site: String,
}
