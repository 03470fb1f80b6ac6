use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::extraction::ProductInfo;
use crate::domain::summary::Summary;

/// One stored analysis run
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(flatten)]
    pub product_info: ProductInfo,
    pub summary: Json<Summary>,
    pub created_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub metadata: SummaryMetadata,
}

/// Denormalized headline numbers kept next to the summary
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadata {
    pub review_count: i32,
    pub avg_rating: String,
    pub sentiment_score: i32,
}

impl SummaryRecord {
    pub fn new(user_id: Uuid, product_info: ProductInfo, summary: Summary, now: DateTime<Utc>) -> Self {
        let metadata = SummaryMetadata {
            review_count: i32::try_from(summary.total_reviews).unwrap_or(i32::MAX),
            avg_rating: summary.avg_rating.to_string(),
            sentiment_score: i32::from(summary.sentiment.percentage),
        };

        Self {
            id: Uuid::new_v4(),
            user_id,
            product_info,
            summary: Json(summary),
            created_at: now,
            metadata,
        }
    }
}
