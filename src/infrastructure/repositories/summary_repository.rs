use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::history::SummaryRecord;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;

/// Append-only summary history
#[async_trait]
pub trait SummaryHistoryStore: Send + Sync {
    async fn append(&self, record: &SummaryRecord) -> AppResult<()>;

    /// Most recent first, at most `limit` records
    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<SummaryRecord>>;
}

pub struct PgSummaryRepository {
    pool: Arc<DbPool>,
}

impl PgSummaryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryHistoryStore for PgSummaryRepository {
    async fn append(&self, record: &SummaryRecord) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO summaries (
                id, user_id, title, url, site, image, summary,
                review_count, avg_rating, sentiment_score, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.product_info.title)
        .bind(&record.product_info.url)
        .bind(&record.product_info.site)
        .bind(&record.product_info.image)
        .bind(&record.summary)
        .bind(record.metadata.review_count)
        .bind(&record.metadata.avg_rating)
        .bind(record.metadata.sentiment_score)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<SummaryRecord>> {
        let pool = self.pool.as_ref();
        let records = sqlx::query_as::<_, SummaryRecord>(
            r#"
            SELECT id, user_id, title, url, site, image, summary,
                   review_count, avg_rating, sentiment_score, created_at
            FROM summaries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
