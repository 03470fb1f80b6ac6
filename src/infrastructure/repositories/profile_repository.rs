use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::profile::{Preferences, UserProfile};
use crate::domain::quota::{Rollover, SubscriptionChange};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;

/// Profile documents keyed by user id.
///
/// Updates are partial: each method touches only the fields it names, so two
/// writers racing on different fields do not clobber each other.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Insert a new profile, or return the stored one if it already exists
    async fn create(&self, profile: &UserProfile) -> AppResult<UserProfile>;

    async fn touch_last_login(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// Persist counter resets that fired during a rollover check
    async fn apply_rollover(&self, user_id: Uuid, rollover: &Rollover) -> AppResult<()>;

    /// Add one summary to every usage counter
    async fn increment_usage(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    async fn set_subscription(&self, user_id: Uuid, change: &SubscriptionChange) -> AppResult<()>;

    async fn update_preferences(
        &self,
        user_id: Uuid,
        preferences: &Preferences,
        at: DateTime<Utc>,
    ) -> AppResult<()>;

    async fn ping(&self) -> AppResult<()>;
}

fn profile_not_found(user_id: Uuid) -> AppError {
    AppError::NotFound(format!("Profile {} not found", user_id))
}

pub struct PgProfileRepository {
    pool: Arc<DbPool>,
}

impl PgProfileRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileRepository {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let pool = self.pool.as_ref();
        let profile = sqlx::query_as::<_, UserProfile>("SELECT * FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(profile)
    }

    async fn create(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let pool = self.pool.as_ref();

        // a concurrent first sign-in may have inserted already
        let stored = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO profiles (
                id, email, display_name, photo_url,
                subscription_tier, subscription_status, subscription_start_date, subscription_end_date,
                total_summaries_generated, monthly_summaries_used, monthly_limit, last_monthly_reset,
                today_summaries_used, daily_limit, last_daily_reset, last_summary_at,
                preferences, payment_info, created_at, last_login_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            ON CONFLICT (id) DO UPDATE SET last_login_at = EXCLUDED.last_login_at
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.photo_url)
        .bind(profile.subscription_tier)
        .bind(profile.subscription_status)
        .bind(profile.subscription_start_date)
        .bind(profile.subscription_end_date)
        .bind(profile.total_summaries_generated)
        .bind(profile.monthly_summaries_used)
        .bind(profile.monthly_limit)
        .bind(profile.last_monthly_reset)
        .bind(profile.today_summaries_used)
        .bind(profile.daily_limit)
        .bind(profile.last_daily_reset)
        .bind(profile.last_summary_at)
        .bind(&profile.preferences)
        .bind(&profile.payment_info)
        .bind(profile.created_at)
        .bind(profile.last_login_at)
        .bind(profile.updated_at)
        .fetch_one(pool)
        .await?;

        Ok(stored)
    }

    async fn touch_last_login(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("UPDATE profiles SET last_login_at = $1 WHERE id = $2")
            .bind(at)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(user_id));
        }
        Ok(())
    }

    async fn apply_rollover(&self, user_id: Uuid, rollover: &Rollover) -> AppResult<()> {
        if rollover.is_empty() {
            return Ok(());
        }

        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET monthly_summaries_used = CASE WHEN $1::timestamptz IS NULL THEN monthly_summaries_used ELSE 0 END,
                last_monthly_reset = COALESCE($1, last_monthly_reset),
                today_summaries_used = CASE WHEN $2::timestamptz IS NULL THEN today_summaries_used ELSE 0 END,
                last_daily_reset = COALESCE($2, last_daily_reset),
                updated_at = COALESCE($2, $1, updated_at)
            WHERE id = $3
            "#,
        )
        .bind(rollover.monthly_reset_at)
        .bind(rollover.daily_reset_at)
        .bind(user_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(user_id));
        }
        Ok(())
    }

    async fn increment_usage(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET total_summaries_generated = total_summaries_generated + 1,
                monthly_summaries_used = monthly_summaries_used + 1,
                today_summaries_used = today_summaries_used + 1,
                last_summary_at = $1,
                updated_at = $1
            WHERE id = $2
            "#,
        )
        .bind(at)
        .bind(user_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(user_id));
        }
        Ok(())
    }

    async fn set_subscription(&self, user_id: Uuid, change: &SubscriptionChange) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET subscription_tier = $1,
                subscription_status = $2,
                subscription_end_date = $3,
                payment_info = $4,
                updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(change.tier)
        .bind(change.status)
        .bind(change.end_date)
        .bind(Json(&change.payment))
        .bind(change.payment.payment_date)
        .bind(user_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(user_id));
        }
        Ok(())
    }

    async fn update_preferences(
        &self,
        user_id: Uuid,
        preferences: &Preferences,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            "UPDATE profiles SET preferences = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(Json(preferences))
        .bind(at)
        .bind(user_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(user_id));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
