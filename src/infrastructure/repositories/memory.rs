//! In-process stores used when no database is configured, and by tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sqlx::types::Json;
use std::collections::HashMap;
use uuid::Uuid;

use super::{ProfileStore, SummaryHistoryStore};
use crate::domain::history::SummaryRecord;
use crate::domain::profile::{Preferences, UserProfile};
use crate::domain::quota::{Rollover, SubscriptionChange};
use crate::error::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a stored profile wholesale
    pub fn put(&self, profile: UserProfile) {
        self.profiles.write().insert(profile.id, profile);
    }

    fn update<F>(&self, user_id: Uuid, apply: F) -> AppResult<()>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profiles = self.profiles.write();
        let profile = profiles
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user_id)))?;
        apply(profile);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.read().get(&user_id).cloned())
    }

    async fn create(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write();
        let stored = profiles
            .entry(profile.id)
            .and_modify(|existing| existing.last_login_at = profile.last_login_at)
            .or_insert_with(|| profile.clone());
        Ok(stored.clone())
    }

    async fn touch_last_login(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        self.update(user_id, |profile| profile.last_login_at = at)
    }

    async fn apply_rollover(&self, user_id: Uuid, rollover: &Rollover) -> AppResult<()> {
        if rollover.is_empty() {
            return Ok(());
        }

        self.update(user_id, |profile| {
            if let Some(at) = rollover.monthly_reset_at {
                profile.monthly_summaries_used = 0;
                profile.last_monthly_reset = at;
            }
            if let Some(at) = rollover.daily_reset_at {
                profile.today_summaries_used = 0;
                profile.last_daily_reset = at;
            }
            if let Some(at) = rollover.daily_reset_at.or(rollover.monthly_reset_at) {
                profile.updated_at = at;
            }
        })
    }

    async fn increment_usage(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        self.update(user_id, |profile| {
            profile.total_summaries_generated += 1;
            profile.monthly_summaries_used += 1;
            profile.today_summaries_used += 1;
            profile.last_summary_at = Some(at);
            profile.updated_at = at;
        })
    }

    async fn set_subscription(&self, user_id: Uuid, change: &SubscriptionChange) -> AppResult<()> {
        self.update(user_id, |profile| {
            profile.subscription_tier = change.tier;
            profile.subscription_status = change.status;
            profile.subscription_end_date = Some(change.end_date);
            profile.payment_info = Some(Json(change.payment.clone()));
            profile.updated_at = change.payment.payment_date;
        })
    }

    async fn update_preferences(
        &self,
        user_id: Uuid,
        preferences: &Preferences,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.update(user_id, |profile| {
            profile.preferences = Json(preferences.clone());
            profile.updated_at = at;
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySummaryStore {
    records: RwLock<Vec<SummaryRecord>>,
}

impl InMemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl SummaryHistoryStore for InMemorySummaryStore {
    async fn append(&self, record: &SummaryRecord) -> AppResult<()> {
        self.records.write().push(record.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<SummaryRecord>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let mut records: Vec<SummaryRecord> = self
            .records
            .read()
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();

        // newest first; equal timestamps keep the later append first
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }
}
