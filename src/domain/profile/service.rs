use async_trait::async_trait;
use chrono::Utc;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::error::ProfileServiceError;
use super::{MeResponse, PaymentProof, Preferences, UserProfile};
use crate::domain::quota::{self, QuotaLimits};
use crate::domain::session::{SessionContext, SessionUser};
use crate::infrastructure::events::{DomainEvent, EventBus};
use crate::infrastructure::repositories::ProfileStore;

pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
    limits: QuotaLimits,
    events: EventBus,
    cache: Option<Cache<Uuid, UserProfile>>,
}

impl ProfileService {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        limits: QuotaLimits,
        events: EventBus,
        cache_enabled: bool,
    ) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(10_000)
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self {
            store,
            limits,
            events,
            cache,
        }
    }
}

#[async_trait]
pub trait ProfileServiceApi: Send + Sync {
    /// Find or create the caller's profile, stamp the login and announce the new auth state
    async fn sign_in(&self, session: &SessionContext) -> Result<UserProfile, ProfileServiceError>;

    async fn sign_out(&self, session: &SessionContext) -> Result<(), ProfileServiceError>;

    /// Current profile with any due counter resets applied and persisted
    async fn load_profile(
        &self,
        session: &SessionContext,
    ) -> Result<UserProfile, ProfileServiceError>;

    async fn can_generate(&self, session: &SessionContext) -> Result<bool, ProfileServiceError>;

    /// Count one generated summary against `profile`.
    ///
    /// The cached copy is updated before the store confirms the write.
    async fn record_usage(
        &self,
        session: &SessionContext,
        profile: UserProfile,
    ) -> Result<UserProfile, ProfileServiceError>;

    async fn upgrade(
        &self,
        session: &SessionContext,
        proof: PaymentProof,
    ) -> Result<UserProfile, ProfileServiceError>;

    async fn update_preferences(
        &self,
        session: &SessionContext,
        preferences: Preferences,
    ) -> Result<UserProfile, ProfileServiceError>;

    async fn me(&self, session: &SessionContext) -> Result<MeResponse, ProfileServiceError>;
}

#[async_trait]
impl ProfileServiceApi for ProfileService {
    async fn sign_in(&self, session: &SessionContext) -> Result<UserProfile, ProfileServiceError> {
        let user = Self::require_user(session)?;
        let now = Utc::now();

        let profile = match self.store.find(user.uid).await? {
            Some(mut existing) => {
                self.store.touch_last_login(user.uid, now).await?;
                existing.last_login_at = now;
                existing
            }
            None => {
                let fresh = UserProfile::new_free(user, self.limits, now);
                let created = self.store.create(&fresh).await?;
                tracing::info!(user_id = %user.uid, email = %user.email, "Created profile");
                created
            }
        };

        let profile = self.apply_rollover(profile).await?;
        self.cache_put(&profile).await;

        tracing::info!(user_id = %user.uid, tier = %profile.subscription_tier, "User signed in");
        self.events.publish(DomainEvent::AuthStateChanged {
            user_id: user.uid,
            user: Some(user.clone()),
            profile: Some(Box::new(profile.clone())),
        });

        Ok(profile)
    }

    async fn sign_out(&self, session: &SessionContext) -> Result<(), ProfileServiceError> {
        let user = Self::require_user(session)?;

        if let Some(cache) = &self.cache {
            cache.invalidate(&user.uid).await;
        }

        tracing::info!(user_id = %user.uid, "User signed out");
        self.events.publish(DomainEvent::AuthStateChanged {
            user_id: user.uid,
            user: None,
            profile: None,
        });

        Ok(())
    }

    async fn load_profile(
        &self,
        session: &SessionContext,
    ) -> Result<UserProfile, ProfileServiceError> {
        let user = Self::require_user(session)?;

        if let Some(cached) = self.cache_get(user.uid).await {
            let profile = self.apply_rollover(cached).await?;
            self.cache_put(&profile).await;
            return Ok(profile);
        }

        let profile = match self.store.find(user.uid).await? {
            Some(profile) => profile,
            // token holders that never called sign-in still get a profile
            None => {
                let fresh = UserProfile::new_free(user, self.limits, Utc::now());
                self.store.create(&fresh).await?
            }
        };

        let profile = self.apply_rollover(profile).await?;
        self.cache_put(&profile).await;
        Ok(profile)
    }

    async fn can_generate(&self, session: &SessionContext) -> Result<bool, ProfileServiceError> {
        let profile = self.load_profile(session).await?;
        Ok(quota::can_generate(&profile))
    }

    async fn record_usage(
        &self,
        session: &SessionContext,
        profile: UserProfile,
    ) -> Result<UserProfile, ProfileServiceError> {
        let user = Self::require_user(session)?;
        let now = Utc::now();

        let updated = quota::record_usage(profile, now);
        self.cache_put(&updated).await;

        self.store
            .increment_usage(user.uid, now)
            .await
            .map_err(|e| ProfileServiceError::Remote(remote_message(e)))?;

        tracing::debug!(
            user_id = %user.uid,
            monthly_used = updated.monthly_summaries_used,
            today_used = updated.today_summaries_used,
            "Recorded summary usage"
        );

        Ok(updated)
    }

    async fn upgrade(
        &self,
        session: &SessionContext,
        proof: PaymentProof,
    ) -> Result<UserProfile, ProfileServiceError> {
        Self::require_user(session)?;
        Self::validate_proof(&proof)?;
        let profile = self.load_profile(session).await?;
        let user_id = profile.id;

        let (updated, change) = quota::upgrade(profile, proof, Utc::now());
        self.cache_put(&updated).await;

        self.store
            .set_subscription(user_id, &change)
            .await
            .map_err(|e| ProfileServiceError::Remote(remote_message(e)))?;

        tracing::info!(
            user_id = %user_id,
            transaction_id = %change.payment.transaction_id,
            ends_at = %change.end_date,
            "Upgraded to pro"
        );

        Ok(updated)
    }

    async fn update_preferences(
        &self,
        session: &SessionContext,
        preferences: Preferences,
    ) -> Result<UserProfile, ProfileServiceError> {
        let mut profile = self.load_profile(session).await?;
        let now = Utc::now();

        self.store
            .update_preferences(profile.id, &preferences, now)
            .await?;

        profile.preferences = sqlx::types::Json(preferences);
        profile.updated_at = now;
        self.cache_put(&profile).await;

        Ok(profile)
    }

    async fn me(&self, session: &SessionContext) -> Result<MeResponse, ProfileServiceError> {
        let profile = self.load_profile(session).await?;
        Ok(MeResponse::from(profile))
    }
}

impl ProfileService {
    fn require_user(session: &SessionContext) -> Result<&SessionUser, ProfileServiceError> {
        session
            .require_user()
            .map_err(ProfileServiceError::from)
    }

    fn validate_proof(proof: &PaymentProof) -> Result<(), ProfileServiceError> {
        if proof.transaction_id.trim().is_empty() {
            return Err(ProfileServiceError::Invalid(
                "transactionId is required".to_string(),
            ));
        }
        if proof.currency.trim().is_empty() {
            return Err(ProfileServiceError::Invalid("currency is required".to_string()));
        }
        if proof.amount.is_sign_negative() {
            return Err(ProfileServiceError::Invalid(
                "amount must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    async fn apply_rollover(&self, profile: UserProfile) -> Result<UserProfile, ProfileServiceError> {
        let (profile, rollover) = quota::reset_if_rolled_over(profile, Utc::now());
        if !rollover.is_empty() {
            self.store.apply_rollover(profile.id, &rollover).await?;
            tracing::debug!(
                user_id = %profile.id,
                monthly = rollover.monthly_reset_at.is_some(),
                daily = rollover.daily_reset_at.is_some(),
                "Reset usage counters"
            );
        }
        Ok(profile)
    }

    async fn cache_get(&self, user_id: Uuid) -> Option<UserProfile> {
        match &self.cache {
            Some(cache) => cache.get(&user_id).await,
            None => None,
        }
    }

    async fn cache_put(&self, profile: &UserProfile) {
        if let Some(cache) = &self.cache {
            cache.insert(profile.id, profile.clone()).await;
        }
    }
}

/// Store errors keep their own message when surfaced as a remote failure
fn remote_message(err: crate::error::AppError) -> String {
    match err {
        crate::error::AppError::RemoteFailure(msg) => msg,
        crate::error::AppError::Database(e) => e.to_string(),
        other => other.to_string(),
    }
}
