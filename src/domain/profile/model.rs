use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::quota::QuotaLimits;
use crate::domain::session::SessionUser;

/// Account document: identity, subscription and quota counters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub subscription_status: SubscriptionStatus,
    pub subscription_start_date: DateTime<Utc>,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub total_summaries_generated: i32,
    pub monthly_summaries_used: i32,
    pub monthly_limit: i32,
    pub last_monthly_reset: DateTime<Utc>,
    pub today_summaries_used: i32,
    pub daily_limit: i32,
    pub last_daily_reset: DateTime<Utc>,
    pub last_summary_at: Option<DateTime<Utc>>,
    pub preferences: Json<Preferences>,
    pub payment_info: Option<Json<PaymentInfo>>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "pro")]
    Pro,
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "free"),
            SubscriptionTier::Pro => write!(f, "pro"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "expired")]
    Expired,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionStatus::Active => write!(f, "active"),
            SubscriptionStatus::Expired => write!(f, "expired"),
            SubscriptionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Popup preferences stored alongside the profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub auto_analyze: bool,
    pub show_notifications: bool,
    pub theme: String,
    pub default_summary_length: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_analyze: false,
            show_notifications: true,
            theme: "light".to_string(),
            default_summary_length: "medium".to_string(),
        }
    }
}

/// What the client claims it paid. Nothing here is verified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProof {
    pub transaction_id: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Payment record kept on the profile after an upgrade
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub transaction_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub payment_date: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh free-tier profile for a first sign-in
    pub fn new_free(user: &SessionUser, limits: QuotaLimits, now: DateTime<Utc>) -> Self {
        Self {
            id: user.uid,
            email: user.email.clone(),
            display_name: user
                .display_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "User".to_string()),
            photo_url: user.photo_url.clone(),
            subscription_tier: SubscriptionTier::Free,
            subscription_status: SubscriptionStatus::Active,
            subscription_start_date: now,
            subscription_end_date: None,
            total_summaries_generated: 0,
            monthly_summaries_used: 0,
            monthly_limit: limits.monthly,
            last_monthly_reset: now,
            today_summaries_used: 0,
            daily_limit: limits.daily,
            last_daily_reset: now,
            last_summary_at: None,
            preferences: Json(Preferences::default()),
            payment_info: None,
            created_at: now,
            last_login_at: now,
            updated_at: now,
        }
    }

    /// Pro tier with an active subscription
    pub fn is_pro(&self) -> bool {
        self.subscription_tier == SubscriptionTier::Pro
            && self.subscription_status == SubscriptionStatus::Active
    }
}
