//! Usage-quota ledger: pure transitions over a [`UserProfile`].
//!
//! The ledger never talks to the store. Callers persist the partial updates it
//! returns. Check-then-increment is not atomic across sessions of the same
//! account; two sessions can both pass `can_generate` and push a free profile
//! one past its limit.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Serialize, Serializer};
use sqlx::types::Json;

use crate::domain::profile::{PaymentInfo, PaymentProof, SubscriptionStatus, SubscriptionTier, UserProfile};

/// Classification of a profile against its limits
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuotaState {
    FreeUnderLimit,
    FreeAtLimit,
    Pro,
}

/// Counter stamps that fired during a rollover check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rollover {
    pub monthly_reset_at: Option<DateTime<Utc>>,
    pub daily_reset_at: Option<DateTime<Utc>>,
}

impl Rollover {
    pub fn is_empty(&self) -> bool {
        self.monthly_reset_at.is_none() && self.daily_reset_at.is_none()
    }
}

/// Subscription fields written by an upgrade
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionChange {
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    pub end_date: DateTime<Utc>,
    pub payment: PaymentInfo,
}

/// Remaining allowance for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Unlimited,
    Count(i32),
}

impl Serialize for Remaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Remaining::Unlimited => serializer.serialize_str("unlimited"),
            Remaining::Count(count) => serializer.serialize_i32(*count),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RemainingUsage {
    pub monthly: Remaining,
    pub daily: Remaining,
}

/// Pro bypasses both limits; free needs headroom on both counters.
pub fn can_generate(profile: &UserProfile) -> bool {
    if profile.subscription_tier == SubscriptionTier::Pro {
        return true;
    }

    profile.monthly_summaries_used < profile.monthly_limit
        && profile.today_summaries_used < profile.daily_limit
}

pub fn quota_state(profile: &UserProfile) -> QuotaState {
    if profile.subscription_tier == SubscriptionTier::Pro {
        QuotaState::Pro
    } else if can_generate(profile) {
        QuotaState::FreeUnderLimit
    } else {
        QuotaState::FreeAtLimit
    }
}

/// Count one generated summary against every counter.
pub fn record_usage(mut profile: UserProfile, now: DateTime<Utc>) -> UserProfile {
    profile.total_summaries_generated += 1;
    profile.monthly_summaries_used += 1;
    profile.today_summaries_used += 1;
    profile.last_summary_at = Some(now);
    profile.updated_at = now;
    profile
}

/// Zero counters whose calendar period (UTC) has rolled over since their last reset.
///
/// The monthly and daily checks are independent and may both fire.
pub fn reset_if_rolled_over(mut profile: UserProfile, now: DateTime<Utc>) -> (UserProfile, Rollover) {
    let mut rollover = Rollover::default();

    let last_monthly = profile.last_monthly_reset;
    if now.year() != last_monthly.year() || now.month() != last_monthly.month() {
        profile.monthly_summaries_used = 0;
        profile.last_monthly_reset = now;
        rollover.monthly_reset_at = Some(now);
    }

    if now.date_naive() != profile.last_daily_reset.date_naive() {
        profile.today_summaries_used = 0;
        profile.last_daily_reset = now;
        rollover.daily_reset_at = Some(now);
    }

    if !rollover.is_empty() {
        profile.updated_at = now;
    }

    (profile, rollover)
}

/// Move the profile to an active pro subscription for one calendar month.
///
/// The payment proof is recorded as given.
pub fn upgrade(
    mut profile: UserProfile,
    proof: PaymentProof,
    now: DateTime<Utc>,
) -> (UserProfile, SubscriptionChange) {
    let end_date = now
        .checked_add_months(Months::new(1))
        .unwrap_or_else(|| now + Duration::days(30));

    let payment = PaymentInfo {
        transaction_id: proof.transaction_id,
        amount: proof.amount,
        currency: proof.currency,
        payment_date: now,
    };

    profile.subscription_tier = SubscriptionTier::Pro;
    profile.subscription_status = SubscriptionStatus::Active;
    profile.subscription_end_date = Some(end_date);
    profile.payment_info = Some(Json(payment.clone()));
    profile.updated_at = now;

    let change = SubscriptionChange {
        tier: SubscriptionTier::Pro,
        status: SubscriptionStatus::Active,
        end_date,
        payment,
    };

    (profile, change)
}

pub fn remaining_usage(profile: &UserProfile) -> RemainingUsage {
    if profile.is_pro() {
        return RemainingUsage {
            monthly: Remaining::Unlimited,
            daily: Remaining::Unlimited,
        };
    }

    RemainingUsage {
        monthly: Remaining::Count((profile.monthly_limit - profile.monthly_summaries_used).max(0)),
        daily: Remaining::Count((profile.daily_limit - profile.today_summaries_used).max(0)),
    }
}
