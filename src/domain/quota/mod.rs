pub mod ledger;

pub use ledger::{
    can_generate, quota_state, record_usage, remaining_usage, reset_if_rolled_over, upgrade,
    QuotaState, Remaining, RemainingUsage, Rollover, SubscriptionChange,
};

/// Free-tier limits applied to newly created profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaLimits {
    pub monthly: i32,
    pub daily: i32,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            monthly: 5,
            daily: 2,
        }
    }
}
