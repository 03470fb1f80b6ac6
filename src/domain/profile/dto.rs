use serde::Serialize;

use super::UserProfile;
use crate::domain::quota::{QuotaState, RemainingUsage};

/// Profile plus derived quota view for the popup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub profile: UserProfile,
    pub remaining: RemainingUsage,
    pub quota_state: QuotaState,
    pub can_generate: bool,
}

impl From<UserProfile> for MeResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            remaining: crate::domain::quota::remaining_usage(&profile),
            quota_state: crate::domain::quota::quota_state(&profile),
            can_generate: crate::domain::quota::can_generate(&profile),
            profile,
        }
    }
}
