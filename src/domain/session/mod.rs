pub mod jwt;

pub use jwt::{Claims, JwtManager};

use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Identity carried by a signed-in session
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub uid: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Per-request session, anonymous when no bearer token was sent.
///
/// Handed explicitly to every service call that needs the caller.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user: Option<SessionUser>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> AppResult<&SessionUser> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::NotAuthenticated("User not authenticated".to_string()))
    }
}
