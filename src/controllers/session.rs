use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;

use crate::domain::profile::{ProfileServiceApi, UserProfile};
use crate::domain::session::SessionContext;
use crate::error::AppResult;

pub struct SessionController {
    profile_service: Arc<dyn ProfileServiceApi>,
}

impl SessionController {
    pub fn new(profile_service: Arc<dyn ProfileServiceApi>) -> Self {
        Self { profile_service }
    }

    /// POST /api/session - Sign in with the bearer token's identity
    pub async fn sign_in(
        State(controller): State<Arc<SessionController>>,
        Extension(session): Extension<SessionContext>,
    ) -> AppResult<Json<UserProfile>> {
        let profile = controller.profile_service.sign_in(&session).await?;
        Ok(Json(profile))
    }

    /// DELETE /api/session - Sign out
    pub async fn sign_out(
        State(controller): State<Arc<SessionController>>,
        Extension(session): Extension<SessionContext>,
    ) -> AppResult<StatusCode> {
        controller.profile_service.sign_out(&session).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
