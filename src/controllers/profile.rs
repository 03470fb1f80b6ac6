use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::domain::profile::{MeResponse, PaymentProof, Preferences, ProfileServiceApi};
use crate::domain::session::SessionContext;
use crate::error::AppResult;

pub struct ProfileController {
    profile_service: Arc<dyn ProfileServiceApi>,
}

impl ProfileController {
    pub fn new(profile_service: Arc<dyn ProfileServiceApi>) -> Self {
        Self { profile_service }
    }

    /// GET /api/me - Profile with remaining usage
    pub async fn get_me(
        State(controller): State<Arc<ProfileController>>,
        Extension(session): Extension<SessionContext>,
    ) -> AppResult<Json<MeResponse>> {
        let response = controller.profile_service.me(&session).await?;
        Ok(Json(response))
    }

    /// POST /api/me/upgrade - Switch to the pro plan
    pub async fn upgrade(
        State(controller): State<Arc<ProfileController>>,
        Extension(session): Extension<SessionContext>,
        Json(proof): Json<PaymentProof>,
    ) -> AppResult<Json<MeResponse>> {
        let profile = controller.profile_service.upgrade(&session, proof).await?;
        Ok(Json(MeResponse::from(profile)))
    }

    /// PUT /api/me/preferences
    pub async fn update_preferences(
        State(controller): State<Arc<ProfileController>>,
        Extension(session): Extension<SessionContext>,
        Json(preferences): Json<Preferences>,
    ) -> AppResult<Json<MeResponse>> {
        let profile = controller
            .profile_service
            .update_preferences(&session, preferences)
            .await?;
        Ok(Json(MeResponse::from(profile)))
    }
}
