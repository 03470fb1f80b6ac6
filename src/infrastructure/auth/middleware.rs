use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::session::{JwtManager, SessionContext};
use crate::error::AppError;

/// Resolve the bearer token into a [`SessionContext`] request extension.
///
/// No `Authorization` header yields an anonymous session; a malformed or
/// invalid token is rejected.
pub async fn session_middleware(
    State(jwt): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = match request
        .headers()
        .get("authorization")
        .map(|v| v.to_str())
    {
        None => SessionContext::anonymous(),
        Some(Err(_)) => {
            return Err(AppError::NotAuthenticated(
                "Invalid authorization header".to_string(),
            ))
        }
        Some(Ok(header)) => {
            let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                AppError::NotAuthenticated("Invalid authorization format".to_string())
            })?;
            SessionContext::signed_in(jwt.session_user(token)?)
        }
    };

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
