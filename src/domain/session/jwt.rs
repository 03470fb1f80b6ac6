use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SessionUser;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// HS256 signer/verifier for identity-provider session tokens
#[derive(Clone)]
pub struct JwtManager {
    secret: String,
    expiration_hours: i64,
}

impl JwtManager {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret,
            expiration_hours,
        }
    }

    /// Issue a token for a session user
    pub fn generate_token(&self, user: &SessionUser) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: user.uid.to_string(),
            email: user.email.clone(),
            name: user.display_name.clone(),
            picture: user.photo_url.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate a token and extract claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::NotAuthenticated(format!("Invalid token: {}", e)))
    }

    /// Validate a token and build the session user it names
    pub fn session_user(&self, token: &str) -> AppResult<SessionUser> {
        let claims = self.validate_token(token)?;
        let uid = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::NotAuthenticated("Invalid user ID in token".to_string()))?;

        Ok(SessionUser {
            uid,
            email: claims.email,
            display_name: claims.name,
            photo_url: claims.picture,
        })
    }
}
