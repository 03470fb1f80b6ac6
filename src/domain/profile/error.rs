use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("not authenticated: {0}")]
    NotAuthenticated(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("profile not found")]
    NotFound,
    /// Store failure, message kept as the store reported it
    #[error("{0}")]
    Remote(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for ProfileServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotAuthenticated(msg) => ProfileServiceError::NotAuthenticated(msg),
            AppError::BadRequest(msg) => ProfileServiceError::Invalid(msg),
            AppError::NotFound(_) => ProfileServiceError::NotFound,
            AppError::RemoteFailure(msg) => ProfileServiceError::Remote(msg),
            AppError::Database(e) => ProfileServiceError::Remote(e.to_string()),
            _ => ProfileServiceError::Remote(err.to_string()),
        }
    }
}

impl From<ProfileServiceError> for AppError {
    fn from(err: ProfileServiceError) -> Self {
        match err {
            ProfileServiceError::NotAuthenticated(msg) => AppError::NotAuthenticated(msg),
            ProfileServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ProfileServiceError::NotFound => AppError::NotFound("Profile not found".to_string()),
            ProfileServiceError::Remote(msg) => AppError::RemoteFailure(msg),
            ProfileServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
