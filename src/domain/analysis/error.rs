use crate::domain::profile::ProfileServiceError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error("not authenticated: {0}")]
    NotAuthenticated(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("No reviews found on this page")]
    NoReviewsFound,
    #[error("{0}")]
    Remote(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for AnalysisServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotAuthenticated(msg) => AnalysisServiceError::NotAuthenticated(msg),
            AppError::BadRequest(msg) => AnalysisServiceError::Invalid(msg),
            AppError::QuotaExceeded(msg) => AnalysisServiceError::QuotaExceeded(msg),
            AppError::NoReviewsFound => AnalysisServiceError::NoReviewsFound,
            AppError::RemoteFailure(msg) => AnalysisServiceError::Remote(msg),
            AppError::Database(e) => AnalysisServiceError::Remote(e.to_string()),
            _ => AnalysisServiceError::Remote(err.to_string()),
        }
    }
}

impl From<ProfileServiceError> for AnalysisServiceError {
    fn from(err: ProfileServiceError) -> Self {
        match err {
            ProfileServiceError::NotAuthenticated(msg) => AnalysisServiceError::NotAuthenticated(msg),
            ProfileServiceError::Invalid(msg) => AnalysisServiceError::Invalid(msg),
            ProfileServiceError::NotFound => {
                AnalysisServiceError::Remote("Profile not found".to_string())
            }
            ProfileServiceError::Remote(msg) => AnalysisServiceError::Remote(msg),
            ProfileServiceError::Other(e) => AnalysisServiceError::Other(e),
        }
    }
}

impl From<AnalysisServiceError> for AppError {
    fn from(err: AnalysisServiceError) -> Self {
        match err {
            AnalysisServiceError::NotAuthenticated(msg) => AppError::NotAuthenticated(msg),
            AnalysisServiceError::Invalid(msg) => AppError::BadRequest(msg),
            AnalysisServiceError::QuotaExceeded(msg) => AppError::QuotaExceeded(msg),
            AnalysisServiceError::NoReviewsFound => AppError::NoReviewsFound,
            AnalysisServiceError::Remote(msg) => AppError::RemoteFailure(msg),
            AnalysisServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
