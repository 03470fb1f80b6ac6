pub mod dto;
pub mod error;
pub mod model;
pub mod service;

pub use dto::MeResponse;
pub use error::ProfileServiceError;
pub use model::{
    PaymentInfo, PaymentProof, Preferences, SubscriptionStatus, SubscriptionTier, UserProfile,
};
pub use service::{ProfileService, ProfileServiceApi};
