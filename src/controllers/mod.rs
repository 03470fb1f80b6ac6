pub mod analysis;
pub mod events;
pub mod health;
pub mod profile;
pub mod reviews;
pub mod session;
