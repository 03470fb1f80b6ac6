pub mod analysis;
pub mod extraction;
pub mod history;
pub mod profile;
pub mod quota;
pub mod review;
pub mod session;
pub mod summary;
