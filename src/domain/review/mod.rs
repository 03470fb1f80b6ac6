pub mod model;

pub use model::{Review, ReviewSource};

/// Minimum trimmed body length (exclusive) for a review to be kept
pub const MIN_BODY_CHARS: usize = 10;
/// Maximum trimmed body length (exclusive) for a review to be kept
pub const MAX_BODY_CHARS: usize = 1000;
/// Maximum number of reviews handed to the scorer per page
pub const MAX_REVIEWS: usize = 50;

/// Keep reviews whose trimmed body is within bounds, capped at [`MAX_REVIEWS`]
pub fn retain_valid(reviews: Vec<Review>) -> Vec<Review> {
    reviews
        .into_iter()
        .filter(|review| {
            let len = review.body.trim().chars().count();
            len > MIN_BODY_CHARS && len < MAX_BODY_CHARS
        })
        .take(MAX_REVIEWS)
        .collect()
}
