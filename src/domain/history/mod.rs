pub mod model;

pub use model::{SummaryMetadata, SummaryRecord};

/// Clamp a caller-supplied history limit into `1..=max`, using `default` when absent.
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    let max = max.max(1);
    requested.unwrap_or(default).clamp(1, max)
}
