pub mod memory;
pub mod profile_repository;
pub mod summary_repository;

pub use memory::{InMemoryProfileStore, InMemorySummaryStore};
pub use profile_repository::{PgProfileRepository, ProfileStore};
pub use summary_repository::{PgSummaryRepository, SummaryHistoryStore};
