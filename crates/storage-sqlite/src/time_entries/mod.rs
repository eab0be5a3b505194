//! SQLite storage implementation for time entries.

mod model;
mod repository;

pub use model::TimeEntryDB;
pub use repository::TimeEntryRepository;
pub(crate) use repository::{day_start, load_entries};

// Re-export trait from core for convenience
pub use procat_core::time_entries::TimeEntryRepositoryTrait;
