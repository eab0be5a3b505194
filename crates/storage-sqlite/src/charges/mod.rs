//! SQLite storage implementation for monthly charges and their links to
//! time entries.

mod model;
mod repository;

pub use model::{is_regenerable, MonthlyChargeDB, TimeEntryChargeDB};
pub use repository::ChargeRepository;

// Re-export trait from core for convenience
pub use procat_core::charges::ChargeRepositoryTrait;
