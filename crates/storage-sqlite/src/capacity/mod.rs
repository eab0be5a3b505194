//! SQLite storage implementation for RSE capacities.

mod model;
mod repository;

pub use model::CapacityDB;
pub use repository::CapacityRepository;

// Re-export trait from core for convenience
pub use procat_core::capacity::CapacityRepositoryTrait;
