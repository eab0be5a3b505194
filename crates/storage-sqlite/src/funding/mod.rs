//! SQLite storage implementation for funding sources.

mod model;
mod repository;

pub use model::FundingSourceDB;
pub use repository::FundingRepository;
pub(crate) use repository::load_funding;

// Re-export trait from core for convenience
pub use procat_core::funding::FundingRepositoryTrait;
