//! SQLite storage implementation for projects.

mod model;
mod repository;

pub use model::ProjectDB;
pub use repository::ProjectRepository;
pub(crate) use repository::to_projects;

// Re-export trait from core for convenience
pub use procat_core::projects::ProjectRepositoryTrait;
