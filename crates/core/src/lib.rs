//! ProCAT Core - cost recovery domain entities, services, and traits.
//!
//! This crate holds the charging logic for research software projects:
//! funding ledgers, monthly charge allocation and the finance journal.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod capacity;
pub mod charges;
pub mod constants;
pub mod errors;
pub mod events;
pub mod funding;
pub mod notifications;
pub mod projects;
pub mod report;
pub mod settings;
pub mod time_entries;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
