//! SQLite storage implementation for ProCAT.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `procat-core` and contains:
//! - Database connection pooling and the single writer
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!   core (domain)      reporter (binary)
//!         │                   │
//!         └─────────┬─────────┘
//!                   │
//!                   ▼
//!          storage-sqlite (this crate)
//!                   │
//!                   ▼
//!               SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub(crate) mod utils;

// Repository implementations
pub mod capacity;
pub mod charges;
pub mod funding;
pub mod projects;
pub mod settings;
pub mod time_entries;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from procat-core for convenience
pub use procat_core::errors::{DatabaseError, Error, Result};
