//! SQLite storage implementation for Reelrate.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `reelrate-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for movies and ratings
//! - Database-specific model types (with Diesel derives)
//!
//! Reads go through the r2d2 pool. Writes are funnelled through a single
//! writer task (see [`db::write_actor`]) that runs each job inside an
//! `IMMEDIATE` transaction.
//!
//! ```text
//!      core (domain traits)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod movies;
pub mod ratings;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from reelrate-core for convenience
pub use reelrate_core::errors::{DatabaseError, Error, Result};
