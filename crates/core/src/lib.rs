//! Reelrate Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the movie catalogue, user
//! ratings and box-office enrichment. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod box_office;
pub mod constants;
pub mod errors;
pub mod movies;
pub mod ratings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
