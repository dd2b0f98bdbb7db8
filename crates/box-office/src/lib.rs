//! Reelrate Box-Office Crate
//!
//! This crate fetches third-party revenue and budget figures for a movie
//! title. It knows nothing about the movie domain: callers receive a
//! [`BoxOfficeData`] snapshot or a [`BoxOfficeError`] and decide what to do
//! with a failure.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +---------------------+
//! |   Core Service   | --> |  BoxOfficeProvider  |  (trait)
//! +------------------+     +---------------------+
//!                                    |
//!                                    v
//!                          +----------------------+
//!                          | BoxOfficeApiProvider |  (HTTP + API key)
//!                          +----------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::BoxOfficeError;
pub use models::BoxOfficeData;
pub use provider::box_office_api::BoxOfficeApiProvider;
pub use provider::BoxOfficeProvider;
