//! SQLite storage implementation for movies.

mod model;
mod repository;

pub use model::{MovieChangesetDB, MovieDB};
pub use repository::MovieRepository;
