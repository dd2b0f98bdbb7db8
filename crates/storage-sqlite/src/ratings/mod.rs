//! SQLite storage implementation for ratings.

mod model;
mod repository;

pub use model::RatingDB;
pub use repository::RatingRepository;
