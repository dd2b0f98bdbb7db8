//! Ratings module - per-rater scores and their per-movie aggregate.

mod ratings_model;
mod ratings_service;
mod ratings_traits;


pub use ratings_model::{round_average, validate_score, Rating, RatingAggregate, RatingResult};
pub use ratings_service::RatingService;
pub use ratings_traits::{RatingRepositoryTrait, RatingServiceTrait};
