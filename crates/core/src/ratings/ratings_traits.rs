//! Rating repository and service traits.

use async_trait::async_trait;

use super::ratings_model::{Rating, RatingAggregate, RatingResult};
use crate::errors::Result;

/// Trait defining the contract for Rating repository operations.
#[async_trait]
pub trait RatingRepositoryTrait: Send + Sync {
    /// Inserts the rating or replaces the score stored for the same
    /// `(movie_title, rater_id)`. Atomic per key.
    async fn upsert(&self, rating: Rating) -> Result<Rating>;

    fn get_by_movie_and_rater(&self, movie_title: &str, rater_id: &str)
        -> Result<Option<Rating>>;

    /// Returns `{0, 0}` for a movie without ratings.
    fn get_aggregate_by_movie(&self, movie_title: &str) -> Result<RatingAggregate>;
}

/// Trait defining the contract for Rating service operations.
#[async_trait]
pub trait RatingServiceTrait: Send + Sync {
    async fn submit_rating(
        &self,
        movie_title: &str,
        rater_id: &str,
        score: f64,
    ) -> Result<RatingResult>;

    fn get_movie_ratings(&self, movie_title: &str) -> Result<RatingAggregate>;
}
