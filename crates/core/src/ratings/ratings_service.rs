use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::ratings_model::{validate_score, Rating, RatingAggregate, RatingResult};
use super::ratings_traits::{RatingRepositoryTrait, RatingServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::movies::MovieRepositoryTrait;

/// Service for submitting ratings and reading per-movie aggregates.
pub struct RatingService {
    rating_repository: Arc<dyn RatingRepositoryTrait>,
    movie_repository: Arc<dyn MovieRepositoryTrait>,
}

impl RatingService {
    pub fn new(
        rating_repository: Arc<dyn RatingRepositoryTrait>,
        movie_repository: Arc<dyn MovieRepositoryTrait>,
    ) -> Self {
        Self {
            rating_repository,
            movie_repository,
        }
    }

    fn ensure_movie_exists(&self, movie_title: &str) -> Result<()> {
        match self.movie_repository.get_by_title(movie_title)? {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(format!(
                "Movie '{}' not found",
                movie_title
            ))),
        }
    }
}

#[async_trait]
impl RatingServiceTrait for RatingService {
    async fn submit_rating(
        &self,
        movie_title: &str,
        rater_id: &str,
        score: f64,
    ) -> Result<RatingResult> {
        validate_score(score)?;
        let rater_id = rater_id.trim();
        if rater_id.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "raterId".to_string(),
            )));
        }
        self.ensure_movie_exists(movie_title)?;

        let updated = self
            .rating_repository
            .get_by_movie_and_rater(movie_title, rater_id)?
            .is_some();

        let stored = self
            .rating_repository
            .upsert(Rating {
                movie_title: movie_title.to_string(),
                rater_id: rater_id.to_string(),
                rating: score,
            })
            .await?;
        debug!(
            "Rater '{}' {} '{}' with {}",
            stored.rater_id,
            if updated { "re-rated" } else { "rated" },
            stored.movie_title,
            stored.rating
        );

        Ok(RatingResult::from_rating(stored, updated))
    }

    fn get_movie_ratings(&self, movie_title: &str) -> Result<RatingAggregate> {
        self.ensure_movie_exists(movie_title)?;
        self.rating_repository.get_aggregate_by_movie(movie_title)
    }
}
