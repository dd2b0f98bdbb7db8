//! Rating domain models.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RATING_SCORE, MIN_RATING_SCORE, RATING_SCORE_STEP};
use crate::{errors::ValidationError, Error, Result};

/// One rater's score for one movie. Identity is `(movie_title, rater_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub movie_title: String,
    pub rater_id: String,
    pub rating: f64,
}

/// Outcome of a rating submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    pub movie_title: String,
    pub rater_id: String,
    pub rating: f64,
    /// True when the submission replaced an earlier score by the same rater.
    pub updated: bool,
}

impl RatingResult {
    pub fn from_rating(rating: Rating, updated: bool) -> Self {
        Self {
            movie_title: rating.movie_title,
            rater_id: rating.rater_id,
            rating: rating.rating,
            updated,
        }
    }
}

/// Mean score and number of raters for a movie. Derived on every read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub average: f64,
    pub count: i64,
}

impl RatingAggregate {
    /// Builds the aggregate from a raw mean, rounding it to one decimal.
    /// A movie without ratings is `{0, 0}`.
    pub fn new(raw_average: Option<f64>, count: i64) -> Self {
        if count <= 0 {
            return Self::default();
        }
        Self {
            average: round_average(raw_average.unwrap_or(0.0)),
            count,
        }
    }
}

/// Rounds to one decimal place, halves away from zero.
pub fn round_average(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Accepts scores in `[0.0, 5.0]` that are a multiple of 0.5.
pub fn validate_score(score: f64) -> Result<()> {
    let in_range = score.is_finite() && (MIN_RATING_SCORE..=MAX_RATING_SCORE).contains(&score);
    let on_step = (score / RATING_SCORE_STEP).fract() == 0.0;
    if in_range && on_step {
        Ok(())
    } else {
        Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Rating must be between {} and {} in steps of {}",
            MIN_RATING_SCORE, MAX_RATING_SCORE, RATING_SCORE_STEP
        ))))
    }
}
