//! Movie domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::movies_cursor::MovieCursor;
use crate::box_office::BoxOffice;
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, RELEASE_DATE_FORMAT};
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a movie in the catalogue.
///
/// `title`, `release_date` and `genre` never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub box_office: Option<BoxOffice>,
}

/// Input model for creating a new movie.
///
/// Required fields default to empty so that a missing field is reported by
/// [`NewMovie::validate`] rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genre: String,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
}

impl NewMovie {
    /// Validates the new movie data.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if self.release_date.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "releaseDate".to_string(),
            )));
        }
        if self.genre.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "genre".to_string(),
            )));
        }
        self.parse_release_date()?;
        validate_budget(self.budget)
    }

    /// Parses `release_date` in the fixed `YYYY-MM-DD` format.
    pub fn parse_release_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(self.release_date.trim(), RELEASE_DATE_FORMAT).map_err(|_| {
            Error::Validation(ValidationError::InvalidInput(
                "Release date must be in YYYY-MM-DD format".to_string(),
            ))
        })
    }
}

/// Input model for changing the mutable fields of a movie.
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdate {
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
}

impl MovieUpdate {
    /// Validates the movie update data.
    pub fn validate(&self) -> Result<()> {
        validate_budget(self.budget)
    }

    pub fn is_empty(&self) -> bool {
        self.distributor.is_none() && self.budget.is_none() && self.mpa_rating.is_none()
    }

    /// Applies the supplied fields on top of `movie`.
    pub fn apply_to(self, movie: &mut Movie) {
        if let Some(distributor) = self.distributor {
            movie.distributor = Some(distributor);
        }
        if let Some(budget) = self.budget {
            movie.budget = Some(budget);
        }
        if let Some(mpa_rating) = self.mpa_rating {
            movie.mpa_rating = Some(mpa_rating);
        }
    }
}

fn validate_budget(budget: Option<i64>) -> Result<()> {
    match budget {
        Some(b) if b < 0 => Err(Error::Validation(ValidationError::InvalidInput(
            "Budget cannot be negative".to_string(),
        ))),
        _ => Ok(()),
    }
}

/// Listing filter. Every predicate that is set must match (AND).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFilter {
    /// Substring of the title.
    pub q: Option<String>,
    /// Release year.
    pub year: Option<i32>,
    /// Substring of the genre.
    pub genre: Option<String>,
    /// Substring of the distributor.
    pub distributor: Option<String>,
    /// Maximum budget (inclusive).
    pub budget: Option<i64>,
    /// Exact MPA rating.
    pub mpa_rating: Option<String>,
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

impl MovieFilter {
    /// Page size after applying the default and the upper bound.
    pub fn page_size(&self) -> i64 {
        match self.limit {
            Some(limit) if limit > 0 => limit.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Decodes the continuation token, if one was supplied.
    pub fn decoded_cursor(&self) -> Result<Option<MovieCursor>> {
        match self.cursor.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(token) => MovieCursor::decode(token).map(Some),
        }
    }

    /// Non-blank text predicate, or `None` when the caller left it empty.
    pub fn text(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

/// One page of a movie listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    pub items: Vec<Movie>,
    pub next_cursor: Option<String>,
}

impl MoviePage {
    /// Builds a page from rows fetched with `limit + 1`.
    ///
    /// The extra row only signals that another page exists; it is dropped and
    /// the cursor points at the last row that is kept.
    pub fn from_overfetched(mut rows: Vec<Movie>, limit: i64) -> Self {
        let limit = limit.max(0) as usize;
        if rows.len() <= limit {
            return MoviePage {
                items: rows,
                next_cursor: None,
            };
        }

        rows.truncate(limit);
        let next_cursor = rows
            .last()
            .map(|last| MovieCursor::from_movie(last).encode());
        MoviePage {
            items: rows,
            next_cursor,
        }
    }
}
