//! Keyset pagination cursor for movie listings.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::NaiveDate;

use super::movies_model::Movie;
use crate::constants::RELEASE_DATE_FORMAT;
use crate::errors::{Error, Result, ValidationError};

/// Sort key of the last row handed out on a page.
///
/// Listings are ordered by `(release_date DESC, title ASC)`, so the next page
/// starts strictly after this pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCursor {
    pub release_date: NaiveDate,
    pub title: String,
}

impl MovieCursor {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            release_date: movie.release_date,
            title: movie.title.clone(),
        }
    }

    /// Encodes the cursor as an opaque, URL-safe token.
    pub fn encode(&self) -> String {
        let raw = format!(
            "{}|{}",
            self.release_date.format(RELEASE_DATE_FORMAT),
            self.title
        );
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    /// Decodes a token produced by [`MovieCursor::encode`].
    pub fn decode(token: &str) -> Result<Self> {
        let invalid = || Error::Validation(ValidationError::InvalidCursor);

        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (date_part, title) = raw.split_once('|').ok_or_else(invalid)?;
        let release_date =
            NaiveDate::parse_from_str(date_part, RELEASE_DATE_FORMAT).map_err(|_| invalid())?;

        Ok(Self {
            release_date,
            title: title.to_string(),
        })
    }

    /// True when `movie` sorts strictly after this cursor.
    pub fn precedes(&self, movie: &Movie) -> bool {
        movie.release_date < self.release_date
            || (movie.release_date == self.release_date && movie.title > self.title)
    }
}
