//! Extraction of the `{title}` segment shared by the movie routes.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

/// Index of `{title}` in `/movies/{title}/...` after splitting on `/`.
const TITLE_SEGMENT: usize = 2;

/// Movie title taken from the request path.
///
/// Decoded form-style: `+` is a space, and percent escapes are resolved
/// afterwards, so `%2B` still yields a literal plus.
pub struct MovieTitle(pub String);

fn decode_title(raw: &str) -> Result<String, ApiError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|title| title.into_owned())
        .map_err(|_| ApiError::BadRequest("Movie title is not valid UTF-8".to_string()))
}

impl<S> FromRequestParts<S> for MovieTitle
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .uri
            .path()
            .split('/')
            .nth(TITLE_SEGMENT)
            .unwrap_or_default();
        decode_title(raw).map(MovieTitle)
    }
}
