use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, main_lib::AppState};

/// Compares two secrets without short-circuiting on the first mismatch.
fn tokens_match(candidate: &str, expected: &str) -> bool {
    let (a, b) = (candidate.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Rejects requests that do not carry `Authorization: Bearer <AUTH_TOKEN>`.
///
/// A server started without a token lets every request through.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.auth_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header is required".into()))?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(ApiError::Unauthorized(
            "Invalid authorization format".into(),
        ));
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(ApiError::Unauthorized(
            "Invalid authorization format".into(),
        ));
    }

    if !tokens_match(token.trim(), expected) {
        return Err(ApiError::Unauthorized("Invalid token".into()));
    }

    Ok(next.run(request).await)
}
