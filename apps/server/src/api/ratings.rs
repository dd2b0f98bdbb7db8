use std::sync::Arc;

use super::title::MovieTitle;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use reelrate_core::ratings::{RatingAggregate, RatingResult};
use serde::Deserialize;

const RATER_ID_HEADER: &str = "x-rater-id";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaterQuery {
    rater_id: Option<String>,
}

#[derive(Deserialize)]
struct RatingBody {
    rating: f64,
}

/// Rater id from `?raterId=`, falling back to the `X-Rater-ID` header.
fn rater_id(query: RaterQuery, headers: &HeaderMap) -> String {
    query
        .rater_id
        .filter(|id| !id.trim().is_empty())
        .or_else(|| {
            headers
                .get(RATER_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_default()
}

async fn submit_rating(
    MovieTitle(title): MovieTitle,
    Query(query): Query<RaterQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RatingBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RatingResult>)> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let rater = rater_id(query, &headers);
    let result = state
        .rating_service
        .submit_rating(&title, &rater, body.rating)
        .await?;
    let status = if result.updated {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(result)))
}

async fn get_movie_ratings(
    MovieTitle(title): MovieTitle,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RatingAggregate>> {
    let aggregate = state.rating_service.get_movie_ratings(&title)?;
    Ok(Json(aggregate))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/movies/{title}/ratings",
        get(get_movie_ratings).post(submit_rating),
    )
}
