use std::sync::Arc;

use super::title::MovieTitle;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use reelrate_core::movies::{Movie, MovieFilter, MoviePage, MovieUpdate, NewMovie};

async fn create_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewMovie>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(new_movie) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let movie = state.movie_service.create_movie(new_movie).await?;
    let location = format!("/movies/{}", urlencoding::encode(&movie.title));
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(movie)).into_response())
}

async fn list_movies(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<MovieFilter>, QueryRejection>,
) -> ApiResult<Json<MoviePage>> {
    let Query(filter) = filter.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let page = state.movie_service.list_movies(filter)?;
    Ok(Json(page))
}

async fn get_movie(
    MovieTitle(title): MovieTitle,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Movie>> {
    let movie = state.movie_service.get_movie(&title)?;
    Ok(Json(movie))
}

async fn update_movie(
    MovieTitle(title): MovieTitle,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MovieUpdate>, JsonRejection>,
) -> ApiResult<Json<Movie>> {
    let Json(update) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let movie = state.movie_service.update_movie(&title, update).await?;
    Ok(Json(movie))
}

async fn refresh_box_office(
    MovieTitle(title): MovieTitle,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Movie>> {
    let movie = state.movie_service.refresh_box_office(&title).await?;
    Ok(Json(movie))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{title}", get(get_movie).patch(update_movie))
        .route(
            "/movies/{title}/box-office/refresh",
            post(refresh_box_office),
        )
}
