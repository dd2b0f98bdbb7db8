use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reelrate_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn internal(detail: &dyn std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Request failed: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                CoreError::Conflict(reason) => (StatusCode::CONFLICT, reason.clone()),
                CoreError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone()),
                CoreError::Database(DatabaseError::NotFound(reason)) => {
                    (StatusCode::NOT_FOUND, reason.clone())
                }
                CoreError::Database(_) | CoreError::Unexpected(_) => internal(e),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
