pub mod courses;
pub mod students;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{Json, Router, extract::rejection::JsonRejection};

// api router, where features are composed
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(courses::courses_router())
        .merge(students::students_router())
}

// anything that isn't an integer can't name a record
pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

pub(crate) fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))
}
