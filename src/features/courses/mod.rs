pub mod model;
pub mod serializer;

use crate::AppState;
use crate::domain::CourseFilter;
use crate::error::{ApiError, ApiResult};
use crate::features::{parse_id, read_body};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use model::{CourseInput, CourseListQuery, JsonCourse};
use serializer::{CourseSerializer, WriteMode};

pub fn courses_router() -> Router<AppState> {
    Router::new()
        .route(
            "/courses/",
            get(list_courses_handler).post(create_course_handler),
        )
        .route(
            "/courses/{id}/",
            get(get_course_handler)
                .put(replace_course_handler)
                .patch(patch_course_handler)
                .delete(delete_course_handler),
        )
}

pub(crate) fn list_filter(query: CourseListQuery) -> ApiResult<CourseFilter> {
    let id = match query.id.filter(|raw| !raw.is_empty()) {
        Some(raw) => Some(
            raw.trim()
                .parse::<i64>()
                .map_err(|_| ApiError::invalid_field("id", "Enter a whole number."))?,
        ),
        None => None,
    };

    Ok(CourseFilter {
        id,
        name: query.name.filter(|name| !name.is_empty()),
    })
}

async fn list_courses_handler(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> ApiResult<Json<Vec<JsonCourse>>> {
    let filter = list_filter(query)?;
    let courses = state.courses.list_courses(&filter).await?;

    tracing::debug!(count = courses.len(), ?filter, "listed courses");

    Ok(Json(courses.into_iter().map(JsonCourse::from).collect()))
}

async fn get_course_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JsonCourse>> {
    let id = parse_id(&id)?;

    match state.courses.get_course(id).await? {
        Some(course) => Ok(Json(course.into())),
        None => Err(ApiError::NotFound),
    }
}

async fn create_course_handler(
    State(state): State<AppState>,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<JsonCourse>)> {
    let input = read_body(payload)?;

    let input = CourseSerializer::new(state.students.as_ref(), WriteMode::Create)
        .validate(input)
        .await
        .inspect_err(|e| tracing::debug!(error = %e, "rejected course creation"))?;

    let course = state.courses.create_course(&input.into_new_course()?).await?;
    tracing::info!(course = %course, students = course.students.len(), "created course");

    Ok((StatusCode::CREATED, Json(course.into())))
}

async fn replace_course_handler(
    state: State<AppState>,
    id: Path<String>,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> ApiResult<Json<JsonCourse>> {
    update_course(state, id, payload, WriteMode::Replace).await
}

async fn patch_course_handler(
    state: State<AppState>,
    id: Path<String>,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> ApiResult<Json<JsonCourse>> {
    update_course(state, id, payload, WriteMode::Partial).await
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CourseInput>, JsonRejection>,
    mode: WriteMode,
) -> ApiResult<Json<JsonCourse>> {
    let id = parse_id(&id)?;

    // a missing course is reported before the payload is looked at
    if !state.courses.course_exists(id).await? {
        return Err(ApiError::NotFound);
    }

    let input = read_body(payload)?;
    let input = CourseSerializer::new(state.students.as_ref(), mode)
        .validate(input)
        .await
        .inspect_err(|e| tracing::debug!(course_id = id, error = %e, "rejected course update"))?;

    match state.courses.update_course(id, &input.into_changes()).await? {
        Some(course) => {
            tracing::info!(course = %course, ?mode, "updated course");
            Ok(Json(course.into()))
        }
        None => Err(ApiError::NotFound),
    }
}

async fn delete_course_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    if !state.courses.delete_course(id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(course_id = id, "deleted course");
    Ok(StatusCode::NO_CONTENT)
}
