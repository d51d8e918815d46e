pub mod model;

use crate::AppState;
use crate::domain::NewStudent;
use crate::error::{ApiError, ApiResult};
use crate::features::{parse_id, read_body};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use model::{JsonStudent, StudentInput};

pub fn students_router() -> Router<AppState> {
    Router::new()
        .route(
            "/students/",
            get(list_students_handler).post(create_student_handler),
        )
        .route("/students/{id}/", get(get_student_handler))
}

impl StudentInput {
    pub fn into_new_student(self) -> ApiResult<NewStudent> {
        let name = match self.name {
            None => return Err(ApiError::invalid_field("name", "This field is required.")),
            Some(name) if name.trim().is_empty() => {
                return Err(ApiError::invalid_field("name", "This field may not be blank."));
            }
            Some(name) => name.trim().to_string(),
        };

        Ok(NewStudent {
            name,
            birth_date: self.birth_date,
        })
    }
}

async fn list_students_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<JsonStudent>>> {
    let students = state.students.list_students().await?;
    Ok(Json(students.into_iter().map(JsonStudent::from).collect()))
}

async fn get_student_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JsonStudent>> {
    let id = parse_id(&id)?;

    match state.students.get_student(id).await? {
        Some(student) => Ok(Json(student.into())),
        None => Err(ApiError::NotFound),
    }
}

async fn create_student_handler(
    State(state): State<AppState>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<JsonStudent>)> {
    let new_student = read_body(payload)?.into_new_student()?;

    let student = state.students.create_student(&new_student).await?;
    tracing::info!(student = %student, "created student");

    Ok((StatusCode::CREATED, Json(student.into())))
}
