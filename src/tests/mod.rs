use crate::database::sqlite::SqliteRepository;
use crate::database::{CourseRepository, StudentRepository};
use crate::domain::{Course, NewCourse, NewStudent, Student};
use crate::{AppState, app};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

mod unit_models_courses;

// create a sqlite database in memory to test against
pub async fn setup_test_db() -> Arc<SqliteRepository> {
    // one connection, otherwise every connection sees its own empty database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Arc::new(SqliteRepository::new(pool))
}

// the real router on top of a fresh in-memory database
pub async fn setup_test_app() -> (Router, Arc<SqliteRepository>) {
    let repo = setup_test_db().await;
    let router = app(AppState::from_repository(repo.clone()));
    (router, repo)
}

pub async fn seed_students(repo: &SqliteRepository, count: usize) -> Vec<Student> {
    let mut students = Vec::with_capacity(count);
    for i in 0..count {
        let student = repo
            .create_student(&NewStudent {
                name: format!("student-{}", i),
                birth_date: None,
            })
            .await
            .expect("Should create student");
        students.push(student);
    }
    students
}

// `count` courses, each with a few freshly made students
pub async fn seed_courses(repo: &SqliteRepository, count: usize) -> Vec<Course> {
    let mut courses = Vec::with_capacity(count);
    for i in 0..count {
        let students = seed_students(repo, 3).await;
        let course = repo
            .create_course(&NewCourse {
                name: format!("course-{}", i),
                students: students.iter().map(|s| s.id).collect(),
            })
            .await
            .expect("Should create course");
        courses.push(course);
    }
    courses
}

// fire one request at the router, hand back the status and the JSON body (Null if empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
