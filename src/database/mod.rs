use crate::domain::{Course, CourseChanges, CourseFilter, NewCourse, NewStudent, Student};
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// repositories are shared between request handlers behind an Arc
// sqlx::Pool is thread safe
// generic course/student operations, db specific implementations in "sqlite.rs"
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>>;
    async fn get_course(&self, id: i64) -> Result<Option<Course>>;
    async fn course_exists(&self, id: i64) -> Result<bool>;
    async fn count_courses(&self) -> Result<i64>;

    // write operations
    async fn create_course(&self, course: &NewCourse) -> Result<Course>;
    // returns None when no course has this id
    async fn update_course(&self, id: i64, changes: &CourseChanges) -> Result<Option<Course>>;
    // returns false when no course has this id
    async fn delete_course(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;
    // ids from `ids` that do not name a stored student, in input order
    async fn missing_students(&self, ids: &[i64]) -> Result<Vec<i64>>;

    async fn create_student(&self, student: &NewStudent) -> Result<Student>;
}
