use crate::domain::Course;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub struct DbCourse {
    pub id: i64,
    pub name: String,
}

impl DbCourse {
    pub fn into_course(self, students: Vec<i64>) -> Course {
        Course {
            id: self.id,
            name: self.name,
            students,
        }
    }
}

// one row of the course_students join table
#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Copy)]
pub struct DbCourseStudent {
    pub course_id: i64,
    pub student_id: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct JsonCourse {
    pub id: i64,
    pub name: String,
    pub students: Vec<i64>,
}

impl From<Course> for JsonCourse {
    fn from(course: Course) -> Self {
        JsonCourse {
            id: course.id,
            name: course.name,
            students: course.students,
        }
    }
}

/// Body of a course write request. Absent keys stay `None`; `id` and any
/// other unknown keys are ignored.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct CourseInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub students: Option<Vec<i64>>,
}

/// Query string accepted by the list endpoint. Values are kept raw so a bad
/// `id` can be reported as a field error.
#[derive(Deserialize, Debug, Default)]
pub struct CourseListQuery {
    pub id: Option<String>,
    pub name: Option<String>,
}
