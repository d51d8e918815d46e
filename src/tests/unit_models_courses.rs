use crate::domain::course::normalize_students;
use crate::domain::{Course, Student};
use crate::features::courses::model::{CourseInput, DbCourse, JsonCourse};
use crate::features::students::model::{DbStudent, JsonStudent};
use chrono::NaiveDate;
use serde_json::json;

fn create_test_course() -> Course {
    Course {
        id: 3,
        name: "Rust for beginners".to_string(),
        students: vec![1, 4, 9],
    }
}

// the wire shape is exactly {id, name, students}
#[test]
fn test_course_to_json_course() {
    let json_course: JsonCourse = create_test_course().into();
    let value = serde_json::to_value(&json_course).unwrap();

    assert_eq!(
        value,
        json!({ "id": 3, "name": "Rust for beginners", "students": [1, 4, 9] })
    );
}

#[test]
fn test_db_course_into_course() {
    let db_course = DbCourse {
        id: 3,
        name: "Rust for beginners".to_string(),
    };

    assert_eq!(db_course.into_course(vec![1, 4, 9]), create_test_course());
}

#[test]
fn test_course_display() {
    assert_eq!(create_test_course().to_string(), "Rust for beginners (#3)");
}

// unknown keys and a client-supplied id are ignored
#[test]
fn test_course_input_ignores_extra_keys() {
    let input: CourseInput =
        serde_json::from_value(json!({ "id": 77, "name": "X", "room": "B12" })).unwrap();

    assert_eq!(input.name.as_deref(), Some("X"));
    assert!(input.students.is_none());
}

#[test]
fn test_course_input_missing_vs_empty_students() {
    let missing: CourseInput = serde_json::from_value(json!({})).unwrap();
    let empty: CourseInput = serde_json::from_value(json!({ "students": [] })).unwrap();

    assert_eq!(missing.students, None);
    assert_eq!(empty.students, Some(vec![]));
}

#[test]
fn test_course_input_into_new_course() {
    let input = CourseInput {
        name: Some("Named".into()),
        students: None,
    };
    let new_course = input.into_new_course().unwrap();

    assert_eq!(new_course.name, "Named");
    assert!(new_course.students.is_empty());

    assert!(CourseInput::default().into_new_course().is_err());
}

#[test]
fn test_normalize_students() {
    assert_eq!(normalize_students(vec![5, 1, 5, 3, 1]), vec![1, 3, 5]);
    assert!(normalize_students(vec![]).is_empty());
}

#[test]
fn test_db_student_to_json_student() {
    let student: Student = DbStudent {
        id: 1,
        name: "Grace".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1906, 12, 9),
    }
    .into();
    let value = serde_json::to_value(JsonStudent::from(student)).unwrap();

    assert_eq!(
        value,
        json!({ "id": 1, "name": "Grace", "birth_date": "1906-12-09" })
    );
}
