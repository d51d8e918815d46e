use derive_more::derive::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{} (#{})", name, id)]
pub struct Course {
    pub id: i64,
    pub name: String,
    // enrolled student ids, ascending, no duplicates
    pub students: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub students: Vec<i64>,
}

// a `None` field is left untouched by an update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub students: Option<Vec<i64>>,
}

/// Exact-match filters for listing courses. Unset filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl CourseFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

/// Sorts and de-duplicates a submitted student list into set form.
pub fn normalize_students(mut students: Vec<i64>) -> Vec<i64> {
    students.sort_unstable();
    students.dedup();
    students
}
