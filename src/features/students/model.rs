use crate::domain::Student;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub struct DbStudent {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

impl From<DbStudent> for Student {
    fn from(db_student: DbStudent) -> Self {
        Student {
            id: db_student.id,
            name: db_student.name,
            birth_date: db_student.birth_date,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct JsonStudent {
    pub id: i64,
    pub name: String,
    // serialized as YYYY-MM-DD
    pub birth_date: Option<NaiveDate>,
}

impl From<Student> for JsonStudent {
    fn from(student: Student) -> Self {
        JsonStudent {
            id: student.id,
            name: student.name,
            birth_date: student.birth_date,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct StudentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}
