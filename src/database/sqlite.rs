use crate::database::{CourseRepository, StudentRepository};
use crate::domain::course::normalize_students;
use crate::domain::{Course, CourseChanges, CourseFilter, NewCourse, NewStudent, Student};
use crate::features::courses::model::{DbCourse, DbCourseStudent};
use crate::features::students::model::DbStudent;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::{HashMap, HashSet};

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    async fn students_of(&self, course_id: i64) -> Result<Vec<i64>> {
        let students = sqlx::query_scalar::<_, i64>(
            "SELECT student_id FROM course_students WHERE course_id = ? ORDER BY student_id",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .context(format!("Failed to load students of course {}", course_id))?;

        Ok(students)
    }
}

// replace the membership rows of a course, inside the caller's transaction
async fn replace_enrollment(
    conn: &mut SqliteConnection,
    course_id: i64,
    students: &[i64],
) -> Result<()> {
    sqlx::query("DELETE FROM course_students WHERE course_id = ?")
        .bind(course_id)
        .execute(&mut *conn)
        .await
        .context(format!("Failed to clear students of course {}", course_id))?;

    for student_id in normalize_students(students.to_vec()) {
        sqlx::query("INSERT INTO course_students (course_id, student_id) VALUES (?, ?)")
            .bind(course_id)
            .bind(student_id)
            .execute(&mut *conn)
            .await
            .context(format!(
                "Failed to enroll student {} in course {}",
                student_id, course_id
            ))?;
    }

    Ok(())
}

#[async_trait]
impl CourseRepository for SqliteRepository {
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>> {
        // both reads see the same snapshot
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction for course listing")?;

        let db_courses = sqlx::query_as::<_, DbCourse>(
            r#"
            SELECT id, name FROM courses
            WHERE (? IS NULL OR id = ?) AND (? IS NULL OR name = ?)
            ORDER BY id
            "#,
        )
        .bind(filter.id)
        .bind(filter.id)
        .bind(filter.name.as_deref())
        .bind(filter.name.as_deref())
        .fetch_all(&mut *tx)
        .await
        .context("Failed to list courses")?;

        // one pass over the membership table instead of a query per course
        let links = sqlx::query_as::<_, DbCourseStudent>(
            r#"
            SELECT cs.course_id, cs.student_id FROM course_students cs
            JOIN courses c ON c.id = cs.course_id
            WHERE (? IS NULL OR c.id = ?) AND (? IS NULL OR c.name = ?)
            ORDER BY cs.student_id
            "#,
        )
        .bind(filter.id)
        .bind(filter.id)
        .bind(filter.name.as_deref())
        .bind(filter.name.as_deref())
        .fetch_all(&mut *tx)
        .await
        .context("Failed to list course enrollments")?;

        tx.commit()
            .await
            .context("Failed to finish course listing")?;

        let mut students_by_course: HashMap<i64, Vec<i64>> = HashMap::new();
        for link in links {
            students_by_course
                .entry(link.course_id)
                .or_default()
                .push(link.student_id);
        }

        let courses = db_courses
            .into_iter()
            .map(|db_course| {
                let students = students_by_course.remove(&db_course.id).unwrap_or_default();
                db_course.into_course(students)
            })
            .collect();

        Ok(courses)
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        let db_course_opt =
            sqlx::query_as::<_, DbCourse>("SELECT id, name FROM courses WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context(format!("Failed to load course {}", id))?;

        match db_course_opt {
            Some(db_course) => {
                let students = self.students_of(db_course.id).await?;
                Ok(Some(db_course.into_course(students)))
            }
            None => Ok(None),
        }
    }

    async fn course_exists(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM courses WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .context(format!("Failed to look up course {}", id))?;

        Ok(exists)
    }

    async fn count_courses(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count courses")?;

        Ok(count)
    }

    async fn create_course(&self, course: &NewCourse) -> Result<Course> {
        // course row and its enrollment land together or not at all
        let mut tx = self
            .pool
            .begin()
            .await
            .context(format!("Failed to begin transaction for course {}", course.name))?;

        let id = sqlx::query("INSERT INTO courses (name) VALUES (?)")
            .bind(&course.name)
            .execute(&mut *tx)
            .await
            .context(format!("Failed to insert course {}", course.name))?
            .last_insert_rowid();

        replace_enrollment(&mut *tx, id, &course.students).await?;

        tx.commit()
            .await
            .context(format!("Failed to commit course {}", course.name))?;

        Ok(Course {
            id,
            name: course.name.clone(),
            students: normalize_students(course.students.clone()),
        })
    }

    async fn update_course(&self, id: i64, changes: &CourseChanges) -> Result<Option<Course>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context(format!("Failed to begin transaction for course {}", id))?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM courses WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .context(format!("Failed to look up course {}", id))?;

        if exists.is_none() {
            return Ok(None);
        }

        if let Some(name) = &changes.name {
            sqlx::query("UPDATE courses SET name = ? WHERE id = ?")
                .bind(name)
                .bind(id)
                .execute(&mut *tx)
                .await
                .context(format!("Failed to rename course {}", id))?;
        }

        if let Some(students) = &changes.students {
            replace_enrollment(&mut *tx, id, students).await?;
        }

        tx.commit()
            .await
            .context(format!("Failed to commit update of course {}", id))?;

        self.get_course(id).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        // membership rows go with it (ON DELETE CASCADE), students stay
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(format!("Failed to delete course {}", id))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StudentRepository for SqliteRepository {
    async fn list_students(&self) -> Result<Vec<Student>> {
        let db_students = sqlx::query_as::<_, DbStudent>(
            "SELECT id, name, birth_date FROM students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list students")?;

        Ok(db_students.into_iter().map(Student::from).collect())
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        let db_student = sqlx::query_as::<_, DbStudent>(
            "SELECT id, name, birth_date FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context(format!("Failed to load student {}", id))?;

        Ok(db_student.map(Student::from))
    }

    async fn missing_students(&self, ids: &[i64]) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // the whole list travels as one JSON parameter, so its length is not
        // bounded by SQLite's bind-variable limit
        let ids_json = serde_json::to_string(ids).context("Failed to encode student ids")?;

        let unknown = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT value FROM json_each(?)
            WHERE value NOT IN (SELECT id FROM students)
            ORDER BY key
            "#,
        )
        .bind(ids_json)
        .fetch_all(&self.pool)
        .await
        .context("Failed to look up students")?;

        let mut seen = HashSet::new();
        Ok(unknown.into_iter().filter(|id| seen.insert(*id)).collect())
    }

    async fn create_student(&self, student: &NewStudent) -> Result<Student> {
        let id = sqlx::query("INSERT INTO students (name, birth_date) VALUES (?, ?)")
            .bind(&student.name)
            .bind(student.birth_date)
            .execute(&self.pool)
            .await
            .context(format!("Failed to insert student {}", student.name))?
            .last_insert_rowid();

        Ok(Student {
            id,
            name: student.name.clone(),
            birth_date: student.birth_date,
        })
    }
}
