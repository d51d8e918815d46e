use crate::database::StudentRepository;
use crate::domain::{CourseChanges, NewCourse};
use crate::error::{ApiError, ApiResult};
use crate::features::courses::model::CourseInput;

pub const MAX_STUDENTS_PER_COURSE: usize = 20;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Replace,
    Partial,
}

impl WriteMode {
    fn requires_name(self) -> bool {
        !matches!(self, WriteMode::Partial)
    }
}

/// Rejects a payload that tries to put more than [`MAX_STUDENTS_PER_COURSE`]
/// students on a course. Payloads without `students` are not checked.
/// On success the input comes back unchanged.
pub fn validate_enrollment(input: CourseInput) -> ApiResult<CourseInput> {
    if let Some(students) = &input.students {
        let attempted = students.len();
        if attempted > MAX_STUDENTS_PER_COURSE {
            return Err(ApiError::EnrollmentLimitExceeded {
                attempted,
                max: MAX_STUDENTS_PER_COURSE,
            });
        }
    }

    Ok(input)
}

/// Validates course write payloads: field checks first, then the enrollment
/// cap. Nothing is persisted here.
pub struct CourseSerializer<'a> {
    students: &'a dyn StudentRepository,
    mode: WriteMode,
}

impl<'a> CourseSerializer<'a> {
    pub fn new(students: &'a dyn StudentRepository, mode: WriteMode) -> Self {
        Self { students, mode }
    }

    pub async fn validate(&self, input: CourseInput) -> ApiResult<CourseInput> {
        let name = self.validate_name(input.name)?;

        if let Some(ids) = &input.students {
            // the first unknown id is reported, however long the list
            let missing = self.students.missing_students(ids).await?;
            if let Some(id) = missing.first() {
                return Err(ApiError::invalid_field(
                    "students",
                    format!("Invalid pk \"{}\" - object does not exist.", id),
                ));
            }
        }

        validate_enrollment(CourseInput {
            name,
            students: input.students,
        })
    }

    fn validate_name(&self, name: Option<String>) -> ApiResult<Option<String>> {
        match name {
            None if self.mode.requires_name() => Err(ApiError::invalid_field("name", REQUIRED)),
            None => Ok(None),
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(ApiError::invalid_field("name", BLANK));
                }
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}

impl CourseInput {
    pub fn into_new_course(self) -> ApiResult<NewCourse> {
        let name = self
            .name
            .ok_or_else(|| ApiError::invalid_field("name", REQUIRED))?;

        Ok(NewCourse {
            name,
            students: self.students.unwrap_or_default(),
        })
    }

    pub fn into_changes(self) -> CourseChanges {
        CourseChanges {
            name: self.name,
            students: self.students,
        }
    }
}
