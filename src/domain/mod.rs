pub mod course;
pub mod student;

pub use course::{Course, CourseChanges, CourseFilter, NewCourse};
pub use student::{NewStudent, Student};
