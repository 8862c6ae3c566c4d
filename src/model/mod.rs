pub mod course;

pub use course::{stamp_modules, utc_now, Course, CourseUpdate, Lesson, Module, Resource};
