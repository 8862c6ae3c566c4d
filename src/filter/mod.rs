pub mod course_filter;
pub mod pagination;

pub use course_filter::{CourseFilter, CoursePredicate};
pub use pagination::Pagination;
