pub mod course_repository;
pub mod deadline;
pub mod document;
pub mod manager;
pub mod repository;

pub use course_repository::MongoCourseRepository;
pub use deadline::Deadline;
pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{CoursePage, CourseRepository, RepositoryError};
