use async_trait::async_trait;
use thiserror::Error;

use crate::database::deadline::Deadline;
use crate::filter::{CourseFilter, Pagination};
use crate::model::{Course, CourseUpdate};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("no document found")]
    NotFound,

    #[error(transparent)]
    Persistence(#[from] mongodb::error::Error),

    #[error("document encoding error: {0}")]
    Encoding(String),

    #[error("store operation exceeded the request deadline")]
    Timeout,
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::Encoding(err.to_string())
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::Encoding(err.to_string())
    }
}

/// One page of matching courses plus the total match count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePage {
    pub courses: Vec<Course>,
    pub total: u64,
}

/// Persistence operations for course records. All store I/O goes through
/// here; every call is bounded by the caller's deadline.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a course, stamping created_at/updated_at, and return it with its new id.
    async fn create(&self, course: Course, deadline: &Deadline) -> Result<Course, RepositoryError>;

    async fn get_by_id(&self, id: &str, deadline: &Deadline) -> Result<Course, RepositoryError>;

    /// Page through courses matching `filter`. Order is whatever the store returns.
    async fn get_all(
        &self,
        filter: &CourseFilter,
        pagination: Pagination,
        deadline: &Deadline,
    ) -> Result<CoursePage, RepositoryError>;

    /// Replace the present fields, stamp updated_at and return the updated course.
    async fn update(&self, id: &str, update: CourseUpdate, deadline: &Deadline) -> Result<Course, RepositoryError>;

    async fn delete(&self, id: &str, deadline: &Deadline) -> Result<(), RepositoryError>;
}
