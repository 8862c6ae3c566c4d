use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::database::{CoursePage, CourseRepository, Deadline, RepositoryError};
use crate::filter::{CourseFilter, Pagination};
use crate::model::{utc_now, Course, CourseUpdate};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Business-rule gate in front of the course repository.
#[derive(Clone)]
pub struct CourseService {
    repository: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repository: Arc<dyn CourseRepository>) -> Self {
        Self { repository }
    }

    /// Create a course. The title must contain something other than whitespace.
    pub async fn create_course(&self, mut course: Course, deadline: &Deadline) -> Result<Course, ServiceError> {
        if course.title.trim().is_empty() {
            return Err(ServiceError::Validation("title required".to_string()));
        }

        course.stamp_created(utc_now());
        let created = self.repository.create(course, deadline).await?;
        info!("Created course {:?} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn get_course(&self, id: &str, deadline: &Deadline) -> Result<Course, ServiceError> {
        Ok(self.repository.get_by_id(id, deadline).await?)
    }

    pub async fn list_courses(
        &self,
        filter: &CourseFilter,
        pagination: Pagination,
        deadline: &Deadline,
    ) -> Result<CoursePage, ServiceError> {
        Ok(self.repository.get_all(filter, pagination, deadline).await?)
    }

    pub async fn update_course(
        &self,
        id: &str,
        mut update: CourseUpdate,
        deadline: &Deadline,
    ) -> Result<Course, ServiceError> {
        update.updated_at = Some(utc_now());
        let updated = self.repository.update(id, update, deadline).await?;
        info!("Updated course {}", id);
        Ok(updated)
    }

    pub async fn delete_course(&self, id: &str, deadline: &Deadline) -> Result<(), ServiceError> {
        self.repository.delete(id, deadline).await?;
        info!("Deleted course {}", id);
        Ok(())
    }
}
