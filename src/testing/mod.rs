use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::database::document::parse_object_id;
use crate::database::{CoursePage, CourseRepository, Deadline, RepositoryError};
use crate::filter::{CourseFilter, Pagination};
use crate::model::{stamp_modules, utc_now, Course, CourseUpdate};

/// In-memory stand-in for the course store. Keeps insertion order, so paging
/// is stable across calls.
#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.courses.read().await.len()
    }
}

fn check(deadline: &Deadline) -> Result<(), RepositoryError> {
    if deadline.is_expired() {
        return Err(RepositoryError::Timeout);
    }
    Ok(())
}

fn position(courses: &[Course], oid: &ObjectId) -> Option<usize> {
    let hex = oid.to_hex();
    courses.iter().position(|c| c.id.as_deref() == Some(hex.as_str()))
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, mut course: Course, deadline: &Deadline) -> Result<Course, RepositoryError> {
        check(deadline)?;
        course.stamp_created(utc_now());
        course.id = Some(ObjectId::new().to_hex());
        self.courses.write().await.push(course.clone());
        Ok(course)
    }

    async fn get_by_id(&self, id: &str, deadline: &Deadline) -> Result<Course, RepositoryError> {
        let oid = parse_object_id(id)?;
        check(deadline)?;
        let courses = self.courses.read().await;
        position(&courses, &oid)
            .map(|i| courses[i].clone())
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_all(
        &self,
        filter: &CourseFilter,
        pagination: Pagination,
        deadline: &Deadline,
    ) -> Result<CoursePage, RepositoryError> {
        check(deadline)?;
        let courses = self.courses.read().await;
        let matching: Vec<&Course> = courses.iter().filter(|c| filter.matches(c)).collect();
        Ok(CoursePage {
            total: matching.len() as u64,
            courses: matching
                .into_iter()
                .skip(pagination.skip() as usize)
                .take(pagination.limit as usize)
                .cloned()
                .collect(),
        })
    }

    async fn update(&self, id: &str, mut update: CourseUpdate, deadline: &Deadline) -> Result<Course, RepositoryError> {
        let oid = parse_object_id(id)?;
        check(deadline)?;
        let now = utc_now();
        if let Some(modules) = update.modules.as_mut() {
            stamp_modules(modules, now);
        }
        update.updated_at.get_or_insert(now);

        let mut courses = self.courses.write().await;
        let index = position(&courses, &oid).ok_or(RepositoryError::NotFound)?;
        update.apply_to(&mut courses[index]);
        Ok(courses[index].clone())
    }

    async fn delete(&self, id: &str, deadline: &Deadline) -> Result<(), RepositoryError> {
        let oid = parse_object_id(id)?;
        check(deadline)?;
        let mut courses = self.courses.write().await;
        let index = position(&courses, &oid).ok_or(RepositoryError::NotFound)?;
        courses.remove(index);
        Ok(())
    }
}
