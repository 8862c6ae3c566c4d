use async_trait::async_trait;
use bson::{doc, Bson};
use futures::TryStreamExt;
use mongodb::options::{CountOptions, FindOneAndUpdateOptions, FindOneOptions, FindOptions, ReturnDocument};
use mongodb::Collection;
use tracing::debug;

use crate::database::deadline::Deadline;
use crate::database::document::{parse_object_id, update_document, CourseDocument};
use crate::database::repository::{CoursePage, CourseRepository, RepositoryError};
use crate::filter::{CourseFilter, Pagination};
use crate::model::{stamp_modules, utc_now, Course, CourseUpdate};

/// MongoDB-backed course repository over one collection.
#[derive(Clone, Debug)]
pub struct MongoCourseRepository {
    collection: Collection<CourseDocument>,
}

impl MongoCourseRepository {
    pub fn new(collection: Collection<CourseDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn create(&self, mut course: Course, deadline: &Deadline) -> Result<Course, RepositoryError> {
        course.stamp_created(utc_now());
        let document = CourseDocument::from(course.clone());

        let result = deadline.run(self.collection.insert_one(&document, None)).await?;
        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid,
            other => return Err(RepositoryError::Encoding(format!("unexpected inserted id: {other}"))),
        };

        debug!("Inserted course {}", id);
        course.id = Some(id.to_hex());
        Ok(course)
    }

    async fn get_by_id(&self, id: &str, deadline: &Deadline) -> Result<Course, RepositoryError> {
        let oid = parse_object_id(id)?;
        let options = FindOneOptions::builder().max_time(deadline.remaining()).build();

        deadline
            .run(self.collection.find_one(doc! { "_id": oid }, options))
            .await?
            .map(Course::from)
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_all(
        &self,
        filter: &CourseFilter,
        pagination: Pagination,
        deadline: &Deadline,
    ) -> Result<CoursePage, RepositoryError> {
        let query = filter.to_document();
        debug!("Listing courses where {} (page {}, limit {})", query, pagination.page, pagination.limit);

        let find_options = FindOptions::builder()
            .skip(pagination.skip())
            .limit(pagination.limit as i64)
            .max_time(deadline.remaining())
            .build();
        let documents: Vec<CourseDocument> = deadline
            .run(async {
                let cursor = self.collection.find(query.clone(), find_options).await?;
                cursor.try_collect::<Vec<CourseDocument>>().await
            })
            .await?;

        let count_options = CountOptions::builder().max_time(deadline.remaining()).build();
        let total = deadline
            .run(self.collection.count_documents(query, count_options))
            .await?;

        Ok(CoursePage {
            courses: documents.into_iter().map(Course::from).collect(),
            total,
        })
    }

    async fn update(&self, id: &str, mut update: CourseUpdate, deadline: &Deadline) -> Result<Course, RepositoryError> {
        let oid = parse_object_id(id)?;
        let now = utc_now();
        if let Some(modules) = update.modules.as_mut() {
            stamp_modules(modules, now);
        }
        let changes = update_document(&update, update.updated_at.unwrap_or(now))?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .max_time(deadline.remaining())
            .build();

        let updated = deadline
            .run(self.collection.find_one_and_update(doc! { "_id": oid }, changes, options))
            .await?
            .ok_or(RepositoryError::NotFound)?;

        debug!("Updated course {}", oid);
        Ok(Course::from(updated))
    }

    async fn delete(&self, id: &str, deadline: &Deadline) -> Result<(), RepositoryError> {
        let oid = parse_object_id(id)?;

        let result = deadline
            .run(self.collection.delete_one(doc! { "_id": oid }, None))
            .await?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::NotFound);
        }

        debug!("Deleted course {}", oid);
        Ok(())
    }
}
