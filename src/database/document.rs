use bson::oid::ObjectId;
use bson::{doc, Bson, DateTime as BsonDateTime, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::repository::RepositoryError;
use crate::model::{Course, CourseUpdate, Module};

/// Storage shape of a course: store-native `_id` and BSON datetimes. Nested
/// modules are embedded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub level: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<BsonDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<BsonDateTime>,
}

/// Parse a hex identifier into the store's native id.
pub fn parse_object_id(id: &str) -> Result<ObjectId, RepositoryError> {
    ObjectId::parse_str(id).map_err(|_| RepositoryError::InvalidIdentifier(id.to_string()))
}

fn to_bson_datetime(value: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_chrono(value)
}

impl From<Course> for CourseDocument {
    /// Any client-supplied id is dropped; the store assigns `_id` on insert.
    fn from(course: Course) -> Self {
        Self {
            id: None,
            title: course.title,
            description: course.description,
            category: course.category,
            level: course.level,
            price: course.price,
            instructor_id: course.instructor_id,
            tags: course.tags,
            modules: course.modules,
            created_at: course.created_at.map(to_bson_datetime),
            updated_at: course.updated_at.map(to_bson_datetime),
        }
    }
}

impl From<CourseDocument> for Course {
    fn from(document: CourseDocument) -> Self {
        Self {
            id: document.id.map(|oid| oid.to_hex()),
            title: document.title,
            description: document.description,
            category: document.category,
            level: document.level,
            price: document.price,
            instructor_id: document.instructor_id,
            tags: document.tags,
            modules: document.modules,
            created_at: document.created_at.map(|dt| dt.to_chrono()),
            updated_at: document.updated_at.map(|dt| dt.to_chrono()),
        }
    }
}

/// `$set` document for a partial update: exactly the present fields plus
/// `updated_at`.
pub fn update_document(update: &CourseUpdate, updated_at: DateTime<Utc>) -> Result<Document, RepositoryError> {
    let mut set = Document::new();
    if let Some(title) = &update.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &update.description {
        set.insert("description", description.as_str());
    }
    if let Some(category) = &update.category {
        set.insert("category", category.as_str());
    }
    if let Some(level) = &update.level {
        set.insert("level", level.as_str());
    }
    if let Some(price) = update.price {
        set.insert("price", price);
    }
    if let Some(instructor_id) = &update.instructor_id {
        set.insert("instructor_id", instructor_id.as_str());
    }
    if let Some(tags) = &update.tags {
        set.insert("tags", tags.clone());
    }
    if let Some(modules) = &update.modules {
        set.insert("modules", bson::to_bson(modules)?);
    }
    set.insert("updated_at", Bson::DateTime(to_bson_datetime(updated_at)));
    Ok(doc! { "$set": set })
}
