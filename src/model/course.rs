use bson::oid::ObjectId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current UTC time at the store's millisecond resolution, so a stamped
/// record reads back with identical timestamps.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

/// Attachment inside a lesson (video, document, quiz metadata)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Free-text tag such as "video", "pdf" or "quiz"
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Free-form payload, stored as given
    #[serde(default)]
    pub meta: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub duration_min: i64,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lessons: Vec<Lesson>,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Top-level course record. Modules, lessons and resources are embedded and
/// live and die with the owning course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Store-assigned identifier; ignored on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// beginner, intermediate, advanced (not enforced)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub level: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Module>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Set created_at/updated_at to `now` and fill in missing nested identifiers.
    pub fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
        self.updated_at = Some(now);
        stamp_modules(&mut self.modules, now);
    }
}

/// Give modules and lessons without an identifier a fresh one, and a creation
/// time when they carry none. Values already present are left alone.
pub fn stamp_modules(modules: &mut [Module], now: DateTime<Utc>) {
    for module in modules {
        module.id.get_or_insert_with(|| ObjectId::new().to_hex());
        module.created_at.get_or_insert(now);
        for lesson in &mut module.lessons {
            lesson.id.get_or_insert_with(|| ObjectId::new().to_hex());
            lesson.created_at.get_or_insert(now);
        }
    }
}

/// Fields a client may replace on an existing course. Each present field
/// overwrites the stored value wholesale; arrays are not merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub price: Option<f64>,
    pub instructor_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub modules: Option<Vec<Module>>,
    #[serde(skip)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CourseUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Apply present fields to `course`, including the updated_at stamp.
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(title) = &self.title {
            course.title = title.clone();
        }
        if let Some(description) = &self.description {
            course.description = description.clone();
        }
        if let Some(category) = &self.category {
            course.category = category.clone();
        }
        if let Some(level) = &self.level {
            course.level = level.clone();
        }
        if let Some(price) = self.price {
            course.price = price;
        }
        if let Some(instructor_id) = &self.instructor_id {
            course.instructor_id = Some(instructor_id.clone());
        }
        if let Some(tags) = &self.tags {
            course.tags = tags.clone();
        }
        if let Some(modules) = &self.modules {
            course.modules = modules.clone();
        }
        if let Some(updated_at) = self.updated_at {
            course.updated_at = Some(updated_at);
        }
    }
}
