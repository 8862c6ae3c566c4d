use bson::{doc, Document};

use crate::model::Course;

/// Closed set of predicates a course listing can be narrowed by.
#[derive(Debug, Clone, PartialEq)]
pub enum CoursePredicate {
    CategoryEquals(String),
    LevelEquals(String),
    /// Set membership: the course carries this tag among its tags
    HasTag(String),
    PriceAtLeast(f64),
}

impl CoursePredicate {
    pub fn field(&self) -> &'static str {
        match self {
            CoursePredicate::CategoryEquals(_) => "category",
            CoursePredicate::LevelEquals(_) => "level",
            CoursePredicate::HasTag(_) => "tags",
            CoursePredicate::PriceAtLeast(_) => "price",
        }
    }

    /// Store clause for this predicate. Equality against an array field
    /// matches when any element is equal, which gives tag membership.
    fn append_to(&self, document: &mut Document) {
        match self {
            CoursePredicate::CategoryEquals(v)
            | CoursePredicate::LevelEquals(v)
            | CoursePredicate::HasTag(v) => {
                document.insert(self.field(), v.clone());
            }
            CoursePredicate::PriceAtLeast(min) => {
                document.insert(self.field(), doc! { "$gte": *min });
            }
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        match self {
            CoursePredicate::CategoryEquals(v) => course.category == *v,
            CoursePredicate::LevelEquals(v) => course.level == *v,
            CoursePredicate::HasTag(v) => course.tags.iter().any(|t| t == v),
            CoursePredicate::PriceAtLeast(min) => course.price >= *min,
        }
    }
}

/// Conjunction of predicates, at most one per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    predicates: Vec<CoursePredicate>,
}

impl CourseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate, replacing any earlier one on the same field.
    pub fn with(mut self, predicate: CoursePredicate) -> Self {
        self.predicates.retain(|p| p.field() != predicate.field());
        self.predicates.push(predicate);
        self
    }

    /// Build a filter from raw query values. Blank values are skipped and a
    /// `min_price` that does not parse as a number is ignored.
    pub fn from_query(
        category: Option<&str>,
        level: Option<&str>,
        tag: Option<&str>,
        min_price: Option<&str>,
    ) -> Self {
        let mut filter = Self::new();
        if let Some(v) = non_blank(category) {
            filter = filter.with(CoursePredicate::CategoryEquals(v.to_string()));
        }
        if let Some(v) = non_blank(level) {
            filter = filter.with(CoursePredicate::LevelEquals(v.to_string()));
        }
        if let Some(v) = non_blank(tag) {
            filter = filter.with(CoursePredicate::HasTag(v.to_string()));
        }
        if let Some(min) = non_blank(min_price).and_then(|v| v.trim().parse::<f64>().ok()) {
            if min.is_finite() {
                filter = filter.with(CoursePredicate::PriceAtLeast(min));
            }
        }
        filter
    }

    pub fn predicates(&self) -> &[CoursePredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        for predicate in &self.predicates {
            predicate.append_to(&mut document);
        }
        document
    }

    pub fn matches(&self, course: &Course) -> bool {
        self.predicates.iter().all(|p| p.matches(course))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
