use axum::extract::{RawQuery, State};
use url::form_urlencoded;

use crate::api::{ApiResponse, ApiResult, AppState, PageResponse};
use crate::filter::{CourseFilter, Pagination};
use crate::model::Course;

/// Raw listing parameters. Kept as strings so bad values can be ignored
/// instead of rejecting the request.
#[derive(Debug, Default, PartialEq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub level: Option<String>,
    pub tag: Option<String>,
    pub min_price: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Parse a raw query string. The first value of a repeated key wins and
    /// unknown keys are ignored, so no query string is ever rejected.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "category" => &mut query.category,
                "level" => &mut query.level,
                "tag" => &mut query.tag,
                "min_price" => &mut query.min_price,
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }

    pub fn filter(&self) -> CourseFilter {
        CourseFilter::from_query(
            self.category.as_deref(),
            self.level.as_deref(),
            self.tag.as_deref(),
            self.min_price.as_deref(),
        )
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

/// GET /api/v1/courses - filtered, paginated listing
pub async fn list(State(state): State<AppState>, RawQuery(raw): RawQuery) -> ApiResult<PageResponse<Course>> {
    let query = ListQuery::parse(raw.as_deref());
    let filter = query.filter();
    let pagination = query.pagination();

    let page = state
        .courses
        .list_courses(&filter, pagination, &state.deadline())
        .await?;

    Ok(ApiResponse::success(PageResponse {
        data: page.courses,
        total: page.total,
        page: pagination.page,
        limit: pagination.limit,
    }))
}
