use axum::extract::{Path, State};

use crate::api::{ApiResponse, ApiResult, AppState};
use crate::model::Course;

/// GET /api/v1/courses/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Course> {
    let course = state.courses.get_course(&id, &state.deadline()).await?;
    Ok(ApiResponse::success(course))
}
