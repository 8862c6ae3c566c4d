use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::{ApiResponse, ApiResult, AppState};
use crate::model::Course;

/// POST /api/v1/courses - create a course (title required)
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Course>, JsonRejection>,
) -> ApiResult<Course> {
    let Json(course) = payload?;
    let created = state.courses.create_course(course, &state.deadline()).await?;
    Ok(ApiResponse::created(created))
}
