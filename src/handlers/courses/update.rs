use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::api::{ApiResponse, ApiResult, AppState};
use crate::model::{Course, CourseUpdate};

/// PUT /api/v1/courses/:id - replace the fields present in the body
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CourseUpdate>, JsonRejection>,
) -> ApiResult<Course> {
    let Json(changes) = payload?;
    let updated = state.courses.update_course(&id, changes, &state.deadline()).await?;
    Ok(ApiResponse::success(updated))
}
