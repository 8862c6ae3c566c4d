use axum::extract::{Path, State};

use crate::api::{ApiResponse, ApiResult, AppState};

/// DELETE /api/v1/courses/:id - 204 with an empty body
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.courses.delete_course(&id, &state.deadline()).await?;
    Ok(ApiResponse::<()>::no_content())
}
