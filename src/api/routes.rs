use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::state::AppState;
use crate::handlers;

pub const API_PREFIX: &str = "/api/v1";

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(handlers::health))
        .nest(API_PREFIX, course_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn course_routes() -> Router<AppState> {
    use handlers::courses;

    Router::new()
        .route("/courses", get(courses::list).post(courses::create))
        .route(
            "/courses/:id",
            get(courses::show).put(courses::update).delete(courses::delete),
        )
}
