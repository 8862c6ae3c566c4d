// HTTP API Error Types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::RepositoryError;
use crate::services::ServiceError;

/// Message returned for both a missing course and a malformed identifier.
pub const COURSE_NOT_FOUND: &str = "course not found or invalid id";

/// HTTP API error with appropriate status codes and client-facing messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    MalformedRequest(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::MalformedRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Error envelope: clients rely on the status code and this shape only
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn malformed_request(message: impl Into<String>) -> Self {
        ApiError::MalformedRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::malformed_request(rejection.body_text())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            // 400 is reserved for bodies that fail to parse
            ServiceError::Validation(msg) => ApiError::internal_server_error(msg),
            // Identifier validity is not revealed to clients
            ServiceError::Repository(RepositoryError::InvalidIdentifier(_))
            | ServiceError::Repository(RepositoryError::NotFound) => ApiError::not_found(COURSE_NOT_FOUND),
            ServiceError::Repository(other) => {
                tracing::error!("Course store failure: {}", other);
                ApiError::internal_server_error(other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
