use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use bson::oid::ObjectId;
use course_content_api::api::{app, AppState};
use course_content_api::config::MongoConfig;
use course_content_api::database::{DatabaseManager, MongoCourseRepository};
use serde_json::Value;
use tower::ServiceExt;

pub const MONGO_URI_VAR: &str = "COURSES_TEST_MONGO_URI";

/// Router wired to a throwaway database on a real MongoDB.
pub struct TestApp {
    pub router: Router,
    database: DatabaseManager,
}

impl TestApp {
    /// Returns None when no test MongoDB is configured, so suites can skip.
    pub async fn spawn() -> Result<Option<Self>> {
        let Ok(uri) = std::env::var(MONGO_URI_VAR) else {
            eprintln!("{MONGO_URI_VAR} not set; skipping MongoDB integration test");
            return Ok(None);
        };

        let config = MongoConfig {
            uri,
            database: format!("courses_test_{}", ObjectId::new().to_hex()),
            ..MongoConfig::default()
        };
        let database = DatabaseManager::connect(&config).await?;
        let repository = Arc::new(MongoCourseRepository::new(database.courses()));
        let router = app(AppState::new(repository, Duration::from_secs(10)));

        Ok(Some(Self { router, database }))
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(request.body(body)?).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, value))
    }

    pub async fn cleanup(self) -> Result<()> {
        self.database.drop_database().await?;
        self.database.shutdown().await;
        Ok(())
    }
}
