mod common;

use std::collections::HashSet;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

// These tests run the full router against a real MongoDB named by
// COURSES_TEST_MONGO_URI. Each test uses its own database and drops it.

#[tokio::test]
async fn create_then_fetch_round_trips_the_tree() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };

    let (status, created) = app
        .request(
            Method::POST,
            "/api/v1/courses",
            Some(json!({
                "title": "Intro to Go",
                "level": "beginner",
                "tags": ["go"],
                "modules": [{
                    "title": "Basics",
                    "order": 1,
                    "lessons": [{
                        "title": "Hello",
                        "duration_min": 5,
                        "resources": [{ "type": "video", "url": "https://cdn.example.com/hello.mp4", "meta": { "hd": true } }]
                    }]
                }]
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["title"], "Intro to Go");
    assert_eq!(created["created_at"], created["updated_at"]);
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());

    let (status, fetched) = app.request(Method::GET, &format!("/api/v1/courses/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    app.cleanup().await
}

#[tokio::test]
async fn listing_pages_and_filters() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };

    for i in 0..5 {
        let tags = if i % 2 == 0 { json!(["even"]) } else { json!(["odd"]) };
        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/courses",
                Some(json!({ "title": format!("Course {i}"), "price": i * 10, "tags": tags })),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let mut seen = HashSet::new();
    for page in 1..=3 {
        let (status, body) = app
            .request(Method::GET, &format!("/api/v1/courses?page={page}&limit=2"), None)
            .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        for course in body["data"].as_array().cloned().unwrap_or_default() {
            seen.insert(course["id"].as_str().unwrap_or_default().to_string());
        }
    }
    assert_eq!(seen.len(), 5);

    // prices 20 and 40 carry the "even" tag
    let (_, body) = app.request(Method::GET, "/api/v1/courses?tag=even&min_price=15", None).await?;
    assert_eq!(body["total"], 2);

    let (_, body) = app.request(Method::GET, "/api/v1/courses?min_price=1000", None).await?;
    assert_eq!(body["total"], 0);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);

    app.cleanup().await
}

#[tokio::test]
async fn update_and_delete_lifecycle() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };

    let (_, created) = app
        .request(
            Method::POST,
            "/api/v1/courses",
            Some(json!({ "title": "Old", "category": "programming", "tags": ["a", "b"] })),
        )
        .await?;
    let uri = format!("/api/v1/courses/{}", created["id"].as_str().unwrap_or_default());
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, updated) = app.request(Method::PUT, &uri, Some(json!({ "title": "X" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "X");
    assert_eq!(updated["tags"], created["tags"]);
    assert_eq!(updated["category"], created["category"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);

    let (status, body) = app.request(Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, missing) = app.request(Method::GET, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, invalid) = app.request(Method::GET, "/api/v1/courses/bogus", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, invalid);

    app.cleanup().await
}
