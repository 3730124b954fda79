//! Server-rendered page tests
//!
//! Static pages and the database-unavailable behavior run without
//! PostgreSQL; blog and dashboard rendering need the test database.

use axum::http::{header, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::common::*;
use matchday::shared::Role;

#[tokio::test]
async fn test_marketing_pages_render() {
    let app = test_app(None);

    for (path, heading) in [
        ("/", "Sharper picks for every matchday"),
        ("/about", "About Matchday"),
        ("/pricing", "premium-monthly"),
        ("/privacy", "Privacy policy"),
        ("/terms", "Terms of service"),
    ] {
        let response = app.server.get(path).await;
        assert_status!(response, StatusCode::OK);
        let html = response.text();
        assert!(html.contains(heading), "{} is missing {:?}", path, heading);
        assert!(html.contains(r#"<script src="/static/app.js" defer></script>"#));
        assert!(html.contains(r#"id="toasts""#));
    }
}

#[tokio::test]
async fn test_account_pages_render_schema_forms() {
    let app = test_app(None);

    let html = app.server.get("/sign-up").await.text();
    assert!(html.contains(r#"action="/api/auth/sign-up""#));
    assert!(html.contains(r#"name="username""#));

    let html = app.server.get("/reset-password?token=abc123").await.text();
    assert!(html.contains(r#"name="token""#));
    assert!(html.contains(r#"value="abc123""#));

    let html = app.server.get("/verify-email?token=tok").await.text();
    assert!(html.contains(r#"data-autosubmit="verify-email""#));

    let html = app.server.get("/verify-email").await.text();
    assert!(html.contains("Verification link missing"));
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_page() {
    let app = test_app(None);
    let response = app.server.get("/definitely/not/here").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.text().contains("Page not found"));
}

#[tokio::test]
async fn test_dashboard_redirects_anonymous_visitors() {
    let app = test_app(None);
    let response = app.server.get("/dashboard").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/sign-in");
}

#[tokio::test]
async fn test_pages_and_api_without_database() {
    let app = test_app(None);

    let response = app.server.get("/blog").await;
    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.text().contains("Temporarily unavailable"));

    let response = app.server.get("/api/predictions").await;
    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
    assert_error_contains!(response, "Database");
}

#[tokio::test]
async fn test_blog_post_page_and_dashboard() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let reader = create_test_user(&app.state, db.pool(), Role::User, false).await;
    let title = format!("Title race {}", Uuid::new_v4().simple());

    let response = app
        .server
        .post("/api/posts")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({
            "title": title,
            "excerpt": "Run-in analysis",
            "content": "Five games left.\n\nEvery point counts.",
            "category": "football",
            "published": true,
        }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    let slug = response.json::<serde_json::Value>()["slug"].as_str().unwrap().to_string();

    let response = app.server.get(&format!("/blog/{}", slug)).await;
    assert_status!(response, StatusCode::OK);
    let html = response.text();
    assert!(html.contains(&title));
    assert!(html.contains("<p>Every point counts.</p>"));
    assert!(html.contains("Sign in</a> to comment"));

    let response = app
        .server
        .get(&format!("/blog/{}", slug))
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert!(response.text().contains("Verify your email address to join the discussion"));

    assert_status!(app.server.get("/blog/no-such-post").await, StatusCode::NOT_FOUND);

    let response = app
        .server
        .get("/dashboard")
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Resend verification email"));
    assert!(!html.contains("Site statistics"));

    let response = app
        .server
        .get("/dashboard")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Site statistics"));
    assert!(html.contains(r#"action="/api/predictions""#));
    assert!(html.contains(r#"action="/api/payments""#));
}
