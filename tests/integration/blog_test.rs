//! Blog API integration tests
//!
//! Post publishing, draft visibility, reactions, shares and comments.

use axum::http::{header, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::*;
use matchday::shared::Role;

fn unique_title() -> String {
    format!("Derby preview {}", Uuid::new_v4().simple())
}

async fn create_post(app: &TestApp, admin: &TestUser, title: &str, published: bool) -> Value {
    let response = app
        .server
        .post("/api/posts")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({
            "title": title,
            "excerpt": "Who wins the derby?",
            "content": "Both sides arrive in form.\n\nExpect goals.",
            "category": "Football",
            "published": published,
        }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_admin_creates_post_with_derived_slug() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let title = unique_title();

    let post = create_post(&app, &admin, &title, true).await;
    let slug = post["slug"].as_str().unwrap();
    assert!(slug.starts_with("derby-preview-"));

    let response = app.server.get(&format!("/api/posts/slug/{}", slug)).await;
    assert_status!(response, StatusCode::OK);
    let detail: Value = response.json();
    assert_eq!(detail["title"], title);
    assert_eq!(detail["stats"]["views"], 1);
    assert_eq!(detail["liked_by_me"], false);

    // Same title, same slug
    let response = app
        .server
        .post("/api/posts")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "title": title, "excerpt": "x", "content": "y", "category": "football" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_admin_cannot_create_post() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let response = app
        .server
        .post("/api/posts")
        .add_header(header::AUTHORIZATION, user.bearer())
        .json(&json!({ "title": unique_title(), "excerpt": "x", "content": "y", "category": "football" }))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .post("/api/posts")
        .json(&json!({ "title": unique_title(), "excerpt": "x", "content": "y", "category": "football" }))
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_drafts_are_hidden_from_readers() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let reader = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let draft = create_post(&app, &admin, &unique_title(), false).await;
    let id = draft["id"].as_str().unwrap();

    let response = app.server.get(&format!("/api/posts/{}", id)).await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .get(&format!("/api/posts/{}", id))
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .get(&format!("/api/posts/{}", id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);

    let response = app
        .server
        .put(&format!("/api/posts/{}", id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "published": true }))
        .await;
    assert_status!(response, StatusCode::OK);

    let response = app.server.get(&format!("/api/posts/{}", id)).await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_like_and_save_toggle() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let reader = create_test_user(&app.state, db.pool(), Role::User, false).await;
    let post = create_post(&app, &admin, &unique_title(), true).await;
    let id = post["id"].as_str().unwrap();

    let like = |user: &TestUser| {
        app.server
            .post(&format!("/api/posts/{}/like", id))
            .add_header(header::AUTHORIZATION, user.bearer())
    };

    let body: Value = like(&reader).await.json();
    assert_eq!(body, json!({ "active": true, "count": 1 }));
    let body: Value = like(&admin).await.json();
    assert_eq!(body, json!({ "active": true, "count": 2 }));
    let body: Value = like(&reader).await.json();
    assert_eq!(body, json!({ "active": false, "count": 1 }));

    let response = app
        .server
        .post(&format!("/api/posts/{}/save", id))
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert_status!(response, StatusCode::OK);

    let response = app
        .server
        .get("/api/saves")
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    let saves: Vec<Value> = response.json();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0]["id"], post["id"]);

    let response = app.server.post(&format!("/api/posts/{}/like", id)).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_shares_are_counted_without_session() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let post = create_post(&app, &admin, &unique_title(), true).await;
    let id = post["id"].as_str().unwrap();

    for expected in 1..=2 {
        let response = app
            .server
            .post(&format!("/api/posts/{}/share", id))
            .json(&json!({ "platform": "WhatsApp" }))
            .await;
        assert_status!(response, StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["count"], expected);
    }

    let response = app
        .server
        .post(&format!("/api/posts/{}/share", id))
        .json(&json!({ "platform": "not a platform!" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comments_require_verified_author() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let verified = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let unverified = create_test_user(&app.state, db.pool(), Role::User, false).await;
    let other = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let post = create_post(&app, &admin, &unique_title(), true).await;
    let comments_url = format!("/api/posts/{}/comments", post["id"].as_str().unwrap());

    let response = app
        .server
        .post(&comments_url)
        .add_header(header::AUTHORIZATION, unverified.bearer())
        .json(&json!({ "content": "First!" }))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .post(&comments_url)
        .add_header(header::AUTHORIZATION, verified.bearer())
        .json(&json!({ "content": "Home win for me" }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    let comment: Value = response.json();
    assert_eq!(comment["username"], verified.username);
    let comment_url = format!("/api/comments/{}", comment["id"].as_str().unwrap());

    let comments: Vec<Value> = app.server.get(&comments_url).await.json();
    assert_eq!(comments.len(), 1);

    let response = app
        .server
        .delete(&comment_url)
        .add_header(header::AUTHORIZATION, other.bearer())
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .delete(&comment_url)
        .add_header(header::AUTHORIZATION, verified.bearer())
        .await;
    assert_status!(response, StatusCode::OK);

    let comments: Vec<Value> = app.server.get(&comments_url).await.json();
    assert!(comments.is_empty());
}

#[tokio::test]
async fn test_category_filter_and_delete() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let post = create_post(&app, &admin, &unique_title(), true).await;
    assert_eq!(post["category"], "football");

    let response = app.server.get("/api/posts?category=FOOTBALL&per_page=100").await;
    assert_status!(response, StatusCode::OK);
    let page: Value = response.json();
    assert!(page["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["category"] == "football" && p["published"] == true));

    let url = format!("/api/posts/{}", post["id"].as_str().unwrap());
    let response = app
        .server
        .delete(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    assert_status!(app.server.get(&url).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_update_checks_supplied_fields() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let post = create_post(&app, &admin, &unique_title(), true).await;
    let url = format!("/api/posts/{}", post["id"].as_str().unwrap());

    for (body, field) in [
        (json!({ "content": "" }), "content"),
        (json!({ "title": "t".repeat(201) }), "title"),
        (json!({ "slug": "  " }), "slug"),
    ] {
        let response = app
            .server
            .put(&url)
            .add_header(header::AUTHORIZATION, admin.bearer())
            .json(&body)
            .await;
        assert_status!(response, StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["fields"][0]["field"], field);
    }

    let response = app
        .server
        .put(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "excerpt": "Updated after team news" }))
        .await;
    assert_status!(response, StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["excerpt"], "Updated after team news");
    assert_eq!(updated["content"], post["content"]);
}
