//! User management integration tests

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use crate::common::*;
use matchday::backend::auth::users::{get_user_by_id, update_user};
use matchday::shared::models::user::{AdminUserUpdate, ProfileUpdate};
use matchday::shared::Role;

#[tokio::test]
async fn test_users_can_only_read_themselves() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let other = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let response = app
        .server
        .get(&format!("/api/users/{}", user.id))
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;
    assert_status!(response, StatusCode::OK);

    let response = app
        .server
        .get(&format!("/api/users/{}", other.id))
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .get("/api/users")
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_updates_and_admin_fields() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let url = format!("/api/users/{}", user.id);

    let response = app
        .server
        .put(&url)
        .add_header(header::AUTHORIZATION, user.bearer())
        .json(&json!({ "role": "admin" }))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let (new_name, _) = unique_identity("renamed");
    let response = app
        .server
        .put(&url)
        .add_header(header::AUTHORIZATION, user.bearer())
        .json(&json!({ "username": new_name, "location": "Accra, Ghana" }))
        .await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["username"], new_name);
    assert_eq!(body["location"], "Accra, Ghana");

    let other = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let response = app
        .server
        .put(&format!("/api/users/{}", other.id))
        .add_header(header::AUTHORIZATION, other.bearer())
        .json(&json!({ "username": new_name }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_manages_users() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let user = create_test_user(&app.state, db.pool(), Role::User, false).await;
    let url = format!("/api/users/{}", user.id);

    let response = app
        .server
        .put(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "is_verified": true, "subscription_status": "active" }))
        .await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["is_verified"], true);
    assert_eq!(body["subscription_status"], "active");

    let response = app
        .server
        .put(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "subscription_status": "lifetime" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .delete(&format!("/api/users/{}", admin.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .delete(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);

    let response = app
        .server
        .get(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_stats_are_admin_only() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let response = app
        .server
        .get("/api/dashboard/stats")
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .get("/api/dashboard/stats")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    let stats: Value = response.json();
    assert!(stats["users"].as_i64().unwrap() >= 2);
    assert!(stats["verified_users"].as_i64().unwrap() >= 2);
}

#[tokio::test]
async fn test_deleting_accounts_keeps_posts_and_payments() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let author = create_admin(&app.state, db.pool()).await;
    let payer = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let (title, _) = unique_identity("Farewell post");
    let response = app
        .server
        .post("/api/posts")
        .add_header(header::AUTHORIZATION, author.bearer())
        .json(&json!({
            "title": title,
            "excerpt": "Written before leaving",
            "content": "Still worth reading.",
            "category": "football",
            "published": true,
        }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    let post: Value = response.json();

    let reference = format!("ref-{}", uuid::Uuid::new_v4());
    let response = app
        .server
        .post("/api/payments")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({
            "user_id": payer.id,
            "amount_cents": 1999,
            "currency": "usd",
            "plan": "premium-monthly",
            "reference": reference,
            "status": "succeeded",
        }))
        .await;
    assert_status!(response, StatusCode::CREATED);

    for id in [author.id, payer.id] {
        let response = app
            .server
            .delete(&format!("/api/users/{}", id))
            .add_header(header::AUTHORIZATION, admin.bearer())
            .await;
        assert_status!(response, StatusCode::OK);
    }

    let response = app
        .server
        .get(&format!("/api/posts/{}", post["id"].as_str().unwrap()))
        .await;
    assert_status!(response, StatusCode::OK);
    let detail: Value = response.json();
    assert_eq!(detail["title"], json!(title));
    assert!(detail["author_id"].is_null());

    let response = app
        .server
        .get("/api/payments?per_page=100")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    let page: Value = response.json();
    let kept = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["reference"] == json!(reference))
        .expect("payment survives its payer");
    assert!(kept["user_id"].is_null());
    assert_eq!(kept["status"], "succeeded");
}

#[tokio::test]
async fn test_combined_update_is_all_or_nothing() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let other = create_test_user(&app.state, db.pool(), Role::User, true).await;

    // Taken username alongside an admin change, as if the name was claimed
    // after the handler's availability check
    let profile = ProfileUpdate {
        username: Some(other.username.clone()),
        ..ProfileUpdate::default()
    };
    let admin = AdminUserUpdate {
        subscription_status: Some("active".to_string()),
        ..AdminUserUpdate::default()
    };
    let result = update_user(db.pool(), user.id, &profile, &admin).await;
    assert!(result.is_err());

    let stored = get_user_by_id(db.pool(), user.id).await.unwrap().unwrap();
    assert_eq!(stored.username, user.username);
    assert_eq!(stored.subscription_status, None);
}

#[tokio::test]
async fn test_demoted_admin_loses_access_before_token_expires() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let other_admin = create_admin(&app.state, db.pool()).await;

    let response = app
        .server
        .put(&format!("/api/users/{}", admin.id))
        .add_header(header::AUTHORIZATION, other_admin.bearer())
        .json(&json!({ "role": "user" }))
        .await;
    assert_status!(response, StatusCode::OK);

    // Same token, still carrying the admin role claim
    let response = app
        .server
        .get("/api/dashboard/stats")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .put(&format!("/api/users/{}", admin.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "role": "admin" }))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .get(&format!("/api/users/{}", other_admin.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .get("/api/dashboard/stats")
        .add_header(header::AUTHORIZATION, other_admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
}
