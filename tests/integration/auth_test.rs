//! Authentication API integration tests
//!
//! Sign up/in/out, email verification and the password flows.

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use crate::common::*;
use matchday::backend::auth::users::{generate_token, get_user_by_email, set_reset_token};

#[tokio::test]
async fn test_sign_up_creates_session_and_sends_verification() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let (username, email) = unique_identity("signup");

    let response = app
        .server
        .post("/api/auth/sign-up")
        .json(&json!({ "username": username, "email": email.to_uppercase(), "password": TEST_PASSWORD }))
        .await;

    assert_status!(response, StatusCode::CREATED);
    let cookie = response.header(header::SET_COOKIE);
    assert!(cookie.to_str().unwrap().starts_with("session_token="));
    let body: Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["is_verified"], false);
    assert!(body["user"].get("password_hash").is_none());

    let sent = app.outbox.last_to(&email).expect("verification email");
    let user = get_user_by_email(db.pool(), &email).await.unwrap().unwrap();
    let token = user.verification_token.expect("verification token stored");
    assert!(sent.body.contains(&token));
}

#[tokio::test]
async fn test_sign_up_duplicate_email_is_rejected() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let existing = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, false).await;
    let (username, _) = unique_identity("dupe");

    let response = app
        .server
        .post("/api/auth/sign-up")
        .json(&json!({ "username": username, "email": existing.email, "password": TEST_PASSWORD }))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_up_reports_field_errors() {
    let app = test_app(None);

    let response = app
        .server
        .post("/api/auth/sign-up")
        .json(&json!({ "username": "ab", "email": "", "password": "short" }))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["username", "email", "password"]);
}

#[tokio::test]
async fn test_sign_in_records_location() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, true).await;

    let response = app
        .server
        .post("/api/auth/sign-in")
        .add_header(header::HeaderName::from_static("x-forwarded-for"), header::HeaderValue::from_static("8.8.8.8"))
        .json(&json!({ "email": user.email, "password": user.password }))
        .await;

    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["location"], TEST_LOCATION);
}

#[tokio::test]
async fn test_sign_in_wrong_password_is_forbidden() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, true).await;

    let response = app
        .server
        .post("/api/auth/sign-in")
        .json(&json!({ "email": user.email, "password": "not-the-password" }))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .post("/api/auth/sign-in")
        .json(&json!({ "email": "nobody-here@example.com", "password": "whatever-it-is" }))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_me_requires_session() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));

    let response = app.server.get("/api/auth/me").await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    let user = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, false).await;
    let response = app
        .server
        .get("/api/auth/me")
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["username"], user.username);
}

#[tokio::test]
async fn test_sign_out_clears_cookie() {
    let app = test_app(None);
    let response = app.server.post("/api/auth/sign-out").await;

    assert_status!(response, StatusCode::OK);
    let cookie = response.header(header::SET_COOKIE);
    assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
    let body: Value = response.json();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_verify_email_flow() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let (username, email) = unique_identity("verify");

    app.server
        .post("/api/auth/sign-up")
        .json(&json!({ "username": username, "email": email, "password": TEST_PASSWORD }))
        .await;
    let token = get_user_by_email(db.pool(), &email)
        .await
        .unwrap()
        .and_then(|u| u.verification_token)
        .expect("verification token");

    let response = app
        .server
        .post("/api/auth/verify-email")
        .json(&json!({ "token": "definitely-not-a-token" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app.server.post("/api/auth/verify-email").json(&json!({ "token": token })).await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["is_verified"], true);

    // Tokens are single use
    let response = app.server.post("/api/auth/verify-email").json(&json!({ "token": token })).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_resend_verification_rejects_verified_user() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let verified = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, true).await;
    let unverified = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, false).await;

    let response = app
        .server
        .post("/api/auth/resend-verification")
        .add_header(header::AUTHORIZATION, verified.bearer())
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/auth/resend-verification")
        .add_header(header::AUTHORIZATION, unverified.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    assert!(app.outbox.last_to(&unverified.email).is_some());
}

#[tokio::test]
async fn test_password_reset_flow() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, true).await;

    // Unknown addresses look identical to known ones
    let response = app
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "missing-person@example.com" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert!(app.outbox.last_to("missing-person@example.com").is_none());

    let response = app
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": user.email }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert!(app.outbox.last_to(&user.email).is_some());

    let token = get_user_by_email(db.pool(), &user.email)
        .await
        .unwrap()
        .and_then(|u| u.reset_token)
        .expect("reset token");

    let response = app
        .server
        .post("/api/auth/reset-password")
        .json(&json!({ "token": token, "password": "a-brand-new-secret" }))
        .await;
    assert_status!(response, StatusCode::OK);

    let response = app
        .server
        .post("/api/auth/reset-password")
        .json(&json!({ "token": token, "password": "another-new-secret" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/auth/sign-in")
        .json(&json!({ "email": user.email, "password": "a-brand-new-secret" }))
        .await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_reset_token_is_rejected() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, true).await;

    let token = generate_token();
    set_reset_token(db.pool(), user.id, &token).await.unwrap();
    sqlx::query("UPDATE users SET reset_token_expires_at = NOW() - INTERVAL '1 minute' WHERE id = $1")
        .bind(user.id)
        .execute(db.pool())
        .await
        .unwrap();

    let response = app
        .server
        .post("/api/auth/reset-password")
        .json(&json!({ "token": token, "password": "too-late-secret" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/auth/sign-in")
        .json(&json!({ "email": user.email, "password": user.password }))
        .await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_checks_current() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let user = create_test_user(&app.state, db.pool(), matchday::shared::Role::User, true).await;

    let response = app
        .server
        .put("/api/auth/password")
        .add_header(header::AUTHORIZATION, user.bearer())
        .json(&json!({ "current_password": "wrong-password", "new_password": "changed-secret-1" }))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .put("/api/auth/password")
        .add_header(header::AUTHORIZATION, user.bearer())
        .json(&json!({ "current_password": user.password, "new_password": "changed-secret-1" }))
        .await;
    assert_status!(response, StatusCode::OK);
}
