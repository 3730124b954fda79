//! Predictions API integration tests
//!
//! Admin publishing, odds/confidence checks and premium redaction.

use axum::http::{header, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use crate::common::*;
use matchday::shared::Role;

fn prediction_body(is_premium: bool) -> Value {
    json!({
        "sport": "football",
        "league": "Premier League",
        "home_team": "Arsenal",
        "away_team": "Chelsea",
        "kickoff_at": (Utc::now() + Duration::days(2)).to_rfc3339(),
        "tip": "Both teams to score",
        "odds": 1.85,
        "confidence": 4,
        "analysis": "Both attacks are firing.",
        "is_premium": is_premium,
    })
}

async fn create_prediction(app: &TestApp, admin: &TestUser, is_premium: bool) -> Value {
    let response = app
        .server
        .post("/api/predictions")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&prediction_body(is_premium))
        .await;
    assert_status!(response, StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_premium_prediction_is_redacted_for_free_users() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let free_user = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let prediction = create_prediction(&app, &admin, true).await;
    let url = format!("/api/predictions/{}", prediction["id"].as_str().unwrap());

    let anonymous: Value = app.server.get(&url).await.json();
    assert_eq!(anonymous["locked"], true);
    assert_eq!(anonymous["tip"], "");
    assert_eq!(anonymous["analysis"], "");
    assert_eq!(anonymous["home_team"], "Arsenal");

    let response = app
        .server
        .get(&url)
        .add_header(header::AUTHORIZATION, free_user.bearer())
        .await;
    let free: Value = response.json();
    assert_eq!(free["locked"], true);

    let response = app
        .server
        .get(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    let full: Value = response.json();
    assert_eq!(full["locked"], false);
    assert_eq!(full["tip"], "Both teams to score");
}

#[tokio::test]
async fn test_subscriber_sees_premium_tip() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let subscriber = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let prediction = create_prediction(&app, &admin, true).await;

    let response = app
        .server
        .put(&format!("/api/users/{}", subscriber.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "subscription_status": "active" }))
        .await;
    assert_status!(response, StatusCode::OK);

    // Same session token: access is read from the database
    let response = app
        .server
        .get(&format!("/api/predictions/{}", prediction["id"].as_str().unwrap()))
        .add_header(header::AUTHORIZATION, subscriber.bearer())
        .await;
    let view: Value = response.json();
    assert_eq!(view["locked"], false);
    assert_eq!(view["analysis"], "Both attacks are firing.");
}

#[tokio::test]
async fn test_invalid_odds_and_confidence_are_rejected() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;

    let mut body = prediction_body(false);
    body["odds"] = json!(1.0);
    let response = app
        .server
        .post("/api/predictions")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&body)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let mut body = prediction_body(false);
    body["confidence"] = json!(6);
    let response = app
        .server
        .post("/api/predictions")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&body)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let prediction = create_prediction(&app, &admin, false).await;
    let response = app
        .server
        .put(&format!("/api/predictions/{}", prediction["id"].as_str().unwrap()))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "confidence": 0 }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settle_and_delete_prediction() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let prediction = create_prediction(&app, &admin, false).await;
    assert_eq!(prediction["outcome"], "pending");
    let url = format!("/api/predictions/{}", prediction["id"].as_str().unwrap());

    let response = app
        .server
        .put(&url)
        .add_header(header::AUTHORIZATION, user.bearer())
        .json(&json!({ "outcome": "won" }))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .put(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "outcome": "won" }))
        .await;
    assert_status!(response, StatusCode::OK);
    let settled: Value = response.json();
    assert_eq!(settled["outcome"], "won");
    assert_eq!(settled["tip"], "Both teams to score");

    let response = app
        .server
        .delete(&url)
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    assert_status!(app.server.get(&url).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mistyped_update_field_is_json_error() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let prediction = create_prediction(&app, &admin, false).await;

    let response = app
        .server
        .put(&format!("/api/predictions/{}", prediction["id"].as_str().unwrap()))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "odds": "abc" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
    assert_eq!(body["fields"][0]["field"], "odds");
}

#[tokio::test]
async fn test_malformed_query_and_path_are_json_errors() {
    let app = test_app(None);

    let response = app.server.get("/api/predictions?page=first").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);

    let response = app.server.get("/api/predictions/not-a-uuid").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
}
