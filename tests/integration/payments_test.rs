//! Payments integration tests
//!
//! Recorded payments drive the payer's subscription status.

use axum::http::{header, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::*;
use matchday::backend::auth::users::get_user_by_id;
use matchday::shared::Role;

fn payment_body(user_id: Uuid, status: &str) -> Value {
    json!({
        "user_id": user_id,
        "amount_cents": 1999,
        "currency": "usd",
        "plan": "premium-monthly",
        "reference": format!("ref-{}", Uuid::new_v4()),
        "status": status,
    })
}

async fn subscription_of(db: &TestDatabase, id: Uuid) -> Option<String> {
    get_user_by_id(db.pool(), id)
        .await
        .unwrap()
        .and_then(|u| u.subscription_status)
}

#[tokio::test]
async fn test_succeeded_payment_activates_subscription() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let response = app
        .server
        .post("/api/payments")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&payment_body(user.id, "succeeded"))
        .await;
    assert_status!(response, StatusCode::CREATED);
    let payment: Value = response.json();
    assert_eq!(payment["status"], "succeeded");

    assert_eq!(subscription_of(&db, user.id).await.as_deref(), Some("active"));
    let receipt = app.outbox.last_to(&user.email).expect("receipt email");
    assert!(receipt.body.contains("USD 19.99"));

    let response = app
        .server
        .put(&format!("/api/payments/{}", payment["id"].as_str().unwrap()))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "status": "refunded" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(subscription_of(&db, user.id).await.as_deref(), Some("cancelled"));
}

#[tokio::test]
async fn test_pending_payment_leaves_subscription_alone() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let response = app
        .server
        .post("/api/payments")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&payment_body(user.id, "pending"))
        .await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(subscription_of(&db, user.id).await, None);
    assert!(app.outbox.last_to(&user.email).is_none());
}

#[tokio::test]
async fn test_payment_validation() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let mut body = payment_body(user.id, "succeeded");
    body["amount_cents"] = json!(0);
    let response = app
        .server
        .post("/api/payments")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&body)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let mut body = payment_body(user.id, "succeeded");
    body["currency"] = json!("us1");
    let response = app
        .server
        .post("/api/payments")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&body)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/payments")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&payment_body(Uuid::new_v4(), "succeeded"))
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .post("/api/payments")
        .add_header(header::AUTHORIZATION, user.bearer())
        .json(&payment_body(user.id, "succeeded"))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_users_list_only_their_payments() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let payer = create_test_user(&app.state, db.pool(), Role::User, true).await;
    let other = create_test_user(&app.state, db.pool(), Role::User, true).await;

    for user in [&payer, &other] {
        let response = app
            .server
            .post("/api/payments")
            .add_header(header::AUTHORIZATION, admin.bearer())
            .json(&payment_body(user.id, "pending"))
            .await;
        assert_status!(response, StatusCode::CREATED);
    }

    let response = app
        .server
        .get("/api/payments")
        .add_header(header::AUTHORIZATION, payer.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    let page: Value = response.json();
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["user_id"], json!(payer.id));
}

#[tokio::test]
async fn test_unknown_status_update_is_json_error() {
    let db = require_db!();
    let app = test_app(Some(db.pool().clone()));
    let admin = create_admin(&app.state, db.pool()).await;
    let user = create_test_user(&app.state, db.pool(), Role::User, true).await;

    let response = app
        .server
        .post("/api/payments")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&payment_body(user.id, "pending"))
        .await;
    let payment: Value = response.json();

    let response = app
        .server
        .put(&format!("/api/payments/{}", payment["id"].as_str().unwrap()))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "status": "charged-back" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
    assert_error_contains!(response, "status");
}
