//! Authentication and server test helpers
//!
//! Provides utilities for building a test server around the real router,
//! creating users directly in the database and authenticating requests.

use axum::http::HeaderValue;
use axum_test::TestServer;
use sqlx::PgPool;
use uuid::Uuid;

use matchday::backend::auth::users::{create_user, update_user, NewUser};
use matchday::backend::email::{EmailClient, Outbox};
use matchday::backend::geo::GeoLocator;
use matchday::backend::routes::create_router;
use matchday::backend::server::config::ServerConfig;
use matchday::backend::server::state::AppState;
use matchday::shared::models::user::{AdminUserUpdate, ProfileUpdate};
use matchday::shared::Role;

/// Location every sign-in resolves to in tests
pub const TEST_LOCATION: &str = "Lagos, Nigeria";

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A running test server with its captured email
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub outbox: Outbox,
}

/// Build the application around an optional pool
pub fn test_app(pool: Option<PgPool>) -> TestApp {
    let (email, outbox) = EmailClient::memory();
    let state = AppState::new(
        ServerConfig::default(),
        pool,
        email,
        GeoLocator::Fixed(TEST_LOCATION.to_string()),
    );
    let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");
    TestApp { server, state, outbox }
}

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    /// `Authorization` header value for this user's session
    pub fn bearer(&self) -> HeaderValue {
        bearer(&self.token)
    }
}

/// Unique username and email pair
pub fn unique_identity(prefix: &str) -> (String, String) {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("{}_{}", prefix, &suffix[..12]);
    let email = format!("{}@example.com", username);
    (username, email)
}

/// Insert a user directly and issue a session for it
pub async fn create_test_user(state: &AppState, pool: &PgPool, role: Role, verified: bool) -> TestUser {
    let (username, email) = unique_identity(role.as_str());
    let password_hash = bcrypt::hash(TEST_PASSWORD, 4).expect("Failed to hash password");

    let user = create_user(
        pool,
        NewUser {
            username,
            email,
            password_hash,
            role,
            verification_token: None,
        },
    )
    .await
    .expect("Failed to create test user");

    let user = if verified {
        let update = AdminUserUpdate {
            is_verified: Some(true),
            ..AdminUserUpdate::default()
        };
        update_user(pool, user.id, &ProfileUpdate::default(), &update)
            .await
            .expect("Failed to verify test user")
            .expect("Test user vanished")
    } else {
        user
    };

    let token = state
        .sessions
        .issue(&user.to_public())
        .expect("Failed to issue test token");

    TestUser {
        id: user.id,
        username: user.username,
        email: user.email,
        password: TEST_PASSWORD.to_string(),
        token,
    }
}

pub async fn create_admin(state: &AppState, pool: &PgPool) -> TestUser {
    create_test_user(state, pool, Role::Admin, true).await
}

/// Create authorization header value
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("Invalid token header")
}
