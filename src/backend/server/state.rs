/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding:
 * - The optional PostgreSQL pool
 * - The session token manager
 * - The email and geolocation clients
 * - The loaded server configuration
 *
 * Every field is cheap to clone (pools, keys and clients are reference
 * counted internally), so the state is cloned per request as Axum expects.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract specific parts of
 * the state (e.g. `State<Option<PgPool>>`) without needing the entire
 * `AppState`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::sessions::SessionManager;
use crate::backend::email::EmailClient;
use crate::backend::error::BackendError;
use crate::backend::geo::GeoLocator;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g. if
    /// `DATABASE_URL` is not set). Handlers use [`AppState::db`], which maps
    /// the missing pool to a 503 response.
    pub db_pool: Option<PgPool>,

    /// Issues and verifies session tokens
    pub sessions: SessionManager,

    /// Outgoing email
    pub email: EmailClient,

    /// Sign-in location lookup
    pub geo: GeoLocator,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, db_pool: Option<PgPool>, email: EmailClient, geo: GeoLocator) -> Self {
        Self {
            db_pool,
            sessions: SessionManager::new(&config.jwt_secret, config.session_ttl_hours),
            email,
            geo,
            config: Arc::new(config),
        }
    }

    /// The database pool, or `DatabaseUnavailable`
    pub fn db(&self) -> Result<&PgPool, BackendError> {
        self.db_pool.as_ref().ok_or_else(|| {
            tracing::error!("Database not configured");
            BackendError::DatabaseUnavailable
        })
    }

    /// `Set-Cookie` value installing a session token
    pub fn session_cookie(&self, token: &str) -> String {
        crate::backend::auth::cookies::session_cookie(
            token,
            self.sessions.ttl_seconds(),
            self.config.cookie_secure,
        )
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for SessionManager {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for EmailClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.email.clone()
    }
}

impl FromRef<AppState> for GeoLocator {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.geo.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
