/**
 * Session Extractors
 *
 * Handlers declare what kind of caller they accept by taking one of these
 * extractors:
 *
 * - `AuthUser` - any signed-in user (401 otherwise)
 * - `AdminUser` - a signed-in admin (401 without a session, 403 for others).
 *   The role is re-read from the database on every request, so a demotion
 *   takes effect before the session token expires.
 * - `MaybeUser` - optional session; never rejects
 *
 * The session token is read from the `session_token` cookie, falling back to
 * an `Authorization: Bearer <token>` header for API clients.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::cookies::{read_cookie, SESSION_COOKIE};
use crate::backend::auth::sessions::Claims;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Session token from the cookie or the Authorization header
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, SESSION_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Verified claims of the current request, if any
pub fn session_claims(headers: &HeaderMap, state: &AppState) -> Result<Option<Claims>, BackendError> {
    match extract_token(headers) {
        None => Ok(None),
        Some(token) => state.sessions.verify(&token).map(Some).map_err(|e| {
            tracing::warn!("Invalid session token: {}", e);
            BackendError::unauthorized("Invalid or expired session")
        }),
    }
}

/// A signed-in user
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> Result<Uuid, BackendError> {
        self.0.user_id()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        session_claims(&parts.headers, state)?
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("Missing session for {}", parts.uri.path());
                BackendError::unauthorized("Sign in to continue")
            })
    }
}

/// Whether the session belongs to an account that is an admin right now
///
/// The role claim is only trusted to skip the lookup for non-admins.
pub async fn confirm_admin(pool: &PgPool, claims: &Claims) -> Result<bool, BackendError> {
    if !claims.is_admin() {
        return Ok(false);
    }
    Ok(get_user_by_id(pool, claims.user_id()?)
        .await?
        .is_some_and(|user| user.role.is_admin()))
}

/// A signed-in admin
#[derive(Clone, Debug)]
pub struct AdminUser(pub Claims);

impl AdminUser {
    pub fn id(&self) -> Result<Uuid, BackendError> {
        self.0.user_id()
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            tracing::warn!("Non-admin {} attempted {}", claims.email, parts.uri.path());
            return Err(BackendError::forbidden("Admins only"));
        }

        if confirm_admin(state.db()?, &claims).await? {
            Ok(AdminUser(claims))
        } else {
            tracing::warn!("Demoted or deleted admin {} attempted {}", claims.email, parts.uri.path());
            Err(BackendError::forbidden("Admins only"))
        }
    }
}

/// An optional session
///
/// Invalid or expired tokens are treated as anonymous rather than rejected,
/// so public pages keep working with a stale cookie.
#[derive(Clone, Debug, Default)]
pub struct MaybeUser(pub Option<Claims>);

impl MaybeUser {
    /// Role claim from the token. Lags a demotion until the session expires,
    /// so it only decides draft visibility and page chrome; writes and
    /// private data go through `confirm_admin`.
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(Claims::is_admin)
    }

    pub fn id(&self) -> Option<Uuid> {
        self.0.as_ref().and_then(|c| c.user_id().ok())
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session_claims(&parts.headers, state).unwrap_or(None)))
    }
}
