//! Sign-out and current-user handlers.

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::cookies::{removal_cookie, set_cookie_headers};
use crate::backend::auth::handlers::types::SuccessResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::PublicUser;

/// POST /api/auth/sign-out
///
/// Always succeeds; the cookie is cleared whether or not one was sent.
pub async fn sign_out(State(state): State<AppState>) -> Response {
    tracing::info!("Sign out");
    let headers = set_cookie_headers(&removal_cookie(state.config.cookie_secure));
    (headers, Json(SuccessResponse::new("Signed out"))).into_response()
}

/// GET /api/auth/me
///
/// Reads the user fresh from the database so role and subscription changes
/// show up without signing in again. A session for a deleted user is 401.
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> BackendResult<Json<PublicUser>> {
    let pool = state.db()?;
    let user_id = user.id()?;

    let user = get_user_by_id(pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("Session for missing user: {}", user_id);
        BackendError::unauthorized("User no longer exists")
    })?;

    Ok(Json(user.to_public()))
}
