/**
 * Sign In Handler
 *
 * POST /api/auth/sign-in
 *
 * # Authentication Process
 *
 * 1. Validate the body against the `SIGN_IN` schema
 * 2. Look the user up by email (case-insensitive)
 * 3. Verify the password against the stored bcrypt hash
 * 4. Resolve the client's location from its IP (best-effort) and store it
 * 5. Set the session cookie and return the token and user
 *
 * Unknown emails and wrong passwords both answer 403 with the same message.
 */

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};

use crate::backend::auth::handlers::respond_with_session;
use crate::backend::auth::handlers::types::SignInRequest;
use crate::backend::auth::passwords::verify_password;
use crate::backend::auth::users::{get_user_by_email, update_location};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::geo::client_ip;
use crate::backend::middleware::Validated;
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Sign in handler
///
/// # Errors
///
/// * `400 Bad Request` - Schema violation
/// * `403 Forbidden` - Unknown email or wrong password
/// * `503 Service Unavailable` - Database not configured
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Validated(request): Validated<SignInRequest>,
) -> BackendResult<Response> {
    let pool = state.db()?;
    let email = request.email.trim();
    tracing::info!("Sign in request for: {}", email);

    let Some(user) = get_user_by_email(pool, email).await? else {
        tracing::warn!("Sign in for unknown email: {}", email);
        return Err(BackendError::forbidden(INVALID_CREDENTIALS));
    };

    if !verify_password(&request.password, &user.password_hash).await? {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::forbidden(INVALID_CREDENTIALS));
    }

    let location = match client_ip(&headers) {
        Some(ip) => state.geo.locate(ip).await,
        None => None,
    };

    let user = match location {
        Some(location) if user.location.as_deref() != Some(location.as_str()) => {
            tracing::info!("Updating location of {} to {}", user.id, location);
            update_location(pool, user.id, Some(&location)).await?
        }
        _ => user,
    };

    tracing::info!("User signed in: {}", user.id);
    respond_with_session(&state, user.to_public(), StatusCode::OK)
}
