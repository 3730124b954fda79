/**
 * Email Verification Handlers
 *
 * - POST /api/auth/verify-email - consume a verification token
 * - POST /api/auth/resend-verification - rotate the token and email it again
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{Json, Response},
};

use crate::backend::auth::handlers::respond_with_session;
use crate::backend::auth::handlers::types::{SuccessResponse, VerifyEmailRequest};
use crate::backend::auth::users::{generate_token, get_user_by_id, set_verification_token, verify_email_token};
use crate::backend::email::templates::verification_email;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{AuthUser, Validated};
use crate::backend::server::state::AppState;

/// Mark the token's owner verified and reissue their session
///
/// The new cookie carries `is_verified = true`, so commenting works
/// immediately.
pub async fn verify_email(
    State(state): State<AppState>,
    Validated(request): Validated<VerifyEmailRequest>,
) -> BackendResult<Response> {
    let pool = state.db()?;

    let user = verify_email_token(pool, request.token.trim()).await?.ok_or_else(|| {
        tracing::warn!("Unknown verification token");
        BackendError::bad_request("Invalid or already used verification link")
    })?;

    tracing::info!("Email verified for user: {}", user.id);
    respond_with_session(&state, user.to_public(), StatusCode::OK)
}

pub async fn resend_verification(
    State(state): State<AppState>,
    user: AuthUser,
) -> BackendResult<Json<SuccessResponse>> {
    let pool = state.db()?;
    let user_id = user.id()?;

    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User no longer exists"))?;

    if user.is_verified {
        tracing::warn!("Verification resend for verified user: {}", user.id);
        return Err(BackendError::bad_request("Email is already verified"));
    }

    let token = generate_token();
    set_verification_token(pool, user.id, &token).await?;

    state
        .email
        .send(verification_email(&state.config.app_url, &user.username, &user.email, &token))
        .await?;

    tracing::info!("Verification email resent to user: {}", user.id);
    Ok(Json(SuccessResponse::new("Verification email sent")))
}
