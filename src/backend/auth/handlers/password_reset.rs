/**
 * Password Handlers
 *
 * - POST /api/auth/forgot-password - email a reset link
 * - POST /api/auth/reset-password - set a new password with a reset token
 * - PUT /api/auth/password - change the password of the signed-in user
 *
 * # Security
 *
 * `forgot-password` answers 200 whether or not the email is registered, so
 * it cannot be used to discover accounts. Reset tokens expire after
 * `RESET_TOKEN_TTL_MINUTES` and are single-use.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{
    ChangePasswordRequest, ForgotPasswordRequest, ResetPasswordRequest, SuccessResponse,
};
use crate::backend::auth::passwords::{hash_password, verify_password};
use crate::backend::auth::users::{
    generate_token, get_user_by_email, get_user_by_id, reset_password_with_token, set_reset_token,
    update_password, RESET_TOKEN_TTL_MINUTES,
};
use crate::backend::email::templates::password_reset_email;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{AuthUser, Validated};
use crate::backend::server::state::AppState;

const RESET_SENT: &str = "If that email is registered, a reset link is on its way";

pub async fn forgot_password(
    State(state): State<AppState>,
    Validated(request): Validated<ForgotPasswordRequest>,
) -> BackendResult<Json<SuccessResponse>> {
    let pool = state.db()?;
    let email = request.email.trim();

    let Some(user) = get_user_by_email(pool, email).await? else {
        tracing::info!("Password reset requested for unknown email");
        return Ok(Json(SuccessResponse::new(RESET_SENT)));
    };

    let token = generate_token();
    let expires_at = set_reset_token(pool, user.id, &token).await?;
    tracing::info!("Reset token issued for user {} (expires {})", user.id, expires_at);

    state
        .email
        .send_best_effort(password_reset_email(
            &state.config.app_url,
            &user.username,
            &user.email,
            &token,
            RESET_TOKEN_TTL_MINUTES,
        ))
        .await;

    Ok(Json(SuccessResponse::new(RESET_SENT)))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Validated(request): Validated<ResetPasswordRequest>,
) -> BackendResult<Json<SuccessResponse>> {
    let pool = state.db()?;
    let password_hash = hash_password(&request.password).await?;

    let user = reset_password_with_token(pool, request.token.trim(), &password_hash)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Unknown or expired reset token");
            BackendError::bad_request("Invalid or expired reset link")
        })?;

    tracing::info!("Password reset for user: {}", user.id);
    Ok(Json(SuccessResponse::new("Password updated, you can now sign in")))
}

pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Validated(request): Validated<ChangePasswordRequest>,
) -> BackendResult<Json<SuccessResponse>> {
    let pool = state.db()?;
    let user_id = user.id()?;

    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User no longer exists"))?;

    if !verify_password(&request.current_password, &user.password_hash).await? {
        tracing::warn!("Wrong current password for user: {}", user.id);
        return Err(BackendError::forbidden("Current password is incorrect"));
    }

    let password_hash = hash_password(&request.new_password).await?;
    update_password(pool, user.id, &password_hash).await?;

    tracing::info!("Password changed for user: {}", user.id);
    Ok(Json(SuccessResponse::new("Password changed")))
}
