/**
 * Sign Up Handler
 *
 * POST /api/auth/sign-up
 *
 * # Registration Process
 *
 * 1. Validate the body against the `SIGN_UP` schema
 * 2. Check the username format
 * 3. Reject an email or username that is already registered (400)
 * 4. Hash the password using bcrypt
 * 5. Create the user with a fresh verification token
 * 6. Email the verification link (best-effort)
 * 7. Set the session cookie and return 201 with token and user
 */

use axum::{extract::State, http::StatusCode, response::Response};

use crate::backend::auth::handlers::respond_with_session;
use crate::backend::auth::handlers::types::SignUpRequest;
use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::users::{create_user, generate_token, get_user_by_email, get_user_by_username, NewUser};
use crate::backend::email::templates::verification_email;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::Validated;
use crate::backend::server::state::AppState;
use crate::shared::Role;

/// Validate username format
///
/// Usernames must start with a letter and contain only ASCII letters,
/// digits and underscores. Length is checked by the form schema.
pub fn is_valid_username(username: &str) -> bool {
    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Schema violation, bad username, or email/username taken
/// * `503 Service Unavailable` - Database not configured
/// * `500 Internal Server Error` - Hashing, insert or token failure
pub async fn sign_up(
    State(state): State<AppState>,
    Validated(request): Validated<SignUpRequest>,
) -> BackendResult<Response> {
    let pool = state.db()?;
    let username = request.username.trim().to_string();
    let email = request.email.trim().to_lowercase();
    tracing::info!("Sign up request for username: {}, email: {}", username, email);

    if !is_valid_username(&username) {
        tracing::warn!("Invalid username format: {}", username);
        return Err(BackendError::bad_request(
            "Username must start with a letter and contain only letters, numbers, and underscores",
        ));
    }

    if get_user_by_email(pool, &email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::bad_request("Email already registered"));
    }

    if get_user_by_username(pool, &username).await?.is_some() {
        tracing::warn!("Username already exists: {}", username);
        return Err(BackendError::bad_request("Username already taken"));
    }

    let password_hash = hash_password(&request.password).await?;
    let verification_token = generate_token();

    // A concurrent insert still hits the unique constraint, which maps to 400.
    let user = create_user(
        pool,
        NewUser {
            username,
            email,
            password_hash,
            role: Role::User,
            verification_token: Some(verification_token.clone()),
        },
    )
    .await?;

    tracing::info!("User created: {} ({})", user.username, user.id);

    state
        .email
        .send_best_effort(verification_email(
            &state.config.app_url,
            &user.username,
            &user.email,
            &verification_token,
        ))
        .await;

    respond_with_session(&state, user.to_public(), StatusCode::CREATED)
}
