//! Authentication Handlers Module
//!
//! HTTP handlers for the `/api/auth` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs             - Module exports and the shared session response
//! ├── types.rs           - Request and response types
//! ├── signup.rs          - POST sign-up
//! ├── signin.rs          - POST sign-in
//! ├── session.rs         - POST sign-out, GET me
//! ├── verification.rs    - POST verify-email, POST resend-verification
//! └── password_reset.rs  - POST forgot-password, POST reset-password, PUT password
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Sign up**: username, email, password → user created → verification
//!    email → session cookie + `{token, user}` (201)
//! 2. **Sign in**: email, password → credentials verified → location looked
//!    up → session cookie + `{token, user}`
//! 3. **Verify**: token from the email → user verified → session reissued
//! 4. **Sign out**: cookie removed
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Session JWTs travel in an `HttpOnly; SameSite=Lax` cookie
//! - Bad credentials answer 403 without revealing which part was wrong

/// Request and response types
pub mod types;

/// Sign up handler
pub mod signup;

/// Sign in handler
pub mod signin;

/// Sign out and current user handlers
pub mod session;

/// Email verification handlers
pub mod verification;

/// Forgot, reset and change password handlers
pub mod password_reset;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::cookies::set_cookie_headers;
use crate::backend::error::BackendResult;
use crate::backend::server::state::AppState;
use crate::shared::PublicUser;

pub use types::{AuthResponse, SignInRequest, SignUpRequest, SuccessResponse};

pub use password_reset::{change_password, forgot_password, reset_password};
pub use session::{get_me, sign_out};
pub use signin::sign_in;
pub use signup::sign_up;
pub use verification::{resend_verification, verify_email};

/// Issue a session for `user`, set it as a cookie and return `{token, user}`
pub(crate) fn respond_with_session(state: &AppState, user: PublicUser, status: StatusCode) -> BackendResult<Response> {
    let token = state.sessions.issue(&user)?;
    let headers = set_cookie_headers(&state.session_cookie(&token));
    Ok((status, headers, Json(AuthResponse { token, user })).into_response())
}
