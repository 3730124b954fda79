/**
 * Authentication Handler Types
 *
 * Request and response bodies of the `/api/auth` endpoints. Each request
 * type names the form schema it is validated against.
 */

use serde::{Deserialize, Serialize};

use crate::shared::forms::{self, FormRequest, FormSchema};
use crate::shared::PublicUser;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignUpRequest {
    /// 3-30 chars, starts with a letter, letters/digits/underscores
    pub username: String,
    pub email: String,
    /// Hashed before storage
    pub password: String,
}

impl FormRequest for SignUpRequest {
    fn schema() -> &'static FormSchema {
        &forms::SIGN_UP
    }
}

/// Sign in request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl FormRequest for SignInRequest {
    fn schema() -> &'static FormSchema {
        &forms::SIGN_IN
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct VerifyEmailRequest {
    pub token: String,
}

impl FormRequest for VerifyEmailRequest {
    fn schema() -> &'static FormSchema {
        &forms::VERIFY_EMAIL
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl FormRequest for ForgotPasswordRequest {
    fn schema() -> &'static FormSchema {
        &forms::FORGOT_PASSWORD
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

impl FormRequest for ResetPasswordRequest {
    fn schema() -> &'static FormSchema {
        &forms::RESET_PASSWORD
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl FormRequest for ChangePasswordRequest {
    fn schema() -> &'static FormSchema {
        &forms::CHANGE_PASSWORD
    }
}

/// Auth response
///
/// Returned by sign-up, sign-in and verify-email. The token is also set as
/// the `session_token` cookie.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

pub use crate::shared::models::SuccessResponse;
