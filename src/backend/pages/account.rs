//! Authentication pages: sign in/up, password reset and email verification.

use axum::{
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::backend::middleware::MaybeUser;
use crate::backend::pages::forms::{render_form, render_form_with};
use crate::backend::pages::layout::page;
use crate::shared::forms::{FORGOT_PASSWORD, RESET_PASSWORD, SIGN_IN, SIGN_UP, VERIFY_EMAIL};

/// `?token=` carried by emailed links
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

impl TokenQuery {
    fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// GET /sign-in
pub async fn sign_in(viewer: MaybeUser) -> Response {
    if viewer.0.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let body = format!(
        r#"<section class="auth">
{}
<p><a href="/forgot-password">Forgot your password?</a></p>
<p>New here? <a href="/sign-up">Create an account</a></p>
</section>"#,
        render_form(&SIGN_IN)
    );
    page("Sign in", None, &body).into_response()
}

/// GET /sign-up
pub async fn sign_up(viewer: MaybeUser) -> Response {
    if viewer.0.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let body = format!(
        r#"<section class="auth">
{}
<p>Already have an account? <a href="/sign-in">Sign in</a></p>
<p class="small">By signing up you accept the <a href="/terms">terms</a> and <a href="/privacy">privacy policy</a>.</p>
</section>"#,
        render_form(&SIGN_UP)
    );
    page("Sign up", None, &body).into_response()
}

/// GET /forgot-password
pub async fn forgot_password(viewer: MaybeUser) -> Html<String> {
    let body = format!(
        r#"<section class="auth">
<p>Enter the email you signed up with and we will send you a link to choose a new password.</p>
{}
</section>"#,
        render_form(&FORGOT_PASSWORD)
    );
    page("Forgot password", viewer.0.as_ref(), &body)
}

/// GET /reset-password?token=
pub async fn reset_password(viewer: MaybeUser, Query(query): Query<TokenQuery>) -> Html<String> {
    let body = match query.token() {
        Some(token) => format!(
            r#"<section class="auth">{}</section>"#,
            render_form_with(&RESET_PASSWORD, None, &[("token", token)])
        ),
        None => r#"<section class="auth">
<h1>Reset link missing</h1>
<p>Open the link from your email again, or <a href="/forgot-password">request a new one</a>.</p>
</section>"#
            .to_string(),
    };
    page("Reset password", viewer.0.as_ref(), &body)
}

/// GET /verify-email?token=
///
/// The form submits itself on load; it stays visible in case scripts are
/// blocked.
pub async fn verify_email(viewer: MaybeUser, Query(query): Query<TokenQuery>) -> Html<String> {
    let body = match query.token() {
        Some(token) => format!(
            r#"<section class="auth" data-autosubmit="verify-email">
<p>Confirming your email address&hellip;</p>
{}
</section>"#,
            render_form_with(&VERIFY_EMAIL, None, &[("token", token)])
        ),
        None => r#"<section class="auth">
<h1>Verification link missing</h1>
<p>Open the link from your email again. Signed in? You can request a new link from your <a href="/dashboard">dashboard</a>.</p>
</section>"#
            .to_string(),
    };
    page("Verify email", viewer.0.as_ref(), &body)
}
