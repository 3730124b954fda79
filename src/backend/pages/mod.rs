//! Pages Module
//!
//! Server-rendered HTML views. Forms are rendered from the schemas in
//! `shared::forms` and submitted as JSON by `/static/app.js`, which reports
//! outcomes as toasts.
//!
//! # Module Structure
//!
//! ```text
//! pages/
//! ├── mod.rs          - Module exports and the error page
//! ├── layout.rs       - Document shell and HTML escaping
//! ├── forms.rs        - Schema-driven form renderer
//! ├── marketing.rs    - Home, about, pricing, legal, 404
//! ├── account.rs      - Sign in/up, password reset, email verification
//! ├── blog.rs         - Blog index and post pages
//! └── dashboard.rs    - User and admin dashboard
//! ```

pub mod account;
pub mod blog;
pub mod dashboard;
pub mod forms;
pub mod layout;
pub mod marketing;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::auth::sessions::Claims;
use crate::backend::error::BackendError;
use layout::{escape, page};

/// Render a backend error as a full page with the matching status
pub fn error_page(viewer: Option<&Claims>, err: &BackendError) -> Response {
    let status = err.status_code();
    if status == StatusCode::NOT_FOUND {
        return marketing::not_found_page(viewer);
    }
    if status.is_server_error() {
        tracing::error!("Page failed to render: {}", err);
    }

    let (title, message) = match status {
        StatusCode::SERVICE_UNAVAILABLE => (
            "Temporarily unavailable",
            "This part of the site is offline for maintenance. Please try again shortly.".to_string(),
        ),
        StatusCode::UNAUTHORIZED => (
            "Please sign in again",
            "Your session has ended. Sign in to continue.".to_string(),
        ),
        s if s.is_client_error() => ("Something was wrong with that request", err.message()),
        _ => ("Something went wrong", "An unexpected error occurred.".to_string()),
    };

    let body = format!(
        r#"<h1>{}</h1>
<p>{}</p>
<p><a href="/">Back to the home page</a></p>"#,
        escape(title),
        escape(&message)
    );
    (status, page(title, viewer, &body)).into_response()
}
