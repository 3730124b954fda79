//! Page routes
//!
//! - `GET /` - Home with the latest free predictions
//! - `GET /about`, `/pricing`, `/privacy`, `/terms`
//! - `GET /blog`, `/blog/{slug}`
//! - `GET /sign-in`, `/sign-up`, `/forgot-password`
//! - `GET /reset-password?token=`, `/verify-email?token=`
//! - `GET /dashboard` - Redirects to `/sign-in` without a session

use axum::{routing::get, Router};

use crate::backend::pages::{account, blog, dashboard, marketing};
use crate::backend::server::state::AppState;

pub fn configure_page_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(marketing::home))
        .route("/about", get(marketing::about))
        .route("/pricing", get(marketing::pricing))
        .route("/privacy", get(marketing::privacy))
        .route("/terms", get(marketing::terms))
        .route("/blog", get(blog::index))
        .route("/blog/{slug}", get(blog::post))
        .route("/sign-in", get(account::sign_in))
        .route("/sign-up", get(account::sign_up))
        .route("/forgot-password", get(account::forgot_password))
        .route("/reset-password", get(account::reset_password))
        .route("/verify-email", get(account::verify_email))
        .route("/dashboard", get(dashboard::dashboard))
}
