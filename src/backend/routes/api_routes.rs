/**
 * API Route Handlers
 *
 * This module mounts the JSON API under `/api`. Every handler answers with
 * JSON; failures carry `{"error": ..., "status": ...}` and, for validation
 * failures, a `fields` list.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/sign-up` - Create an account
 * - `POST /api/auth/sign-in` - Start a session
 * - `POST /api/auth/sign-out` - End the session
 * - `GET /api/auth/me` - Current user
 * - `POST /api/auth/verify-email` - Confirm an email address
 * - `POST /api/auth/resend-verification` - New verification link
 * - `POST /api/auth/forgot-password` - Email a reset link
 * - `POST /api/auth/reset-password` - Choose a new password
 * - `PUT /api/auth/password` - Change password while signed in
 *
 * ## Blog
 * - `GET|POST /api/posts`, `GET|PUT|DELETE /api/posts/{id}`
 * - `GET /api/posts/slug/{slug}`
 * - `POST /api/posts/{id}/like|save|share`
 * - `GET|POST /api/posts/{id}/comments`, `DELETE /api/comments/{id}`
 * - `GET /api/saves`
 *
 * ## Predictions, users, payments, dashboard
 * - `GET|POST /api/predictions`, `GET|PUT|DELETE /api/predictions/{id}`
 * - `GET /api/users`, `GET|PUT|DELETE /api/users/{id}`
 * - `GET|POST /api/payments`, `PUT /api/payments/{id}`
 * - `GET /api/dashboard/stats`
 */

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::{
    change_password, forgot_password, get_me, resend_verification, reset_password, sign_in, sign_out, sign_up,
    verify_email,
};
use crate::backend::blog::handlers as blog;
use crate::backend::dashboard::get_stats;
use crate::backend::payments::handlers as payments;
use crate::backend::predictions::handlers as predictions;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers as users;

/// Configure API routes
///
/// Access rules are enforced by the extractors each handler takes
/// (`AuthUser`, `AdminUser`, `MaybeUser`), not by route layers.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/sign-up", post(sign_up))
        .route("/api/auth/sign-in", post(sign_in))
        .route("/api/auth/sign-out", post(sign_out))
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/verify-email", post(verify_email))
        .route("/api/auth/resend-verification", post(resend_verification))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/auth/password", put(change_password))
        // Blog endpoints
        .route("/api/posts", get(blog::list_posts).post(blog::create_post))
        .route(
            "/api/posts/{id}",
            get(blog::get_post).put(blog::update_post).delete(blog::delete_post),
        )
        .route("/api/posts/slug/{slug}", get(blog::get_post_by_slug))
        .route("/api/posts/{id}/like", post(blog::toggle_like))
        .route("/api/posts/{id}/save", post(blog::toggle_save))
        .route("/api/posts/{id}/share", post(blog::share_post))
        .route(
            "/api/posts/{id}/comments",
            get(blog::list_comments).post(blog::create_comment),
        )
        .route("/api/comments/{id}", delete(blog::delete_comment))
        .route("/api/saves", get(blog::list_saves))
        // Prediction endpoints
        .route(
            "/api/predictions",
            get(predictions::list_predictions).post(predictions::create_prediction),
        )
        .route(
            "/api/predictions/{id}",
            get(predictions::get_prediction)
                .put(predictions::update_prediction)
                .delete(predictions::delete_prediction),
        )
        // User management endpoints
        .route("/api/users", get(users::list_users))
        .route(
            "/api/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        // Payment endpoints
        .route(
            "/api/payments",
            get(payments::list_payments).post(payments::create_payment),
        )
        .route("/api/payments/{id}", put(payments::update_payment))
        // Dashboard statistics
        .route("/api/dashboard/stats", get(get_stats))
}
