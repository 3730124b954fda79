//! Router Configuration
//!
//! Combines the API and page routes with static file serving, request
//! tracing and the not-found fallback into a single Axum router.

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::pages::marketing::not_found;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::page_routes::configure_page_routes;
use crate::backend::server::state::AppState;

/// Directory served under `/static`
pub const STATIC_DIR: &str = "public";

/// Create the Axum router with all routes configured
///
/// Routes are added in this order:
///
/// 1. **API Routes**: `/api/...` JSON endpoints
/// 2. **Page Routes**: HTML views
/// 3. **Static Files**: `/static/*` from [`STATIC_DIR`]
/// 4. **Fallback**: rendered 404 page
///
/// Every request is traced through `tower_http::trace::TraceLayer`.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_api_routes(router);
    let router = configure_page_routes(router);

    router
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
