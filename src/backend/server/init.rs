/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * loading the database, building the external-service clients, and
 * assembling the router.
 *
 * # Initialization Process
 *
 * 1. Open the database pool and run migrations (optional)
 * 2. Build the email client (SMTP or log-only)
 * 3. Build the geolocation client (HTTP provider or disabled)
 * 4. Create the application state and the router
 */

use axum::Router;

use crate::backend::email::EmailClient;
use crate::backend::geo::GeoLocator;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: Server continues; database endpoints answer 503
/// - Migration failures: Logged but don't prevent startup
/// - Missing SMTP/geolocation settings: Emails are logged, locations skipped
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing Matchday backend server");

    let db_pool = load_database(config.database_url.as_deref()).await;
    let email = EmailClient::from_config(&config);
    let geo = GeoLocator::from_config(config.geolocation.as_ref());

    let app_state = AppState::new(config, db_pool, email, geo);

    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}
