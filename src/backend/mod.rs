//! Backend Module
//!
//! This module contains all server-side code for the Matchday site. It
//! provides an Axum HTTP server with a JSON API under `/api`, server-rendered
//! pages, and the clients for the external services the site depends on.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly (API, pages, static files, fallback)
//! - **`auth`** - Users, passwords, JWT sessions, cookies, auth handlers
//! - **`middleware`** - Session extractors (`AuthUser`, `MaybeUser`, `AdminUser`)
//! - **`blog`** - Posts, comments, likes, saves, shares, views
//! - **`predictions`** - Match predictions with premium redaction
//! - **`users`** - Dashboard user management
//! - **`payments`** - Recorded subscription payments
//! - **`dashboard`** - Admin statistics
//! - **`pages`** - Server-rendered HTML views
//! - **`email`** - Outgoing email (SMTP, log, in-memory)
//! - **`geo`** - IP geolocation
//! - **`error`** - Backend error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request extractors
//! ├── blog/           - Blog and engagement
//! ├── predictions/    - Predictions
//! ├── users/          - User management
//! ├── payments/       - Payments
//! ├── dashboard.rs    - Admin statistics
//! ├── pages/          - HTML views
//! ├── email/          - Email delivery
//! ├── geo.rs          - IP geolocation
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error converts into a JSON
//! body `{"error": ..., "status": ...}` with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Request extractors for authenticated sessions
pub mod middleware;

/// Blog posts and engagement
pub mod blog;

/// Match predictions
pub mod predictions;

/// Dashboard user management
pub mod users;

/// Subscription payments
pub mod payments;

/// Admin statistics
pub mod dashboard;

/// Server-rendered pages
pub mod pages;

/// Outgoing email
pub mod email;

/// IP geolocation
pub mod geo;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
