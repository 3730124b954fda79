//! Matchday - Main Library
//!
//! Matchday is a sports-prediction content and subscription site: marketing
//! pages, a blog, match predictions with a premium tier, a dashboard for
//! managing users, posts, predictions and payments, and the usual account
//! flows (sign up/in/out, email verification, password reset).
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the JSON API and the rendered pages
//!   - Domain records and request/response DTOs
//!   - Declarative form schemas used for rendering and validation
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and server-rendered pages
//!   - Authentication (bcrypt passwords, JWT session cookies)
//!   - PostgreSQL persistence via sqlx
//!   - Email delivery and IP geolocation clients
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use matchday::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
