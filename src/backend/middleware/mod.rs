//! Middleware Module
//!
//! Request-processing helpers that run before handlers. Authentication is
//! expressed as Axum extractors so each handler states the caller it needs
//! in its signature.
//!
//! # Example
//!
//! ```rust,no_run
//! use matchday::backend::middleware::AdminUser;
//!
//! async fn delete_everything(AdminUser(claims): AdminUser) -> String {
//!     format!("hello admin {}", claims.username)
//! }
//! ```

pub mod auth;
pub mod extract;
pub mod validation;

pub use auth::{confirm_admin, extract_token, session_claims, AdminUser, AuthUser, MaybeUser};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use validation::Validated;
