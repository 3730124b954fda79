//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by surface into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── api_routes.rs   - JSON API under /api
//! └── page_routes.rs  - Server-rendered pages
//! ```
//!
//! # Route Organization
//!
//! 1. **API Routes** - Auth, posts, comments, predictions, users, payments, stats
//! 2. **Page Routes** - Marketing, blog, account and dashboard pages
//! 3. **Static Files** - `/static` served from `public/`
//! 4. **Fallback Handler** - Rendered 404 page
//!
//! # Example
//!
//! ```rust,no_run
//! use matchday::backend::routes::create_router;
//! use matchday::backend::server::state::AppState;
//!
//! # fn example(app_state: AppState) {
//! let router = create_router(app_state);
//! # }
//! ```

/// Main router creation
pub mod router;

/// JSON API handlers
pub mod api_routes;

/// HTML page handlers
pub mod page_routes;

pub use router::create_router;
