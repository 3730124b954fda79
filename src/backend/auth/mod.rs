//! Authentication Module
//!
//! This module handles user authentication, registration, and session management.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── passwords.rs    - bcrypt hashing and verification
//! ├── sessions.rs     - JWT claims and the session manager
//! ├── cookies.rs      - Session cookie set/remove/read
//! └── handlers/       - HTTP handlers for /api/auth
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use matchday::backend::auth::{sign_in, sign_up, get_me};
//! use matchday::backend::AppState;
//! use axum::{routing::{get, post}, Router};
//!
//! let router: Router<AppState> = Router::new()
//!     .route("/api/auth/sign-up", post(sign_up))
//!     .route("/api/auth/sign-in", post(sign_in))
//!     .route("/api/auth/me", get(get_me));
//! ```

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod passwords;

/// JWT token generation and validation
pub mod sessions;

/// Session cookie helpers
pub mod cookies;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, SignInRequest, SignUpRequest};
pub use handlers::{
    change_password, forgot_password, get_me, resend_verification, reset_password, sign_in, sign_out, sign_up,
    verify_email,
};
pub use sessions::{Claims, SessionManager};
