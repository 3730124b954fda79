//! Users Module
//!
//! Dashboard user management. Queries live in `auth::users`; this module
//! only adds the HTTP layer and its access rules.

pub mod handlers;
