//! Blog Module
//!
//! Posts, comments and reader engagement.
//!
//! # Module Structure
//!
//! ```text
//! blog/
//! ├── mod.rs          - Module exports
//! ├── db.rs           - Post queries
//! ├── comments.rs     - Comment queries
//! ├── engagement.rs   - Likes, saves, shares, views and counters
//! └── handlers.rs     - HTTP handlers
//! ```

pub mod comments;
pub mod db;
pub mod engagement;
pub mod handlers;

pub use engagement::Reaction;
