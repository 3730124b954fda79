//! Email Module
//!
//! Outgoing transactional email: account verification, password reset and
//! payment receipts.
//!
//! - **`client`** - `EmailClient` (SMTP via lettre, log-only, in-memory)
//! - **`templates`** - Message bodies

pub mod client;
pub mod templates;

pub use client::{EmailClient, OutgoingEmail, Outbox};
