//! Predictions Module
//!
//! Match predictions published by admins, with premium content gated on an
//! active subscription.

pub mod db;
pub mod handlers;

pub use handlers::premium_access;
