//! Payments Module
//!
//! Subscription payments recorded from the dashboard and their effect on
//! the payer's subscription status.

pub mod db;
pub mod handlers;
