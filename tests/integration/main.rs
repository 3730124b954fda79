//! Integration tests for the Matchday HTTP surface
//!
//! Suites that need PostgreSQL skip themselves when `DATABASE_URL` is unset;
//! the page suite and the database-unavailable checks always run.

#[macro_use]
#[path = "../common/mod.rs"]
mod common;

mod auth_test;
mod blog_test;
mod migrations_test;
mod pages_test;
mod payments_test;
mod predictions_test;
mod users_test;
