//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration suites:
//! - Database fixtures (skipped when `DATABASE_URL` is unset)
//! - Test server and user helpers
//! - Custom assertion macros

#![allow(dead_code)]

pub mod auth_helpers;
#[macro_use]
pub mod database;

pub use auth_helpers::*;
pub use database::*;
