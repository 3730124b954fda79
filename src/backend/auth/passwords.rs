//! Password hashing with bcrypt.
//!
//! Hashing runs on the blocking pool so a burst of sign-ins does not stall
//! the async workers.

use crate::backend::error::BackendError;

/// bcrypt work factor
#[cfg(not(test))]
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
pub const HASH_COST: u32 = 4;

pub const MIN_PASSWORD_LEN: usize = 8;

pub async fn hash_password(password: &str) -> Result<String, BackendError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(|e| BackendError::handler(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("Password hashing task failed: {}", e),
        ))?
        .map_err(BackendError::from)
}

/// Compare a candidate password against a stored bcrypt hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, BackendError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::handler(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("Password verification task failed: {}", e),
        ))?
        .map_err(BackendError::from)
}
