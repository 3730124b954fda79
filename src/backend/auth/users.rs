/**
 * User Model and Database Operations
 *
 * This module handles user records and every query against the `users`
 * table. Uniqueness of email and username is enforced by the schema; callers
 * check first to return a friendly message and fall back on the constraint.
 */

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::models::user::{AdminUserUpdate, ProfileUpdate};
use crate::shared::{ListQuery, PublicUser, Role};

/// How long a password reset link stays valid
pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, is_verified, location, \
    subscription_status, verification_token, reset_token, reset_token_expires_at, created_at, updated_at";

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    /// Username (unique, 3-30 chars)
    pub username: String,
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub is_verified: bool,
    /// Last resolved location, e.g. "Lagos, Nigeria"
    pub location: Option<String>,
    /// Subscription status (active, cancelled, ...)
    pub subscription_status: Option<String>,
    pub verification_token: Option<String>,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// View without credentials or one-time tokens
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            is_verified: self.is_verified,
            location: self.location.clone(),
            subscription_status: self.subscription_status.clone(),
            created_at: self.created_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        user.to_public()
    }
}

/// Fields required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub verification_token: Option<String>,
}

/// Random single-use token for verification and reset links
pub fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Create a new user
pub async fn create_user(pool: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, role, is_verified, verification_token, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(new_user.role.as_str())
    .bind(&new_user.verification_token)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by email (case-insensitive)
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by username (case-insensitive)
pub async fn get_user_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE lower(username) = lower($1)"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List users newest first, with the total count
pub async fn list_users(pool: &PgPool, query: &ListQuery) -> Result<(Vec<User>, i64), sqlx::Error> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
    ))
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok((users, total))
}

/// Mark the user owning `token` as verified and consume the token
pub async fn verify_email_token(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET is_verified = TRUE, verification_token = NULL, updated_at = $2
        WHERE verification_token = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(token)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

pub async fn set_verification_token(pool: &PgPool, user_id: Uuid, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET verification_token = $1, updated_at = $2 WHERE id = $3")
        .bind(token)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Store a password reset token valid for [`RESET_TOKEN_TTL_MINUTES`]
pub async fn set_reset_token(pool: &PgPool, user_id: Uuid, token: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

    sqlx::query(
        "UPDATE users SET reset_token = $1, reset_token_expires_at = $2, updated_at = $3 WHERE id = $4",
    )
    .bind(token)
    .bind(expires_at)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(expires_at)
}

/// Replace the password of the user owning an unexpired reset token
///
/// The token is consumed. Returns `None` for unknown or expired tokens.
pub async fn reset_password_with_token(
    pool: &PgPool,
    token: &str,
    password_hash: &str,
) -> Result<Option<User>, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET password_hash = $2, reset_token = NULL, reset_token_expires_at = NULL, updated_at = $3
        WHERE reset_token = $1 AND reset_token_expires_at > $3
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(token)
    .bind(password_hash)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn update_password(pool: &PgPool, user_id: Uuid, password_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET password_hash = $1, reset_token = NULL, reset_token_expires_at = NULL, updated_at = $2
        WHERE id = $3
        "#,
    )
    .bind(password_hash)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_location(pool: &PgPool, user_id: Uuid, location: Option<&str>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET location = $1, updated_at = $2 WHERE id = $3 RETURNING {USER_COLUMNS}"
    ))
    .bind(location)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Apply profile and admin changes in one statement; absent fields are kept
///
/// Returns `None` when the user does not exist. A username taken by another
/// account surfaces as a unique violation.
pub async fn update_user(
    pool: &PgPool,
    user_id: Uuid,
    profile: &ProfileUpdate,
    admin: &AdminUserUpdate,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET username = COALESCE($1, username),
            location = COALESCE($2, location),
            role = COALESCE($3, role),
            is_verified = COALESCE($4, is_verified),
            subscription_status = COALESCE($5, subscription_status),
            updated_at = $6
        WHERE id = $7
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&profile.username)
    .bind(&profile.location)
    .bind(admin.role.map(|r| r.as_str()))
    .bind(admin.is_verified)
    .bind(&admin.subscription_status)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Update user's subscription status
pub async fn update_subscription_status(pool: &PgPool, user_id: Uuid, status: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET subscription_status = $1, updated_at = $2 WHERE id = $3 RETURNING {USER_COLUMNS}"
    ))
    .bind(status)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Delete a user; returns whether a row was removed
pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
