//! Likes, saves, shares and views
//!
//! Likes and saves are unique per (post, user) and toggle on each call.
//! Shares and views are append-only counters.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::models::blog::ToggleResponse;
use crate::shared::PostStats;

/// Which per-user engagement table to toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Save,
}

impl Reaction {
    fn table(self) -> &'static str {
        match self {
            Reaction::Like => "likes",
            Reaction::Save => "saves",
        }
    }
}

/// Flip the caller's like or save and return the new state and count
pub async fn toggle(pool: &PgPool, reaction: Reaction, post_id: Uuid, user_id: Uuid) -> Result<ToggleResponse, sqlx::Error> {
    let table = reaction.table();

    let removed = sqlx::query(&format!("DELETE FROM {table} WHERE post_id = $1 AND user_id = $2"))
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();

    let active = if removed > 0 {
        false
    } else {
        sqlx::query(&format!(
            "INSERT INTO {table} (id, post_id, user_id, created_at) VALUES ($1, $2, $3, $4) ON CONFLICT (post_id, user_id) DO NOTHING"
        ))
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        true
    };

    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE post_id = $1"))
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(ToggleResponse { active, count })
}

pub async fn has_reacted(pool: &PgPool, reaction: Reaction, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(&format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE post_id = $1 AND user_id = $2)",
        reaction.table()
    ))
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Record a share and return the post's share count
pub async fn record_share(pool: &PgPool, post_id: Uuid, user_id: Option<Uuid>, platform: &str) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT INTO shares (id, post_id, user_id, platform, created_at) VALUES ($1, $2, $3, $4, $5)")
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(user_id)
        .bind(platform)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    sqlx::query_scalar("SELECT COUNT(*) FROM shares WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await
}

pub async fn record_view(pool: &PgPool, post_id: Uuid, user_id: Option<Uuid>, ip_address: Option<&str>) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO views (id, post_id, user_id, ip_address, created_at) VALUES ($1, $2, $3, $4, $5)")
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(user_id)
        .bind(ip_address)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn post_stats(pool: &PgPool, post_id: Uuid) -> Result<PostStats, sqlx::Error> {
    sqlx::query_as::<_, PostStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM likes WHERE post_id = $1) AS likes,
            (SELECT COUNT(*) FROM comments WHERE post_id = $1) AS comments,
            (SELECT COUNT(*) FROM saves WHERE post_id = $1) AS saves,
            (SELECT COUNT(*) FROM shares WHERE post_id = $1) AS shares,
            (SELECT COUNT(*) FROM views WHERE post_id = $1) AS views
        "#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await
}

/// Lowercased platform name, or `None` when unusable
pub fn normalize_platform(platform: &str) -> Option<String> {
    let platform = platform.trim().to_lowercase();
    let valid = !platform.is_empty()
        && platform.len() <= 32
        && platform.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(platform)
}
