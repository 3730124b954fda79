//! Dashboard statistics
//!
//! `GET /api/dashboard/stats` (admin) aggregates the site's headline numbers
//! in one round trip.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::backend::error::BackendResult;
use crate::backend::middleware::AdminUser;
use crate::backend::server::state::AppState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DashboardStats {
    pub users: i64,
    pub verified_users: i64,
    pub active_subscriptions: i64,
    pub posts: i64,
    pub published_posts: i64,
    pub predictions: i64,
    pub predictions_pending: i64,
    pub predictions_won: i64,
    pub predictions_lost: i64,
    pub predictions_void: i64,
    /// Sum of succeeded payments, in cents across all currencies
    pub revenue_cents: i64,
}

impl DashboardStats {
    /// Share of settled (won or lost) predictions that won, as a percentage
    pub fn win_rate(&self) -> Option<f64> {
        let settled = self.predictions_won + self.predictions_lost;
        (settled > 0).then(|| self.predictions_won as f64 * 100.0 / settled as f64)
    }
}

pub async fn load_stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
    sqlx::query_as::<_, DashboardStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users) AS users,
            (SELECT COUNT(*) FROM users WHERE is_verified) AS verified_users,
            (SELECT COUNT(*) FROM users WHERE subscription_status = 'active') AS active_subscriptions,
            (SELECT COUNT(*) FROM blog_posts) AS posts,
            (SELECT COUNT(*) FROM blog_posts WHERE published) AS published_posts,
            (SELECT COUNT(*) FROM predictions) AS predictions,
            (SELECT COUNT(*) FROM predictions WHERE outcome = 'pending') AS predictions_pending,
            (SELECT COUNT(*) FROM predictions WHERE outcome = 'won') AS predictions_won,
            (SELECT COUNT(*) FROM predictions WHERE outcome = 'lost') AS predictions_lost,
            (SELECT COUNT(*) FROM predictions WHERE outcome = 'void') AS predictions_void,
            (SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payments WHERE status = 'succeeded') AS revenue_cents
        "#,
    )
    .fetch_one(pool)
    .await
}

/// GET /api/dashboard/stats
pub async fn get_stats(State(state): State<AppState>, _admin: AdminUser) -> BackendResult<Json<DashboardStats>> {
    let pool = state.db()?;
    let stats = load_stats(pool).await?;
    tracing::debug!("Dashboard stats: {:?}", stats);
    Ok(Json(stats))
}
