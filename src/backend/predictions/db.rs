//! Database operations for predictions

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::models::prediction::{CreatePredictionRequest, UpdatePredictionRequest};
use crate::shared::{ListQuery, Prediction, PredictionOutcome};

const PREDICTION_COLUMNS: &str = "id, author_id, sport, league, home_team, away_team, kickoff_at, tip, odds, \
     confidence, analysis, is_premium, outcome, created_at, updated_at";

/// Predictions with the latest kickoff first, plus the total matching count
pub async fn list_predictions(
    pool: &PgPool,
    sport: Option<&str>,
    outcome: Option<PredictionOutcome>,
    query: &ListQuery,
) -> Result<(Vec<Prediction>, i64), sqlx::Error> {
    let outcome = outcome.map(|o| o.as_str());

    let predictions = sqlx::query_as::<_, Prediction>(&format!(
        r#"
        SELECT {PREDICTION_COLUMNS}
        FROM predictions
        WHERE ($1::text IS NULL OR sport = $1) AND ($2::text IS NULL OR outcome = $2)
        ORDER BY kickoff_at DESC
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(sport)
    .bind(outcome)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM predictions WHERE ($1::text IS NULL OR sport = $1) AND ($2::text IS NULL OR outcome = $2)",
    )
    .bind(sport)
    .bind(outcome)
    .fetch_one(pool)
    .await?;

    Ok((predictions, total))
}

/// Most recent free predictions, for the home page
pub async fn latest_free_predictions(pool: &PgPool, limit: i64) -> Result<Vec<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!(
        "SELECT {PREDICTION_COLUMNS} FROM predictions WHERE NOT is_premium ORDER BY kickoff_at DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_prediction(pool: &PgPool, id: Uuid) -> Result<Option<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!("SELECT {PREDICTION_COLUMNS} FROM predictions WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_prediction(
    pool: &PgPool,
    author_id: Uuid,
    request: &CreatePredictionRequest,
) -> Result<Prediction, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        INSERT INTO predictions (id, author_id, sport, league, home_team, away_team, kickoff_at, tip, odds,
                                 confidence, analysis, is_premium, outcome, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
        RETURNING {PREDICTION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(&request.sport)
    .bind(request.league.trim())
    .bind(request.home_team.trim())
    .bind(request.away_team.trim())
    .bind(request.kickoff_at)
    .bind(request.tip.trim())
    .bind(request.odds)
    .bind(request.confidence)
    .bind(&request.analysis)
    .bind(request.is_premium)
    .bind(PredictionOutcome::Pending.as_str())
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Apply the fields present in `update`; `None` when the prediction does not exist
pub async fn update_prediction(
    pool: &PgPool,
    id: Uuid,
    update: &UpdatePredictionRequest,
) -> Result<Option<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        UPDATE predictions
        SET sport = COALESCE($2, sport),
            league = COALESCE($3, league),
            home_team = COALESCE($4, home_team),
            away_team = COALESCE($5, away_team),
            kickoff_at = COALESCE($6, kickoff_at),
            tip = COALESCE($7, tip),
            odds = COALESCE($8, odds),
            confidence = COALESCE($9, confidence),
            analysis = COALESCE($10, analysis),
            is_premium = COALESCE($11, is_premium),
            outcome = COALESCE($12, outcome),
            updated_at = $13
        WHERE id = $1
        RETURNING {PREDICTION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(update.sport.as_deref())
    .bind(update.league.as_deref().map(str::trim))
    .bind(update.home_team.as_deref().map(str::trim))
    .bind(update.away_team.as_deref().map(str::trim))
    .bind(update.kickoff_at)
    .bind(update.tip.as_deref().map(str::trim))
    .bind(update.odds)
    .bind(update.confidence)
    .bind(update.analysis.as_deref())
    .bind(update.is_premium)
    .bind(update.outcome.map(|o| o.as_str()))
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

pub async fn delete_prediction(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM predictions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
