/**
 * Prediction HTTP Handlers
 *
 * Anyone may list and read predictions. Premium predictions are returned
 * with the tip and analysis withheld (`locked: true`) unless the viewer is
 * an admin or has an active subscription. Writes are admin only.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{AdminUser, ApiPath, ApiQuery, MaybeUser, Validated};
use crate::backend::predictions::db;
use crate::backend::server::state::AppState;
use crate::shared::forms::SPORTS;
use crate::shared::models::prediction::{
    validate_confidence, validate_odds, CreatePredictionRequest, PredictionFilter, UpdatePredictionRequest,
};
use crate::shared::{ListQuery, Page, Prediction, PredictionView, SuccessResponse};

/// Whether the viewer may see premium tips
///
/// Role and subscription are read from the database rather than the session
/// so a payment or demotion recorded mid-session applies immediately.
pub async fn premium_access(pool: &PgPool, viewer: &MaybeUser) -> BackendResult<bool> {
    match viewer.id() {
        Some(user_id) => Ok(get_user_by_id(pool, user_id)
            .await?
            .is_some_and(|user| user.to_public().has_premium_access())),
        None => Ok(false),
    }
}

/// GET /api/predictions
pub async fn list_predictions(
    State(state): State<AppState>,
    viewer: MaybeUser,
    ApiQuery(filter): ApiQuery<PredictionFilter>,
) -> BackendResult<Json<Page<PredictionView>>> {
    let pool = state.db()?;
    let query = ListQuery::new(filter.page, filter.per_page);
    let sport = filter.sport.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let (predictions, total) = db::list_predictions(pool, sport, filter.outcome, &query).await?;
    let access = premium_access(pool, &viewer).await?;

    Ok(Json(Page::new(predictions, &query, total).map(|p| p.view_for(access))))
}

/// GET /api/predictions/{id}
pub async fn get_prediction(
    State(state): State<AppState>,
    viewer: MaybeUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<PredictionView>> {
    let pool = state.db()?;
    let prediction = db::get_prediction(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Prediction not found"))?;

    let access = premium_access(pool, &viewer).await?;
    Ok(Json(prediction.view_for(access)))
}

/// POST /api/predictions
pub async fn create_prediction(
    State(state): State<AppState>,
    admin: AdminUser,
    Validated(request): Validated<CreatePredictionRequest>,
) -> BackendResult<(StatusCode, Json<Prediction>)> {
    let pool = state.db()?;
    request.validate()?;

    let prediction = db::create_prediction(pool, admin.id()?, &request).await?;
    tracing::info!(
        "Prediction created: {} vs {} ({})",
        prediction.home_team,
        prediction.away_team,
        prediction.id
    );

    Ok((StatusCode::CREATED, Json(prediction)))
}

/// PUT /api/predictions/{id}
pub async fn update_prediction(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    Validated(update): Validated<UpdatePredictionRequest>,
) -> BackendResult<Json<Prediction>> {
    let pool = state.db()?;
    validate_update(&update)?;

    let prediction = db::update_prediction(pool, id, &update)
        .await?
        .ok_or_else(|| BackendError::not_found("Prediction not found"))?;

    tracing::info!("Prediction updated: {} (outcome {})", prediction.id, prediction.outcome);
    Ok(Json(prediction))
}

/// DELETE /api/predictions/{id}
pub async fn delete_prediction(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<SuccessResponse>> {
    let pool = state.db()?;

    if !db::delete_prediction(pool, id).await? {
        return Err(BackendError::not_found("Prediction not found"));
    }

    tracing::info!("Prediction deleted: {}", id);
    Ok(Json(SuccessResponse::new("Prediction deleted")))
}

/// Checks for the fields a partial update carries
fn validate_update(update: &UpdatePredictionRequest) -> BackendResult<()> {
    if let Some(odds) = update.odds {
        validate_odds(odds)?;
    }
    if let Some(confidence) = update.confidence {
        validate_confidence(confidence)?;
    }
    if let Some(sport) = update.sport.as_deref() {
        if !SPORTS.contains(&sport) {
            return Err(BackendError::bad_request(format!("Sport must be one of: {}", SPORTS.join(", "))));
        }
    }
    let blank = [&update.league, &update.home_team, &update.away_team, &update.tip]
        .into_iter()
        .flatten()
        .any(|value| value.trim().is_empty());
    if blank {
        return Err(BackendError::bad_request("Text fields cannot be empty"));
    }
    Ok(())
}
