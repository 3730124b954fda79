/**
 * Payment Handlers
 *
 * Payments are recorded by admins from the dashboard. Recording a
 * `succeeded` payment activates the payer's subscription and emails a
 * receipt; marking a payment `refunded` cancels it.
 *
 * # Endpoints
 *
 * - GET /api/payments - admins see every payment, users their own
 * - POST /api/payments - record a payment (admin)
 * - PUT /api/payments/{id} - change a payment's status (admin)
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_id, update_subscription_status};
use crate::backend::email::templates::payment_receipt_email;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{confirm_admin, AdminUser, ApiJson, ApiPath, ApiQuery, AuthUser, Validated};
use crate::backend::payments::db;
use crate::backend::server::state::AppState;
use crate::shared::models::payment::{CreatePaymentRequest, UpdatePaymentRequest};
use crate::shared::{ListQuery, Page, Payment, PaymentStatus};

/// GET /api/payments
pub async fn list_payments(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> BackendResult<Json<Page<Payment>>> {
    let pool = state.db()?;
    let scope = if confirm_admin(pool, &caller.0).await? { None } else { Some(caller.id()?) };

    let (payments, total) = db::list_payments(pool, scope, &query).await?;
    Ok(Json(Page::new(payments, &query, total)))
}

/// POST /api/payments
pub async fn create_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Validated(request): Validated<CreatePaymentRequest>,
) -> BackendResult<(StatusCode, Json<Payment>)> {
    let pool = state.db()?;
    request.validate()?;

    if get_user_by_id(pool, request.user_id).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }

    let payment = db::create_payment(pool, &request).await?;
    tracing::info!(
        "Payment {} recorded for user {}: {} cents {} ({})",
        payment.id,
        request.user_id,
        payment.amount_cents,
        payment.currency,
        payment.status
    );

    apply_subscription_effect(&state, pool, &payment, None).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// PUT /api/payments/{id}
pub async fn update_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdatePaymentRequest>,
) -> BackendResult<Json<Payment>> {
    let pool = state.db()?;

    let previous = db::get_payment(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Payment not found"))?;

    let payment = db::update_payment_status(pool, id, request.status)
        .await?
        .ok_or_else(|| BackendError::not_found("Payment not found"))?;
    tracing::info!("Payment {} status {} -> {}", id, previous.status, payment.status);

    apply_subscription_effect(&state, pool, &payment, Some(previous.status)).await?;
    Ok(Json(payment))
}

/// Update the payer's subscription and send a receipt on a new success
async fn apply_subscription_effect(
    state: &AppState,
    pool: &PgPool,
    payment: &Payment,
    previous: Option<PaymentStatus>,
) -> BackendResult<()> {
    if previous == Some(payment.status) {
        return Ok(());
    }

    let Some(subscription) = payment.status.subscription_effect() else {
        return Ok(());
    };

    let Some(user_id) = payment.user_id else {
        tracing::info!("Payment {} has no payer account; subscription unchanged", payment.id);
        return Ok(());
    };

    let user = update_subscription_status(pool, user_id, subscription).await?;
    tracing::info!("Subscription of {} is now {}", user.id, subscription);

    if payment.status == PaymentStatus::Succeeded {
        state
            .email
            .send_best_effort(payment_receipt_email(&user.username, &user.email, payment))
            .await;
    }

    Ok(())
}
