//! Database operations for payments

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::models::payment::CreatePaymentRequest;
use crate::shared::{ListQuery, Payment, PaymentStatus};

const PAYMENT_COLUMNS: &str = "id, user_id, amount_cents, currency, plan, status, reference, created_at";

/// Payments newest first; restricted to one user when `user_id` is set
pub async fn list_payments(
    pool: &PgPool,
    user_id: Option<Uuid>,
    query: &ListQuery,
) -> Result<(Vec<Payment>, i64), sqlx::Error> {
    let payments = sqlx::query_as::<_, Payment>(&format!(
        r#"
        SELECT {PAYMENT_COLUMNS}
        FROM payments
        WHERE ($1::uuid IS NULL OR user_id = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(user_id)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE ($1::uuid IS NULL OR user_id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok((payments, total))
}

pub async fn get_payment(pool: &PgPool, id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_payment(pool: &PgPool, request: &CreatePaymentRequest) -> Result<Payment, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        r#"
        INSERT INTO payments (id, user_id, amount_cents, currency, plan, status, reference, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {PAYMENT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.amount_cents)
    .bind(request.currency.to_ascii_uppercase())
    .bind(request.plan.trim())
    .bind(request.status.as_str())
    .bind(request.reference.trim())
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn update_payment_status(pool: &PgPool, id: Uuid, status: PaymentStatus) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "UPDATE payments SET status = $1 WHERE id = $2 RETURNING {PAYMENT_COLUMNS}"
    ))
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await
}
