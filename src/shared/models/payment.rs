/**
 * Payment Types
 *
 * Subscription payments recorded from the dashboard. Payments are recorded,
 * not charged: the processor lives outside this application.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::forms::{self, FormRequest, FormSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Succeeded,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// Subscription status a user ends up with after this payment state
    pub fn subscription_effect(&self) -> Option<&'static str> {
        match self {
            PaymentStatus::Succeeded => Some("active"),
            PaymentStatus::Refunded => Some("cancelled"),
            PaymentStatus::Pending | PaymentStatus::Failed => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| SharedError::validation("status", format!("Unknown payment status '{}'", s)))
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: Uuid,
    /// `None` once the payer's account is deleted; the record is kept
    pub user_id: Option<Uuid>,
    pub amount_cents: i64,
    pub currency: String,
    pub plan: String,
    #[cfg_attr(feature = "ssr", sqlx(try_from = "String"))]
    pub status: PaymentStatus,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/payments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub plan: String,
    pub reference: String,
    #[serde(default)]
    pub status: PaymentStatus,
}

impl CreatePaymentRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.amount_cents <= 0 {
            return Err(SharedError::validation("amount_cents", "Amount must be positive"));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SharedError::validation("currency", "Currency must be a 3-letter code"));
        }
        if self.plan.trim().is_empty() {
            return Err(SharedError::validation("plan", "Plan is required"));
        }
        if self.reference.trim().is_empty() {
            return Err(SharedError::validation("reference", "Reference is required"));
        }
        Ok(())
    }
}

impl FormRequest for CreatePaymentRequest {
    fn schema() -> &'static FormSchema {
        &forms::PAYMENT
    }
}

/// Body of `PUT /api/payments/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentRequest {
    pub status: PaymentStatus,
}

/// Format an amount in minor units for receipts, e.g. `USD 19.99`
pub fn format_amount(amount_cents: i64, currency: &str) -> String {
    format!(
        "{} {}.{:02}",
        currency.to_ascii_uppercase(),
        amount_cents / 100,
        (amount_cents % 100).abs()
    )
}
