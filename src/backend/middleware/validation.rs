/**
 * Schema-Validated JSON Bodies
 *
 * `Validated<T>` reads the request body as JSON, checks it against the form
 * schema declared by `T: FormRequest`, then deserializes it. Every failing
 * field is reported in one 400 response.
 */

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::backend::error::BackendError;
use crate::shared::forms::FormRequest;

/// A request body that passed its form schema
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T: FormRequest> Validated<T> {
    /// Validate and deserialize an already-parsed body
    pub fn from_value(body: Value) -> Result<Self, BackendError> {
        let schema = T::schema();
        if let Err(fields) = T::validate_body(&body) {
            tracing::warn!("Validation failed for form {}: {} field(s)", schema.id, fields.len());
            return Err(BackendError::validation(fields));
        }

        serde_json::from_value(body).map(Validated).map_err(|e| {
            tracing::warn!("Malformed {} body: {}", schema.id, e);
            BackendError::bad_request(format!("Invalid request body: {}", e))
        })
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: FormRequest,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        Self::from_value(body)
    }
}
