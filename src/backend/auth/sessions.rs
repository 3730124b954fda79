/**
 * Session Management and JWT Tokens
 *
 * Session tokens are HS256 JWTs carried in the `session_token` cookie (or an
 * `Authorization: Bearer` header for API clients). The claims mirror what the
 * pages and handlers need without a database round trip: id, email,
 * username, role, verification flag and last known location.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{PublicUser, Role};

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub is_verified: bool,
    #[serde(default)]
    pub location: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    pub fn for_user(user: &PublicUser, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            is_verified: user.is_verified,
            location: user.location.clone(),
            exp: (now + ttl).timestamp().max(0) as u64,
            iat: now.timestamp().max(0) as u64,
        }
    }

    pub fn user_id(&self) -> Result<Uuid, BackendError> {
        Uuid::parse_str(&self.sub).map_err(|e| {
            tracing::warn!("Invalid user ID in token: {:?}", e);
            BackendError::unauthorized("Invalid session")
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Token and cookie lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Create a signed token for a user
    pub fn issue(&self, user: &PublicUser) -> Result<String, BackendError> {
        self.encode(&Claims::for_user(user, self.ttl))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, BackendError> {
        Ok(encode(&Header::default(), claims, &self.encoding)?)
    }

    /// Verify and decode a token; expired or tampered tokens are rejected
    pub fn verify(&self, token: &str) -> Result<Claims, BackendError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}
