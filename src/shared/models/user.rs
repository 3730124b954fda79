/**
 * User Types
 *
 * Public-facing user representation and the role model used for
 * authorization decisions. The password hash and one-time tokens never
 * leave the backend; this module only contains what is safe to serialize.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Subscription status that unlocks premium predictions
pub const ACTIVE_SUBSCRIPTION: &str = "active";

/// Account role
///
/// Admins manage posts, predictions, users and payments from the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(SharedError::validation(
                "role",
                format!("Unknown role '{}'", other),
            )),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// User information that is safe to return to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
    pub location: Option<String>,
    pub subscription_status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PublicUser {
    /// Whether this user may read premium predictions
    pub fn has_premium_access(&self) -> bool {
        self.role.is_admin() || self.subscription_status.as_deref() == Some(ACTIVE_SUBSCRIPTION)
    }
}

/// Fields an admin may change on any account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUserUpdate {
    pub role: Option<Role>,
    pub is_verified: Option<bool>,
    pub subscription_status: Option<String>,
}

/// Fields a user may change on their own account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub location: Option<String>,
}

/// Body of `PUT /api/users/{id}`
///
/// Admins may send any of the fields; regular users are restricted to the
/// profile subset and only on their own record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(flatten)]
    pub admin: AdminUserUpdate,
    #[serde(flatten)]
    pub profile: ProfileUpdate,
}

impl UpdateUserRequest {
    pub fn touches_admin_fields(&self) -> bool {
        self.admin.role.is_some()
            || self.admin.is_verified.is_some()
            || self.admin.subscription_status.is_some()
    }
}
