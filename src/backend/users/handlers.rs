/**
 * User Management Handlers
 *
 * # Endpoints
 *
 * - GET /api/users - all users, paged (admin)
 * - GET /api/users/{id} - one user (admin or the user themself)
 * - PUT /api/users/{id} - admins change role/verification/subscription;
 *   users change their own username and location
 * - DELETE /api/users/{id} - admin; an admin cannot delete their own account
 */

use axum::{
    extract::State,
    response::Json,
};
use uuid::Uuid;

use crate::backend::auth::handlers::signup::is_valid_username;
use crate::backend::auth::users::{self, get_user_by_id, get_user_by_username};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{confirm_admin, AdminUser, ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::models::user::{ProfileUpdate, UpdateUserRequest};
use crate::shared::{ListQuery, Page, PublicUser, SuccessResponse};

/// Subscription states an admin may assign by hand
pub const SUBSCRIPTION_STATUSES: &[&str] = &["active", "cancelled", "past_due", "none"];

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> BackendResult<Json<Page<PublicUser>>> {
    let pool = state.db()?;
    let (users, total) = users::list_users(pool, &query).await?;
    Ok(Json(Page::new(users, &query, total).map(PublicUser::from)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<PublicUser>> {
    let pool = state.db()?;
    ensure_self_or_admin(&caller, confirm_admin(pool, &caller.0).await?, id)?;

    let user = get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    Ok(Json(user.to_public()))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> BackendResult<Json<PublicUser>> {
    let pool = state.db()?;
    let is_admin = confirm_admin(pool, &caller.0).await?;
    ensure_self_or_admin(&caller, is_admin, id)?;

    if request.touches_admin_fields() && !is_admin {
        tracing::warn!("User {} attempted to change admin fields", caller.0.sub);
        return Err(BackendError::forbidden("Only admins can change role, verification or subscription"));
    }

    let profile = normalize_profile(&request.profile)?;
    if let Some(username) = profile.username.as_deref() {
        if let Some(existing) = get_user_by_username(pool, username).await? {
            if existing.id != id {
                return Err(BackendError::bad_request("Username already taken"));
            }
        }
    }

    if let Some(status) = request.admin.subscription_status.as_deref() {
        if !SUBSCRIPTION_STATUSES.contains(&status) {
            return Err(BackendError::bad_request(format!(
                "Subscription status must be one of: {}",
                SUBSCRIPTION_STATUSES.join(", ")
            )));
        }
    }

    let user = users::update_user(pool, id, &profile, &request.admin)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("User {} updated by {}", id, caller.0.sub);
    Ok(Json(user.to_public()))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<SuccessResponse>> {
    let pool = state.db()?;

    if admin.id()? == id {
        tracing::warn!("Admin {} attempted to delete their own account", id);
        return Err(BackendError::bad_request("You cannot delete your own account"));
    }

    if !users::delete_user(pool, id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    tracing::info!("User deleted: {}", id);
    Ok(Json(SuccessResponse::new("User deleted")))
}

fn ensure_self_or_admin(caller: &AuthUser, is_admin: bool, id: Uuid) -> BackendResult<()> {
    if is_admin || caller.id()? == id {
        Ok(())
    } else {
        Err(BackendError::forbidden("You can only access your own account"))
    }
}

/// Trim profile fields and check the username rules
fn normalize_profile(profile: &ProfileUpdate) -> BackendResult<ProfileUpdate> {
    let username = profile.username.as_deref().map(str::trim).map(str::to_string);
    if let Some(username) = username.as_deref() {
        let len = username.chars().count();
        if !(3..=30).contains(&len) || !is_valid_username(username) {
            return Err(BackendError::bad_request(
                "Username must be 3-30 characters, start with a letter, and contain only letters, numbers, and underscores",
            ));
        }
    }

    let location = profile.location.as_deref().map(str::trim).map(str::to_string);
    if location.as_deref().is_some_and(|l| l.chars().count() > 100) {
        return Err(BackendError::bad_request("Location must be at most 100 characters"));
    }

    Ok(ProfileUpdate { username, location })
}
