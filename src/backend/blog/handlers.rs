/**
 * Blog HTTP Handlers
 *
 * # Endpoints
 *
 * - GET /api/posts - list published posts (admins also see drafts)
 * - GET /api/posts/{id}, GET /api/posts/slug/{slug} - post detail, records a view
 * - POST /api/posts, PUT /api/posts/{id}, DELETE /api/posts/{id} - admin only
 * - POST /api/posts/{id}/like, /save - toggle for the signed-in user
 * - POST /api/posts/{id}/share - record a share
 * - GET/POST /api/posts/{id}/comments, DELETE /api/comments/{id}
 * - GET /api/saves - the caller's saved posts
 */

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::blog::comments;
use crate::backend::blog::db;
use crate::backend::blog::engagement::{self, Reaction};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::geo::client_ip;
use crate::backend::middleware::{
    confirm_admin, AdminUser, ApiJson, ApiPath, ApiQuery, AuthUser, MaybeUser, Validated,
};
use crate::backend::server::state::AppState;
use crate::shared::models::blog::{
    CountResponse, CreateCommentRequest, CreatePostRequest, PostFilter, ShareRequest, ToggleResponse, UpdatePostRequest,
};
use crate::shared::{BlogPost, Comment, FieldError, ListQuery, Page, PostDetail, SuccessResponse};

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: MaybeUser,
    ApiQuery(filter): ApiQuery<PostFilter>,
) -> BackendResult<Json<Page<BlogPost>>> {
    let pool = state.db()?;
    let query = ListQuery::new(filter.page, filter.per_page);
    let category = filter
        .category
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    let (posts, total) = db::list_posts(pool, category.as_deref(), viewer.is_admin(), &query).await?;
    tracing::debug!("Listed {} of {} posts", posts.len(), total);

    Ok(Json(Page::new(posts, &query, total)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: MaybeUser,
    headers: HeaderMap,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<PostDetail>> {
    let pool = state.db()?;
    let post = db::get_post_by_id(pool, id).await?;
    Ok(Json(post_detail(pool, &viewer, &headers, post).await?))
}

/// GET /api/posts/slug/{slug}
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    viewer: MaybeUser,
    headers: HeaderMap,
    ApiPath(slug): ApiPath<String>,
) -> BackendResult<Json<PostDetail>> {
    let pool = state.db()?;
    let post = db::get_post_by_slug(pool, &slug).await?;
    Ok(Json(post_detail(pool, &viewer, &headers, post).await?))
}

/// Counters and viewer flags for a visible post; records one view
pub async fn post_detail(
    pool: &PgPool,
    viewer: &MaybeUser,
    headers: &HeaderMap,
    post: Option<BlogPost>,
) -> BackendResult<PostDetail> {
    let post = visible(post, viewer)?;
    let viewer_id = viewer.id();
    let ip = client_ip(headers).map(|ip| ip.to_string());

    engagement::record_view(pool, post.id, viewer_id, ip.as_deref()).await?;
    let stats = engagement::post_stats(pool, post.id).await?;

    let (liked_by_me, saved_by_me) = match viewer_id {
        Some(user_id) => (
            engagement::has_reacted(pool, Reaction::Like, post.id, user_id).await?,
            engagement::has_reacted(pool, Reaction::Save, post.id, user_id).await?,
        ),
        None => (false, false),
    };

    Ok(PostDetail {
        post,
        stats,
        liked_by_me,
        saved_by_me,
    })
}

/// Drafts exist only for admins
fn visible(post: Option<BlogPost>, viewer: &MaybeUser) -> BackendResult<BlogPost> {
    match post {
        Some(post) if post.published || viewer.is_admin() => Ok(post),
        _ => Err(BackendError::not_found("Post not found")),
    }
}

/// Load a post that engagement endpoints may act on
async fn require_post(pool: &PgPool, id: Uuid, viewer: &MaybeUser) -> BackendResult<BlogPost> {
    visible(db::get_post_by_id(pool, id).await?, viewer)
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    admin: AdminUser,
    Validated(request): Validated<CreatePostRequest>,
) -> BackendResult<(StatusCode, Json<BlogPost>)> {
    let pool = state.db()?;
    let slug = db::post_slug(&request);

    if db::get_post_by_slug(pool, &slug).await?.is_some() {
        tracing::warn!("Duplicate post slug: {}", slug);
        return Err(BackendError::bad_request(format!("A post with slug '{}' already exists", slug)));
    }

    let post = db::create_post(pool, admin.id()?, &request).await?;
    tracing::info!("Post created: {} ({})", post.slug, post.id);

    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    Validated(update): Validated<UpdatePostRequest>,
) -> BackendResult<Json<BlogPost>> {
    let pool = state.db()?;

    if update.slug.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(BackendError::validation(vec![FieldError::new("slug", "Slug cannot be empty")]));
    }

    let post = db::update_post(pool, id, &update)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    tracing::info!("Post updated: {}", post.id);
    Ok(Json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<SuccessResponse>> {
    let pool = state.db()?;

    if !db::delete_post(pool, id).await? {
        return Err(BackendError::not_found("Post not found"));
    }

    tracing::info!("Post deleted: {}", id);
    Ok(Json(SuccessResponse::new("Post deleted")))
}

/// POST /api/posts/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<ToggleResponse>> {
    toggle(&state, Reaction::Like, user, id).await
}

/// POST /api/posts/{id}/save
pub async fn toggle_save(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<ToggleResponse>> {
    toggle(&state, Reaction::Save, user, id).await
}

async fn toggle(state: &AppState, reaction: Reaction, user: AuthUser, post_id: Uuid) -> BackendResult<Json<ToggleResponse>> {
    let pool = state.db()?;
    let user_id = user.id()?;
    let viewer = MaybeUser(Some(user.0));

    require_post(pool, post_id, &viewer).await?;
    let result = engagement::toggle(pool, reaction, post_id, user_id).await?;
    tracing::info!("{:?} on {} by {}: active={}", reaction, post_id, user_id, result.active);

    Ok(Json(result))
}

/// POST /api/posts/{id}/share
pub async fn share_post(
    State(state): State<AppState>,
    viewer: MaybeUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<ShareRequest>,
) -> BackendResult<Json<CountResponse>> {
    let pool = state.db()?;
    let platform = engagement::normalize_platform(&request.platform)
        .ok_or_else(|| BackendError::bad_request("Unknown share platform"))?;

    require_post(pool, id, &viewer).await?;
    let count = engagement::record_share(pool, id, viewer.id(), &platform).await?;

    Ok(Json(CountResponse { count }))
}

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: MaybeUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<Vec<Comment>>> {
    let pool = state.db()?;
    require_post(pool, id, &viewer).await?;
    Ok(Json(comments::list_comments(pool, id).await?))
}

/// POST /api/posts/{id}/comments
///
/// Only users with a verified email may comment. Verification is read from
/// the database so a session issued before verification still works.
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    Validated(request): Validated<CreateCommentRequest>,
) -> BackendResult<(StatusCode, Json<Comment>)> {
    let pool = state.db()?;
    let user_id = user.id()?;

    let author = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User no longer exists"))?;
    if !author.is_verified {
        tracing::warn!("Unverified user {} tried to comment", user_id);
        return Err(BackendError::forbidden("Verify your email address before commenting"));
    }

    require_post(pool, id, &MaybeUser(Some(user.0))).await?;
    let comment = comments::create_comment(pool, id, user_id, &request.content).await?;
    tracing::info!("Comment {} added to post {}", comment.id, id);

    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> BackendResult<Json<SuccessResponse>> {
    let pool = state.db()?;
    let user_id = user.id()?;

    let comment = comments::get_comment(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;

    if comment.user_id != user_id && !confirm_admin(pool, &user.0).await? {
        tracing::warn!("User {} tried to delete comment {} by {}", user_id, id, comment.user_id);
        return Err(BackendError::forbidden("You can only delete your own comments"));
    }

    comments::delete_comment(pool, id).await?;
    tracing::info!("Comment deleted: {}", id);
    Ok(Json(SuccessResponse::new("Comment deleted")))
}

/// GET /api/saves
pub async fn list_saves(State(state): State<AppState>, user: AuthUser) -> BackendResult<Json<Vec<BlogPost>>> {
    let pool = state.db()?;
    Ok(Json(db::list_saved_posts(pool, user.id()?).await?))
}
