//! Database operations for blog posts

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::models::blog::{slugify, CreatePostRequest, UpdatePostRequest};
use crate::shared::{BlogPost, ListQuery};

const POST_COLUMNS: &str =
    "id, author_id, title, slug, excerpt, content, cover_image, category, published, created_at, updated_at";

/// Posts newest first with the total matching count
///
/// Drafts are only included when `include_drafts` is set (admin viewers).
pub async fn list_posts(
    pool: &PgPool,
    category: Option<&str>,
    include_drafts: bool,
    query: &ListQuery,
) -> Result<(Vec<BlogPost>, i64), sqlx::Error> {
    let posts = sqlx::query_as::<_, BlogPost>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM blog_posts
        WHERE ($1::text IS NULL OR category = $1) AND (published OR $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(category)
    .bind(include_drafts)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM blog_posts WHERE ($1::text IS NULL OR category = $1) AND (published OR $2)",
    )
    .bind(category)
    .bind(include_drafts)
    .fetch_one(pool)
    .await?;

    Ok((posts, total))
}

pub async fn get_post_by_id(pool: &PgPool, id: Uuid) -> Result<Option<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(&format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_post_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(&format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = $1"))
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Insert a post; the slug is derived from the title when not supplied
pub async fn create_post(pool: &PgPool, author_id: Uuid, request: &CreatePostRequest) -> Result<BlogPost, sqlx::Error> {
    let now = Utc::now();
    let slug = post_slug(request);

    sqlx::query_as::<_, BlogPost>(&format!(
        r#"
        INSERT INTO blog_posts (id, author_id, title, slug, excerpt, content, cover_image, category, published, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(request.title.trim())
    .bind(&slug)
    .bind(&request.excerpt)
    .bind(&request.content)
    .bind(request.cover_image.as_deref().filter(|s| !s.trim().is_empty()))
    .bind(request.category.trim().to_lowercase())
    .bind(request.published)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Slug a new post will be stored under
pub fn post_slug(request: &CreatePostRequest) -> String {
    match request.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slugify(slug),
        _ => slugify(&request.title),
    }
}

/// Apply the fields present in `update`; `None` when the post does not exist
pub async fn update_post(pool: &PgPool, id: Uuid, update: &UpdatePostRequest) -> Result<Option<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(&format!(
        r#"
        UPDATE blog_posts
        SET title = COALESCE($2, title),
            slug = COALESCE($3, slug),
            excerpt = COALESCE($4, excerpt),
            content = COALESCE($5, content),
            cover_image = COALESCE($6, cover_image),
            category = COALESCE($7, category),
            published = COALESCE($8, published),
            updated_at = $9
        WHERE id = $1
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(update.title.as_deref().map(str::trim))
    .bind(update.slug.as_deref().map(slugify))
    .bind(update.excerpt.as_deref())
    .bind(update.content.as_deref())
    .bind(update.cover_image.as_deref())
    .bind(update.category.as_deref().map(|c| c.trim().to_lowercase()))
    .bind(update.published)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

/// Delete a post and, through cascades, its comments and engagement rows
pub async fn delete_post(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Posts the user saved, most recently saved first
pub async fn list_saved_posts(pool: &PgPool, user_id: Uuid) -> Result<Vec<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(
        r#"
        SELECT p.id, p.author_id, p.title, p.slug, p.excerpt, p.content, p.cover_image, p.category,
               p.published, p.created_at, p.updated_at
        FROM saves s
        JOIN blog_posts p ON p.id = s.post_id
        WHERE s.user_id = $1 AND p.published
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
