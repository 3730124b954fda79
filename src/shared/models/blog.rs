/**
 * Blog Types
 *
 * Blog posts, comments and the engagement counters (likes, saves, shares,
 * views) shown next to each post.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::forms::{self, FormRequest, FormSchema};

/// A blog post as stored in the `blog_posts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct BlogPost {
    pub id: Uuid,
    /// `None` once the author's account is deleted
    pub author_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub category: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Engagement counters for a single post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct PostStats {
    pub likes: i64,
    pub comments: i64,
    pub saves: i64,
    pub shares: i64,
    pub views: i64,
}

/// A post together with its counters and the viewer's own engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub stats: PostStats,
    pub liked_by_me: bool,
    pub saved_by_me: bool,
}

/// Body of `POST /api/posts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    /// Derived from the title when omitted
    #[serde(default)]
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub category: String,
    #[serde(default)]
    pub published: bool,
}

/// Body of `PUT /api/posts/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub published: Option<bool>,
}

/// Query string of `GET /api/posts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilter {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// A comment with its author's username
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl FormRequest for CreatePostRequest {
    fn schema() -> &'static FormSchema {
        &forms::BLOG_POST
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

impl FormRequest for UpdatePostRequest {
    const PARTIAL: bool = true;

    fn schema() -> &'static FormSchema {
        &forms::BLOG_POST
    }
}

impl FormRequest for CreateCommentRequest {
    fn schema() -> &'static FormSchema {
        &forms::COMMENT
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    pub platform: String,
}

/// Result of toggling a like or a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    /// Whether the caller now likes/saves the post
    pub active: bool,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

/// Turn a post title into a URL slug
///
/// ASCII letters and digits are lowercased and kept; every run of other
/// characters collapses to a single `-`. Titles with nothing usable map to
/// `"post"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}
