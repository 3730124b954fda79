//! Blog index and post pages.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};

use crate::backend::blog::{comments, db, handlers::post_detail};
use crate::backend::error::BackendResult;
use crate::backend::middleware::MaybeUser;
use crate::backend::pages::error_page;
use crate::backend::pages::forms::render_form_with;
use crate::backend::pages::layout::{escape, page, paragraphs};
use crate::backend::server::state::AppState;
use crate::shared::forms::COMMENT;
use crate::shared::models::blog::PostFilter;
use crate::shared::{BlogPost, Comment, ListQuery, Page, PostDetail};

fn post_summary(post: &BlogPost) -> String {
    let draft = if post.published { "" } else { r#" <span class="badge">Draft</span>"# };
    format!(
        r#"<article class="post-summary">
    <p class="category"><a href="/blog?category={category}">{category}</a>{draft}</p>
    <h2><a href="/blog/{slug}">{title}</a></h2>
    <p>{excerpt}</p>
    <p class="meta">{date}</p>
</article>
"#,
        category = escape(&post.category),
        slug = escape(&post.slug),
        title = escape(&post.title),
        excerpt = escape(&post.excerpt),
        date = post.created_at.format("%d %B %Y"),
    )
}

fn pagination<T>(page: &Page<T>, category: Option<&str>) -> String {
    let category = category
        .map(|c| format!("&category={}", escape(c)))
        .unwrap_or_default();
    let mut links = Vec::new();
    if page.page > 1 {
        links.push(format!(r#"<a href="/blog?page={}{}">Newer</a>"#, page.page - 1, category));
    }
    if i64::from(page.page) * i64::from(page.per_page) < page.total {
        links.push(format!(r#"<a href="/blog?page={}{}">Older</a>"#, page.page + 1, category));
    }
    if links.is_empty() {
        String::new()
    } else {
        format!(r#"<nav class="pagination">{}</nav>"#, links.join(" "))
    }
}

/// GET /blog
pub async fn index(State(state): State<AppState>, viewer: MaybeUser, Query(filter): Query<PostFilter>) -> Response {
    match render_index(&state, &viewer, filter).await {
        Ok(html) => html.into_response(),
        Err(err) => error_page(viewer.0.as_ref(), &err),
    }
}

async fn render_index(state: &AppState, viewer: &MaybeUser, filter: PostFilter) -> BackendResult<Html<String>> {
    let pool = state.db()?;
    let query = ListQuery::new(filter.page, filter.per_page);
    let category = filter
        .category
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    let (posts, total) = db::list_posts(pool, category.as_deref(), viewer.is_admin(), &query).await?;
    let posts = Page::new(posts, &query, total);

    let heading = match category.as_deref() {
        Some(c) => format!(r#"<h1>Blog: {}</h1><p><a href="/blog">All posts</a></p>"#, escape(c)),
        None => "<h1>Blog</h1>".to_string(),
    };
    let list: String = if posts.items.is_empty() {
        "<p>No posts yet.</p>".to_string()
    } else {
        posts.items.iter().map(post_summary).collect()
    };

    let body = format!("{}\n{}\n{}", heading, list, pagination(&posts, category.as_deref()));
    Ok(page("Blog", viewer.0.as_ref(), &body))
}

fn comment_item(comment: &Comment, viewer: &MaybeUser) -> String {
    let can_delete = viewer.is_admin() || viewer.id() == Some(comment.user_id);
    let delete = if can_delete {
        format!(
            r#" <button type="button" class="link" data-action="request" data-method="DELETE" data-url="/api/comments/{}">Delete</button>"#,
            comment.id
        )
    } else {
        String::new()
    };
    format!(
        r#"<li class="comment"><p class="meta"><strong>{}</strong> &middot; {}{}</p>{}</li>"#,
        escape(&comment.username),
        comment.created_at.format("%d %b %Y %H:%M"),
        delete,
        paragraphs(&comment.content)
    )
}

fn engagement_bar(detail: &PostDetail, signed_in: bool) -> String {
    let id = detail.post.id;
    let stats = &detail.stats;
    let pressed = |on: bool| if on { "true" } else { "false" };
    let reactions = if signed_in {
        format!(
            r#"<button type="button" data-action="toggle" data-url="/api/posts/{id}/like" aria-pressed="{liked}">Like <span data-count>{likes}</span></button>
    <button type="button" data-action="toggle" data-url="/api/posts/{id}/save" aria-pressed="{saved}">Save <span data-count>{saves}</span></button>"#,
            liked = pressed(detail.liked_by_me),
            saved = pressed(detail.saved_by_me),
            likes = stats.likes,
            saves = stats.saves,
        )
    } else {
        format!(
            r#"<span>{} likes</span> <span>{} saves</span> <a href="/sign-in">Sign in to react</a>"#,
            stats.likes, stats.saves
        )
    };
    format!(
        r#"<div class="engagement">
    {reactions}
    <button type="button" data-action="share" data-url="/api/posts/{id}/share" data-platform="link">Share <span data-count>{shares}</span></button>
    <span class="views">{views} views</span>
</div>"#,
        shares = stats.shares,
        views = stats.views,
    )
}

/// GET /blog/{slug}
pub async fn post(
    State(state): State<AppState>,
    viewer: MaybeUser,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    match render_post(&state, &viewer, &headers, &slug).await {
        Ok(html) => html.into_response(),
        Err(err) => error_page(viewer.0.as_ref(), &err),
    }
}

async fn render_post(state: &AppState, viewer: &MaybeUser, headers: &HeaderMap, slug: &str) -> BackendResult<Html<String>> {
    let pool = state.db()?;
    let post = db::get_post_by_slug(pool, slug).await?;
    let detail = post_detail(pool, viewer, headers, post).await?;
    let comments = comments::list_comments(pool, detail.post.id).await?;

    let comment_list: String = comments.iter().map(|c| comment_item(c, viewer)).collect();
    let comment_form = match viewer.0.as_ref() {
        Some(claims) if claims.is_verified => {
            let action = format!("/api/posts/{}/comments", detail.post.id);
            render_form_with(&COMMENT, Some(&action), &[])
        }
        Some(_) => "<p>Verify your email address to join the discussion.</p>".to_string(),
        None => r#"<p><a href="/sign-in">Sign in</a> to comment.</p>"#.to_string(),
    };
    let cover = detail
        .post
        .cover_image
        .as_deref()
        .map(|src| format!(r#"<img class="cover" src="{}" alt="">"#, escape(src)))
        .unwrap_or_default();

    let body = format!(
        r#"<article class="post">
    <p class="category"><a href="/blog?category={category}">{category}</a></p>
    <h1>{title}</h1>
    <p class="meta">{date}</p>
    {cover}
    <div class="content">{content}</div>
    {engagement}
</article>
<section class="comments">
    <h2>Comments ({count})</h2>
    <ul>{comment_list}</ul>
    {comment_form}
</section>"#,
        category = escape(&detail.post.category),
        title = escape(&detail.post.title),
        date = detail.post.created_at.format("%d %B %Y"),
        content = paragraphs(&detail.post.content),
        engagement = engagement_bar(&detail, viewer.0.is_some()),
        count = comments.len(),
    );

    Ok(page(&detail.post.title, viewer.0.as_ref(), &body))
}
