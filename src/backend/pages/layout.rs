//! Page shell shared by every server-rendered view.

use axum::response::Html;

use crate::backend::auth::sessions::Claims;

pub const SITE_NAME: &str = "Matchday";

/// Escape text for use in HTML bodies and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Plain text split into escaped paragraphs on blank lines
pub fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape(p).replace('\n', "<br>")))
        .collect()
}

fn nav(viewer: Option<&Claims>) -> String {
    let account = match viewer {
        Some(claims) => format!(
            r#"<a href="/dashboard">{}</a>
        <button type="button" class="link" data-action="sign-out">Sign out</button>"#,
            escape(&claims.username)
        ),
        None => r#"<a href="/sign-in">Sign in</a>
        <a href="/sign-up" class="button">Join free</a>"#
            .to_string(),
    };

    format!(
        r#"<header class="site-header">
    <a href="/" class="brand">{SITE_NAME}</a>
    <nav>
        <a href="/blog">Blog</a>
        <a href="/pricing">Pricing</a>
        <a href="/about">About</a>
        {account}
    </nav>
</header>"#
    )
}

fn footer() -> &'static str {
    r#"<footer class="site-footer">
    <p>Predictions are opinions, not guarantees. Please gamble responsibly.</p>
    <nav><a href="/privacy">Privacy</a> <a href="/terms">Terms</a> <a href="/about">About</a></nav>
</footer>"#
}

/// Wrap `body` in the full document: head, nav, toast region and script
pub fn page(title: &str, viewer: Option<&Claims>, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | {SITE_NAME}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
{nav}
<main>
{body}
</main>
{footer}
<div id="toasts" class="toasts" aria-live="polite"></div>
<script src="/static/app.js" defer></script>
</body>
</html>"#,
        title = escape(title),
        nav = nav(viewer),
        footer = footer(),
    ))
}
