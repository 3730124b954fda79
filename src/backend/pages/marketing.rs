//! Home, about, pricing, legal and not-found pages.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::backend::auth::sessions::Claims;
use crate::backend::middleware::MaybeUser;
use crate::backend::pages::layout::{escape, page, SITE_NAME};
use crate::backend::predictions::db::latest_free_predictions;
use crate::backend::server::state::AppState;
use crate::shared::models::payment::format_amount;
use crate::shared::PredictionView;

const HOME_PREDICTIONS: i64 = 6;

/// Subscription plans shown on the pricing page
pub const PLANS: &[(&str, i64, &str)] = &[
    ("free", 0, "Free tips, the blog and comments once your email is verified"),
    ("premium-monthly", 1999, "Every premium tip with full analysis, billed monthly"),
    ("premium-yearly", 19900, "Every premium tip with full analysis, two months free"),
];

/// Card for one prediction; locked predictions show a pricing link instead of the tip
pub fn prediction_card(view: &PredictionView) -> String {
    let p = &view.prediction;
    let tip = if view.locked {
        r#"<p class="locked">Premium tip. <a href="/pricing">Subscribe</a> to unlock.</p>"#.to_string()
    } else {
        format!(
            r#"<p class="tip">{}</p><p class="analysis">{}</p>"#,
            escape(&p.tip),
            escape(&p.analysis)
        )
    };

    format!(
        r#"<article class="prediction" data-outcome="{outcome}">
    <header><span class="sport">{sport}</span> <span class="league">{league}</span>{premium}</header>
    <h3>{home} vs {away}</h3>
    <p class="kickoff">{kickoff}</p>
    {tip}
    <p class="meta">Odds {odds:.2} &middot; Confidence {confidence}/5 &middot; {outcome}</p>
</article>
"#,
        outcome = p.outcome,
        sport = escape(&p.sport),
        league = escape(&p.league),
        premium = if p.is_premium { r#" <span class="badge">Premium</span>"# } else { "" },
        home = escape(&p.home_team),
        away = escape(&p.away_team),
        kickoff = p.kickoff_at.format("%a %d %b %Y, %H:%M UTC"),
        odds = p.odds,
        confidence = p.confidence,
    )
}

/// GET /
pub async fn home(State(state): State<AppState>, viewer: MaybeUser) -> Html<String> {
    let predictions = match state.db_pool.as_ref() {
        Some(pool) => latest_free_predictions(pool, HOME_PREDICTIONS)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Failed to load home page predictions: {}", e);
                Vec::new()
            }),
        None => Vec::new(),
    };

    let cards: String = if predictions.is_empty() {
        "<p>No free predictions right now. Check back before the weekend fixtures.</p>".to_string()
    } else {
        predictions
            .into_iter()
            .map(|p| prediction_card(&p.view_for(true)))
            .collect()
    };

    let cta = if viewer.0.is_some() {
        r#"<a href="/dashboard" class="button">Go to your dashboard</a>"#
    } else {
        r#"<a href="/sign-up" class="button">Create a free account</a> <a href="/pricing">See premium plans</a>"#
    };

    let body = format!(
        r#"<section class="hero">
    <h1>Sharper picks for every matchday</h1>
    <p>Researched predictions across football, basketball, tennis and more, with the reasoning behind every tip.</p>
    {cta}
</section>
<section class="latest">
    <h2>Latest free predictions</h2>
    {cards}
</section>"#
    );

    page("Sports predictions", viewer.0.as_ref(), &body)
}

/// GET /about
pub async fn about(viewer: MaybeUser) -> Html<String> {
    let body = format!(
        r#"<h1>About {SITE_NAME}</h1>
<p>{SITE_NAME} publishes match predictions written by analysts who follow the leagues every week.
Every tip comes with the odds we saw, how confident we are, and once the match is played, whether it won.</p>
<p>Free tips are open to everyone. Premium tips and full analysis are available to subscribers.</p>"#
    );
    page("About", viewer.0.as_ref(), &body)
}

/// GET /pricing
pub async fn pricing(viewer: MaybeUser) -> Html<String> {
    let plans: String = PLANS
        .iter()
        .map(|(plan, cents, description)| {
            let price = if *cents == 0 {
                "Free".to_string()
            } else {
                format_amount(*cents, "USD")
            };
            format!(
                r#"<article class="plan"><h2>{}</h2><p class="price">{}</p><p>{}</p></article>"#,
                escape(plan),
                escape(&price),
                escape(description)
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Pricing</h1>
<div class="plans">{plans}</div>
<p>Payments are confirmed by our team; your premium access starts as soon as the payment is recorded.</p>"#
    );
    page("Pricing", viewer.0.as_ref(), &body)
}

/// GET /privacy
pub async fn privacy(viewer: MaybeUser) -> Html<String> {
    let body = format!(
        r#"<h1>Privacy policy</h1>
<p>{SITE_NAME} stores your username, email address, a hash of your password and, when you sign in,
an approximate location derived from your IP address.</p>
<p>We record which posts are viewed, liked, saved and shared to show engagement counts.
Session cookies are used only to keep you signed in.</p>
<p>You can ask us to delete your account at any time; deleting it removes your comments and reactions.
Payment records are kept for accounting but no longer linked to you.</p>"#
    );
    page("Privacy", viewer.0.as_ref(), &body)
}

/// GET /terms
pub async fn terms(viewer: MaybeUser) -> Html<String> {
    let body = r#"<h1>Terms of service</h1>
<p>Predictions are opinions for entertainment and information. They are not financial advice and
no outcome is guaranteed.</p>
<p>You must be of legal betting age in your country to act on any tip. Subscriptions unlock premium
content for the period paid for and may be refunded at our discretion.</p>
<p>Comments must be respectful; we remove comments that are abusive or spam.</p>"#;
    page("Terms", viewer.0.as_ref(), body)
}

/// Fallback for unknown paths
pub async fn not_found(viewer: MaybeUser) -> Response {
    not_found_page(viewer.0.as_ref())
}

pub fn not_found_page(viewer: Option<&Claims>) -> Response {
    let body = r#"<h1>Page not found</h1>
<p>The page you were looking for does not exist or has moved.</p>
<p><a href="/">Back to the home page</a> or <a href="/blog">read the blog</a>.</p>"#;
    (StatusCode::NOT_FOUND, page("Not found", viewer, body)).into_response()
}
