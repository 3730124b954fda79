//! Dashboard page
//!
//! Every signed-in user sees their account, saved posts and payments.
//! Admins also get the stats panel and the management forms and tables,
//! all of which talk to the JSON API through `app.js`.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::backend::auth::sessions::Claims;
use crate::backend::auth::users::{get_user_by_id, list_users};
use crate::backend::blog::db::{list_posts, list_saved_posts};
use crate::backend::dashboard::{load_stats, DashboardStats};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::MaybeUser;
use crate::backend::pages::error_page;
use crate::backend::pages::forms::render_form;
use crate::backend::pages::layout::{escape, page};
use crate::backend::payments::db::list_payments;
use crate::backend::predictions::db::list_predictions;
use crate::backend::server::state::AppState;
use crate::shared::forms::{BLOG_POST, CHANGE_PASSWORD, PAYMENT, PREDICTION};
use crate::shared::models::payment::format_amount;
use crate::shared::{ListQuery, Payment, PredictionOutcome, PublicUser};

const ADMIN_TABLE_ROWS: u32 = 20;

/// GET /dashboard
pub async fn dashboard(State(state): State<AppState>, viewer: MaybeUser) -> Response {
    let Some(claims) = viewer.0 else {
        return Redirect::to("/sign-in").into_response();
    };

    match render(&state, &claims).await {
        Ok(html) => html.into_response(),
        Err(err) => error_page(Some(&claims), &err),
    }
}

async fn render(state: &AppState, claims: &Claims) -> BackendResult<Html<String>> {
    let pool = state.db()?;
    let user_id = claims.user_id()?;
    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User no longer exists"))?
        .to_public();

    let saved = list_saved_posts(pool, user_id).await?;
    let (payments, _) = list_payments(pool, Some(user_id), &ListQuery::default()).await?;

    let saved_list: String = if saved.is_empty() {
        "<p>You have not saved any posts yet.</p>".to_string()
    } else {
        let items: String = saved
            .iter()
            .map(|p| format!(r#"<li><a href="/blog/{}">{}</a></li>"#, escape(&p.slug), escape(&p.title)))
            .collect();
        format!("<ul>{}</ul>", items)
    };

    let mut body = format!(
        r#"<h1>Dashboard</h1>
{account}
<section class="panel">
    <h2>Saved posts</h2>
    {saved_list}
</section>
<section class="panel">
    <h2>Your payments</h2>
    {payments}
</section>
<section class="panel">
{change_password}
</section>"#,
        account = account_panel(&user),
        payments = payments_table(&payments, false),
        change_password = render_form(&CHANGE_PASSWORD),
    );

    if user.role.is_admin() {
        let stats = load_stats(pool).await?;
        let query = ListQuery::new(Some(1), Some(ADMIN_TABLE_ROWS));
        let (users, _) = list_users(pool, &query).await?;
        let users: Vec<PublicUser> = users.into_iter().map(PublicUser::from).collect();
        let (posts, _) = list_posts(pool, None, true, &query).await?;
        let (predictions, _) = list_predictions(pool, None, None, &query).await?;
        let (all_payments, _) = list_payments(pool, None, &query).await?;

        let post_rows: String = posts
            .iter()
            .map(|p| {
                format!(
                    r#"<tr><td><a href="/blog/{slug}">{title}</a></td><td>{state}</td><td>{delete}</td></tr>"#,
                    slug = escape(&p.slug),
                    title = escape(&p.title),
                    state = if p.published { "published" } else { "draft" },
                    delete = delete_button(&format!("/api/posts/{}", p.id)),
                )
            })
            .collect();

        let prediction_rows: String = predictions
            .iter()
            .map(|p| {
                let settle: String = [PredictionOutcome::Won, PredictionOutcome::Lost, PredictionOutcome::Void]
                    .iter()
                    .map(|o| {
                        format!(
                            r#"<button type="button" data-action="request" data-method="PUT" data-url="/api/predictions/{}" data-body='{{"outcome":"{}"}}'>{}</button>"#,
                            p.id, o, o
                        )
                    })
                    .collect();
                format!(
                    r#"<tr><td>{} vs {}</td><td>{}</td><td>{}</td><td>{} {}</td></tr>"#,
                    escape(&p.home_team),
                    escape(&p.away_team),
                    p.kickoff_at.format("%d %b %H:%M"),
                    p.outcome,
                    settle,
                    delete_button(&format!("/api/predictions/{}", p.id)),
                )
            })
            .collect();

        body.push_str(&format!(
            r#"
{stats}
<section class="panel admin">
    <h2>Users</h2>
    {users}
</section>
<section class="panel admin">
    <h2>Posts</h2>
    <table><thead><tr><th>Title</th><th>State</th><th></th></tr></thead><tbody>{post_rows}</tbody></table>
    {post_form}
</section>
<section class="panel admin">
    <h2>Predictions</h2>
    <table><thead><tr><th>Match</th><th>Kick-off</th><th>Outcome</th><th></th></tr></thead><tbody>{prediction_rows}</tbody></table>
    {prediction_form}
</section>
<section class="panel admin">
    <h2>Payments</h2>
    {payments}
    {payment_form}
</section>"#,
            stats = stats_panel(&stats),
            users = users_table(&users, user.id),
            post_form = render_form(&BLOG_POST),
            prediction_form = render_form(&PREDICTION),
            payments = payments_table(&all_payments, true),
            payment_form = render_form(&PAYMENT),
        ));
    }

    Ok(page("Dashboard", Some(claims), &body))
}

fn delete_button(url: &str) -> String {
    format!(
        r#"<button type="button" class="danger" data-action="request" data-method="DELETE" data-url="{}" data-confirm="Delete this record?">Delete</button>"#,
        escape(url)
    )
}

fn account_panel(user: &PublicUser) -> String {
    let verification = if user.is_verified {
        "<p>Your email address is verified.</p>".to_string()
    } else {
        r#"<p class="notice">Your email address is not verified yet.
    <button type="button" data-action="request" data-method="POST" data-url="/api/auth/resend-verification">Resend verification email</button></p>"#
            .to_string()
    };
    let subscription = match user.subscription_status.as_deref() {
        Some(status) => escape(status),
        None => "free".to_string(),
    };
    format!(
        r#"<section class="panel account">
    <h2>{username}</h2>
    <dl>
        <dt>Email</dt><dd>{email}</dd>
        <dt>Role</dt><dd>{role}</dd>
        <dt>Subscription</dt><dd>{subscription}</dd>
        <dt>Last sign-in location</dt><dd>{location}</dd>
    </dl>
    {verification}
</section>"#,
        username = escape(&user.username),
        email = escape(&user.email),
        role = user.role,
        location = escape(user.location.as_deref().unwrap_or("unknown")),
    )
}

pub fn stats_panel(stats: &DashboardStats) -> String {
    let win_rate = stats
        .win_rate()
        .map(|rate| format!("{:.1}%", rate))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        r#"<section class="panel stats">
    <h2>Site statistics</h2>
    <ul>
        <li>Users: {} ({} verified, {} subscribed)</li>
        <li>Posts: {} ({} published)</li>
        <li>Predictions: {} ({} pending, {} won, {} lost, {} void)</li>
        <li>Win rate: {}</li>
        <li>Revenue: {}</li>
    </ul>
</section>"#,
        stats.users,
        stats.verified_users,
        stats.active_subscriptions,
        stats.posts,
        stats.published_posts,
        stats.predictions,
        stats.predictions_pending,
        stats.predictions_won,
        stats.predictions_lost,
        stats.predictions_void,
        win_rate,
        format_amount(stats.revenue_cents, "USD"),
    )
}

fn users_table(users: &[PublicUser], current_admin: uuid::Uuid) -> String {
    let rows: String = users
        .iter()
        .map(|u| {
            let delete = if u.id == current_admin {
                String::new()
            } else {
                delete_button(&format!("/api/users/{}", u.id))
            };
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><code>{}</code></td><td>{}</td></tr>"#,
                escape(&u.username),
                escape(&u.email),
                u.role,
                if u.is_verified { "yes" } else { "no" },
                escape(u.subscription_status.as_deref().unwrap_or("free")),
                u.id,
                delete
            )
        })
        .collect();
    format!(
        r#"<table><thead><tr><th>Username</th><th>Email</th><th>Role</th><th>Verified</th><th>Subscription</th><th>ID</th><th></th></tr></thead><tbody>{}</tbody></table>"#,
        rows
    )
}

fn payments_table(payments: &[Payment], admin: bool) -> String {
    if payments.is_empty() {
        return "<p>No payments recorded.</p>".to_string();
    }
    let rows: String = payments
        .iter()
        .map(|p| {
            let refund = if admin && p.status == crate::shared::PaymentStatus::Succeeded {
                format!(
                    r#"<button type="button" data-action="request" data-method="PUT" data-url="/api/payments/{}" data-body='{{"status":"refunded"}}'>Refund</button>"#,
                    p.id
                )
            } else {
                String::new()
            };
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                p.created_at.format("%d %b %Y"),
                escape(&p.plan),
                format_amount(p.amount_cents, &p.currency),
                p.status,
                escape(&p.reference),
                refund
            )
        })
        .collect();
    format!(
        r#"<table><thead><tr><th>Date</th><th>Plan</th><th>Amount</th><th>Status</th><th>Reference</th><th></th></tr></thead><tbody>{}</tbody></table>"#,
        rows
    )
}
