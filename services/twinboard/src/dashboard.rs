//! Web dashboard: server-rendered admin pages, form actions and a JSON API

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::edit::{EditField, EditPhase, SaveOutcome};
use crate::format::{escape_html, optional_field, reading};
use crate::page::{PageHandle, PageKind, PageSnapshot};
use crate::routes::{landing_href, ADMIN_ROUTES};
use crate::state::{AppState, SettingsView};
use crate::summary::SummarySnapshot;

type HandlerError = (StatusCode, String);

/// Build the dashboard axum router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/admin/dashboard", get(summary_handler))
        .route("/admin/dashboard/refresh", post(summary_handler))
        .route("/admin/settings", get(settings_handler))
        .route("/admin/{page}", get(page_handler))
        .route("/admin/{page}/refresh", post(page_handler))
        .route("/admin/{page}/edit", post(edit_open_action))
        .route("/admin/{page}/save", post(edit_save_action))
        .route("/admin/{page}/cancel", post(edit_cancel_action))
        .route("/api/routes", get(api_routes))
        .route("/api/dashboard", get(api_summary))
        .route("/api/settings", get(api_settings))
        .route("/api/pages/{page}", get(api_page))
        .route("/api/pages/{page}/refresh", post(api_page))
        .route("/api/pages/{page}/edit", post(api_edit_open))
        .route("/api/pages/{page}/edit/input", post(api_edit_input))
        .route("/api/pages/{page}/edit/save", post(api_edit_save))
        .route("/api/pages/{page}/edit/cancel", post(api_edit_cancel))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn page_kind(slug: &str) -> Result<PageKind, HandlerError> {
    PageKind::from_slug(slug)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown page '{}'", slug)))
}

async fn root_handler() -> impl IntoResponse {
    Redirect::to(&landing_href())
}

async fn summary_handler(State(app): State<AppState>) -> impl IntoResponse {
    if let Err(e) = app.summary.refresh().await {
        tracing::error!("Dashboard count query failed: {}", e);
    }
    Html(render_summary(&app.summary.snapshot()))
}

async fn settings_handler(State(app): State<AppState>) -> impl IntoResponse {
    Html(render_settings(&app.settings))
}

/// Mounting a list page (GET) or pressing refresh (POST) reloads it
async fn page_handler(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    page.refresh().await;
    Ok(Html(render_page(&page.snapshot().await)))
}

#[derive(Debug, Deserialize)]
pub struct OpenEditRequest {
    pub twin_id: String,
}

async fn edit_open_action(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<OpenEditRequest>,
) -> Result<Html<String>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    if !page.open_edit(&form.twin_id).await {
        return Err(open_refused(page, &form.twin_id).await);
    }
    Ok(Html(render_page(&page.snapshot().await)))
}

/// Why an open was refused: a save still in flight, or a twin not on the list
async fn open_refused(page: &PageHandle, twin_id: &str) -> HandlerError {
    if page.snapshot().await.edit.phase == EditPhase::Saving {
        (
            StatusCode::CONFLICT,
            "A save is in flight; try again when it settles".to_string(),
        )
    } else {
        (StatusCode::NOT_FOUND, format!("Unknown twin '{}'", twin_id))
    }
}

async fn edit_save_action(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    for field in EditField::ALL {
        if let Some(value) = form.get(field.form_name()) {
            page.apply_input(field, value).await;
        }
    }
    page.save_edit().await;
    Ok(Html(render_page(&page.snapshot().await)))
}

async fn edit_cancel_action(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    page.cancel_edit().await;
    Ok(Html(render_page(&page.snapshot().await)))
}

async fn api_routes() -> impl IntoResponse {
    Json(ADMIN_ROUTES.to_vec())
}

async fn api_summary(State(app): State<AppState>) -> Json<SummarySnapshot> {
    if let Err(e) = app.summary.refresh().await {
        tracing::error!("Dashboard count query failed: {}", e);
    }
    Json(app.summary.snapshot())
}

async fn api_settings(State(app): State<AppState>) -> Json<SettingsView> {
    Json(app.settings.as_ref().clone())
}

async fn api_page(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PageSnapshot>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    page.refresh().await;
    Ok(Json(page.snapshot().await))
}

async fn api_edit_open(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<OpenEditRequest>,
) -> Result<Json<PageSnapshot>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    if !page.open_edit(&request.twin_id).await {
        return Err(open_refused(page, &request.twin_id).await);
    }
    Ok(Json(page.snapshot().await))
}

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub field: String,
    pub value: String,
}

async fn api_edit_input(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<InputRequest>,
) -> Result<Json<PageSnapshot>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    let field: EditField = request
        .field
        .parse()
        .map_err(|e: crate::TwinboardError| (StatusCode::BAD_REQUEST, e.to_string()))?;
    page.apply_input(field, &request.value).await;
    Ok(Json(page.snapshot().await))
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub result: SaveOutcome,
    pub page: PageSnapshot,
}

async fn api_edit_save(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SaveResponse>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    let result = page.save_edit().await;
    Ok(Json(SaveResponse {
        result,
        page: page.snapshot().await,
    }))
}

async fn api_edit_cancel(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PageSnapshot>, HandlerError> {
    let page = app.page(page_kind(&slug)?);
    page.cancel_edit().await;
    Ok(Json(page.snapshot().await))
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}

// --- HTML rendering ---

/// Header gradient for a card color name
fn card_colors(color: Option<&str>) -> (&'static str, &'static str) {
    match color {
        Some("primary") => ("#ab47bc", "#8e24aa"),
        Some("info") => ("#26c6da", "#00acc1"),
        Some("success") => ("#66bb6a", "#43a047"),
        Some("warning") => ("#ffa726", "#fb8c00"),
        Some("danger") => ("#ef5350", "#e53935"),
        Some("rose") => ("#ec407a", "#d81b60"),
        _ => ("#9e9e9e", "#757575"),
    }
}

fn card_icon(color: Option<&str>, icon: Option<&str>) -> String {
    let (from, to) = card_colors(color);
    format!(
        r#"<div style="float: left; padding: 15px; margin-top: -20px; margin-right: 15px; border-radius: 3px; background: linear-gradient(60deg, {}, {}); color: #fff;">
                <i class="material-icons" style="font-size: 36px; line-height: 56px; width: 56px; text-align: center;">{}</i>
            </div>"#,
        from,
        to,
        escape_html(icon.unwrap_or_default())
    )
}

fn layout(title: &str, active_href: &str, content: &str) -> String {
    let nav: String = ADMIN_ROUTES
        .iter()
        .map(|route| {
            let href = route.href();
            let background = if href == active_href {
                "background-color: #9c27b0; color: #fff;"
            } else {
                "color: #3c4858;"
            };
            format!(
                r#"<li style="list-style: none; margin: 0.25rem 0;">
                    <a href="{href}" style="display: flex; align-items: center; gap: 0.75rem; padding: 0.6rem 1rem; border-radius: 3px; text-decoration: none; {background}">
                        <i class="material-icons">{icon}</i><span>{name}</span>
                    </a>
                </li>"#,
                href = href,
                background = background,
                icon = route.icon,
                name = route.name,
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - Twinboard</title>
    <link rel="stylesheet" href="https://fonts.googleapis.com/icon?family=Material+Icons">
</head>
<body style="font-family: 'Roboto', 'Helvetica', 'Arial', sans-serif; margin: 0; display: flex; background: #eee;">
    <nav style="width: 240px; min-height: 100vh; background: #fff; padding: 1rem; box-shadow: 0 0 10px rgba(0,0,0,0.2);">
        <h2 style="margin: 0 0 1rem 0; color: #3c4858;">Twinboard</h2>
        <ul style="padding: 0; margin: 0;">{nav}</ul>
    </nav>
    <main style="flex: 1; padding: 1.5rem;">{content}</main>
</body>
</html>"#,
        title = escape_html(title),
        nav = nav,
        content = content,
    )
}

fn card(header: &str, footer: &str) -> String {
    format!(
        r#"<div style="width: 320px; background: #fff; border-radius: 6px; margin: 1.5rem 1rem 0 0; padding: 0 15px; box-shadow: 0 1px 4px rgba(0,0,0,0.14);">
            <div style="overflow: hidden; padding-top: 10px; text-align: right;">{header}</div>
            <div style="display: flex; justify-content: space-between; align-items: center; border-top: 1px solid #eee; margin-top: 10px; padding: 10px 0; color: #999;">{footer}</div>
        </div>"#,
        header = header,
        footer = footer,
    )
}

pub fn render_summary(snapshot: &SummarySnapshot) -> String {
    let cards: String = snapshot
        .cards
        .iter()
        .map(|stat| {
            let header = format!(
                r#"{icon}
                <h1 style="color: #999; margin: 0; font-size: 24px; padding-top: 10px;">{title}</h1>
                <h3 style="color: #3C4858; margin: 0 0 3px 0; font-weight: normal; font-size: 40px;">{value}</h3>"#,
                icon = card_icon(Some(stat.color), Some(stat.icon)),
                title = stat.title,
                value = stat.value,
            );
            let footer = format!(r#"<span style="font-size: 13px;">{}</span>"#, stat.footer);
            card(&header, &footer)
        })
        .collect();

    let content = format!(
        r#"<div style="display: flex; align-items: center; gap: 1rem;">
            <h2>Dashboard</h2>
            <form method="post" action="/admin/dashboard/refresh">
                <button type="submit" aria-label="refresh list" style="border: none; background: none; cursor: pointer;"><i class="material-icons">refresh</i></button>
            </form>
        </div>
        <div style="display: flex; flex-wrap: wrap;">{cards}</div>"#,
        cards = cards,
    );

    layout("Dashboard", "/admin/dashboard", &content)
}

pub fn render_page(snapshot: &PageSnapshot) -> String {
    let slug = escape_html(&snapshot.slug);

    let cards: String = snapshot
        .twins
        .iter()
        .map(|card_data| {
            let twin = &card_data.twin;
            let header = format!(
                r#"{icon}
                <h1 style="color: #999; margin: 0; font-size: 24px; padding-top: 10px;">{name}</h1>
                <h3 style="color: #3C4858; margin: 0 0 3px 0; font-weight: normal;">{temperature} °F<br>{humidity}% Humidity</h3>"#,
                icon = card_icon(twin.display.color.as_deref(), twin.display.icon.as_deref()),
                name = escape_html(&twin.name),
                temperature = reading(twin.temperature),
                humidity = reading(twin.humidity),
            );
            let footer = format!(
                r#"<span style="font-size: 13px;">{updated}</span>
                <form method="post" action="/admin/{slug}/edit" style="margin: 0;">
                    <input type="hidden" name="twin_id" value="{id}">
                    <button type="submit" aria-label="edit twin" style="border: none; background: none; cursor: pointer;"><i class="material-icons">mode_edit</i></button>
                </form>"#,
                updated = escape_html(&card_data.last_updated_display),
                slug = slug,
                id = escape_html(&twin.name),
            );
            card(&header, &footer)
        })
        .collect();

    let modal = if snapshot.edit.phase == EditPhase::Closed {
        String::new()
    } else {
        render_modal(snapshot)
    };

    let content = format!(
        r#"<div style="display: flex; align-items: center; gap: 1rem;">
            <h2>{title}</h2>
            <form method="post" action="/admin/{slug}/refresh">
                <button type="submit" aria-label="refresh list" style="border: none; background: none; cursor: pointer;"><i class="material-icons">refresh</i></button>
            </form>
        </div>
        <div style="display: flex; flex-wrap: wrap;">{cards}</div>
        {modal}"#,
        title = escape_html(&snapshot.title),
        slug = slug,
        cards = cards,
        modal = modal,
    );

    layout(&snapshot.title, &format!("/admin/{}", snapshot.slug), &content)
}

fn render_modal(snapshot: &PageSnapshot) -> String {
    let fields = &snapshot.edit.fields;
    let input = |label: &str, field: EditField, value: &str| {
        let input_type = if field.is_numeric() { "number" } else { "text" };
        format!(
            r#"<div style="margin-bottom: 1rem;">
                <label for="{name}" style="display: block; margin-bottom: 0.25rem;">{label}</label>
                <input type="{input_type}" id="{name}" name="{name}" value="{value}" style="width: 100%; padding: 0.5rem; font-size: 1.1rem; box-sizing: border-box;">
            </div>"#,
            name = field.form_name(),
            label = label,
            input_type = input_type,
            value = escape_html(value),
        )
    };
    let saving = snapshot.edit.phase == EditPhase::Saving;

    format!(
        r#"<div style="position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center;">
            <div role="dialog" style="background: #fff; border-radius: 6px; width: 640px; max-width: 95vw; padding: 1.5rem;">
                <h3 style="margin-top: 0;">{title}</h3>
                <form method="post" action="/admin/{slug}/save" id="edit-form">
                    {name}{color}{icon}{order}
                </form>
                <div style="display: flex; justify-content: flex-end; gap: 0.5rem;">
                    <form method="post" action="/admin/{slug}/cancel" style="margin: 0;">
                        <button type="submit" style="background: #ff9800; color: #fff; border: none; padding: 0.5rem 1rem; border-radius: 3px;">Cancel</button>
                    </form>
                    <button type="submit" form="edit-form"{disabled} style="background: #9c27b0; color: #fff; border: none; padding: 0.5rem 1rem; border-radius: 3px;">Save Changes</button>
                </div>
            </div>
        </div>"#,
        title = escape_html(&fields.name),
        slug = escape_html(&snapshot.slug),
        name = input("Display Name", EditField::Name, &fields.name),
        color = input("Color", EditField::Color, &fields.color),
        icon = input("Icon", EditField::Icon, &fields.icon),
        order = input("Order", EditField::Order, &optional_field(Some(&fields.order))),
        disabled = if saving { " disabled" } else { "" },
    )
}

pub fn render_settings(settings: &SettingsView) -> String {
    let row = |label: &str, value: &str| {
        format!(
            r#"<tr style="border-bottom: 1px solid #dee2e6;">
                <th style="padding: 0.5rem; text-align: left;">{}</th>
                <td style="padding: 0.5rem;">{}</td>
            </tr>"#,
            label,
            escape_html(value)
        )
    };

    let rows = [
        row("Twin store", &settings.endpoint),
        row("API version", &settings.api_version),
        row(
            "Authentication",
            if settings.authenticated {
                "Bearer token"
            } else {
                "None"
            },
        ),
        row("Floor model", &settings.models.floor),
        row("Room model", &settings.models.room),
        row("Device model", &settings.models.device),
    ]
    .concat();

    let content = format!(
        r#"<h2>Settings</h2>
        <table style="width: 100%; border-collapse: collapse; background: #fff;">{rows}</table>"#,
        rows = rows,
    );

    layout("Settings", "/admin/settings", &content)
}
