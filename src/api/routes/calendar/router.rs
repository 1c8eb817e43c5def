//! Router for the calendar API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::Query;
use http::header;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::host::Plugin;
use crate::plugin::PLUGIN_UID;

type SharedState = Arc<AppState>;

// Render the event feed directly
async fn feed(
    State(state): State<SharedState>,
    Query(params): Query<public::FeedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let builder = state.plugin.feed_builder(&state.host);
    let body = builder.build(params.format, params.filter).await?;
    let content_type = match params.format {
        public::FeedFormat::Json => "application/json",
        public::FeedFormat::Html | public::FeedFormat::HtmlShort => "text/html; charset=utf-8",
    };
    Ok(([(header::CONTENT_TYPE, content_type)], body))
}

async fn get_settings(
    State(state): State<SharedState>,
) -> Result<Json<public::CalendarSettings>, ApiError> {
    let settings = public::CalendarSettings::load(&state.host.settings).await?;
    Ok(Json(settings))
}

async fn update_settings(
    State(state): State<SharedState>,
    Json(settings): Json<public::CalendarSettings>,
) -> Result<Json<public::CalendarSettings>, ApiError> {
    settings.save(&state.host.settings).await?;
    tracing::debug!("Updated calendar settings: {:?}", settings);
    Ok(Json(settings))
}

// Admin navigation entries for the calendar's object types
async fn nav(State(state): State<SharedState>) -> Json<Vec<public::NavItem>> {
    Json(state.host.nav.items_for(PLUGIN_UID))
}

// Create the venue and event types if they don't exist yet
async fn install(
    State(state): State<SharedState>,
) -> Result<Json<public::InstallResponse>, ApiError> {
    state.plugin.on_install(&state.host).await?;
    Ok(Json(public::InstallResponse { success: true }))
}

/// Create the calendar router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/feed", get(feed))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/nav", get(nav))
        .route("/install", post(install))
}
