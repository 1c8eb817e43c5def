//! API routes module

pub mod calendar;
mod events;
mod pages;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Calendar feed, settings and install routes
        .nest("/calendar", calendar::router())
}

/// Routes served outside of `/api`
pub fn site_router() -> Router<SharedState> {
    Router::new()
        // iCalendar downloads
        .nest("/events", events::router())
        // Rendered pages
        .merge(pages::router())
}
