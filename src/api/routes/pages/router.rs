//! Router for rendered pages

use std::sync::Arc;

use axum::{Router, extract::State, response::Html, routing::get};

use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::plugin::helpers::render_calendar_page;

type SharedState = Arc<AppState>;

async fn calendar_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let page = render_calendar_page(&state.host.templates).await?;
    Ok(Html(page))
}

/// Create the pages router
pub fn router() -> Router<SharedState> {
    Router::new().route("/calendar", get(calendar_page))
}
