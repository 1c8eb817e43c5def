//! Router for event downloads

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use http::{StatusCode, header};

use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::plugin::ics::export_event;

type SharedState = Arc<AppState>;

// Download a single event as an iCalendar file
async fn event_ics(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let file = export_event(
        state.host.store.as_ref(),
        state.host.templates.loader(),
        &state.config.site_ip,
        &id,
    )
    .await?;

    let Some(file) = file else {
        tracing::debug!("No event found for {}", id);
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response())
}

/// Create the events router
pub fn router() -> Router<SharedState> {
    Router::new().route("/{id}/event.ics", get(event_ics))
}
