//! iCalendar export for a single event.
use anyhow::{Error, Result};
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

use super::models::{Event, Venue};
use super::schema::EVENT_TYPE;
use super::substitute::{ICS_TOKENS, Substitution};
use super::templates::ICS_TEMPLATE;
use super::venue::resolve_venue;
use super::zulu::zulu_timestamp;
use crate::host::store::TYPE_KEY;
use crate::host::{Collection, ObjectStore, TemplateLoader};

pub const ICS_CONTENT_TYPE: &str = "application/octet-stream";
pub const ICS_FILE_NAME: &str = "event.ics";

#[derive(Debug)]
pub struct IcsFile {
    pub body: String,
    pub content_type: &'static str,
    pub filename: &'static str,
}

/// Escape a value for use in an iCalendar TEXT property of a
/// user supplied template.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the ICS file for `event_id`. Returns `None` when no event
/// with that id exists.
pub async fn export_event(
    store: &dyn ObjectStore,
    loader: &TemplateLoader,
    site_ip: &str,
    event_id: &str,
) -> Result<Option<IcsFile>, Error> {
    let Some(event_type) = store.load_type_by_name(EVENT_TYPE).await? else {
        return Ok(None);
    };
    let Some(record) = store.load_by_id(event_id, Collection::CustomObject).await? else {
        return Ok(None);
    };
    if record.get(TYPE_KEY).and_then(|t| t.as_str()) != Some(event_type.id.as_str()) {
        tracing::debug!("Object {} is not an event", event_id);
        return Ok(None);
    }

    let event = Event::from_record(record)?;
    let venue = resolve_venue(store, event.venue.as_deref()).await;

    let body = match loader.load(ICS_TEMPLATE).await? {
        Some(template) => render_template(&template, &event, &venue, site_ip),
        None => render_calendar(&event, &venue, site_ip),
    };

    Ok(Some(IcsFile {
        body,
        content_type: ICS_CONTENT_TYPE,
        filename: ICS_FILE_NAME,
    }))
}

/// Build the calendar with `icalendar`, which takes care of escaping
/// and line folding.
fn render_calendar(event: &Event, venue: &Venue, site_ip: &str) -> String {
    let ics_event = IcalEvent::new()
        .uid(&format!("{}@{}", event.id, site_ip))
        .summary(&event.name)
        .description(&event.description)
        .location(&venue.address)
        .add_property("DTSTART", zulu_timestamp(&event.start_date))
        .add_property("DTEND", zulu_timestamp(&event.end_date))
        .done();

    let mut calendar = Calendar::new();
    calendar.push(ics_event);
    calendar.done().to_string()
}

/// Fill an `elements/event/ical` template from the templates directory.
fn render_template(template: &str, event: &Event, venue: &Venue, site_ip: &str) -> String {
    let mut sub = Substitution::with_tokens(ICS_TOKENS);
    sub.set("event_id", event.id.as_str())
        .set("event_name", escape_text(&event.name))
        .set("event_description", escape_text(&event.description))
        .set("venue_address", escape_text(&venue.address))
        .set("site_com", site_ip)
        .set("event_start_zulu", zulu_timestamp(&event.start_date))
        .set("event_end_zulu", zulu_timestamp(&event.end_date));
    sub.apply(template)
}
