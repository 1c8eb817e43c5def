//! Built-in templates. A file with the same name under the configured
//! templates directory overrides any of these.
use anyhow::{Error, Result, anyhow};

use crate::host::TemplateLoader;

pub const EVENT_TEMPLATE: &str = "elements/event";
pub const EVENT_SHORT_TEMPLATE: &str = "elements/event_short";
/// Optional override for the iCalendar body. There is no built-in
/// version; without a file the calendar is generated directly.
pub const ICS_TEMPLATE: &str = "elements/event/ical";
pub const CALENDAR_PAGE_TEMPLATE: &str = "calendar";

const EVENT: &str = r#"<div class="calendar-event" id="event_^event_id^">
  <h3 class="calendar-event-name"><a href="^event_url^">^event_name^</a></h3>
  <div class="calendar-event-date">^event_date^</div>
  <div class="calendar-event-venue">
    <a href="^venue_url^">^venue_name^</a>
    <address>^venue_address^</address>
  </div>
  <div class="calendar-event-description">^event_description^</div>
  <div class="calendar-event-topics">^event_topics^</div>
  <div class="calendar-event-links">
    <a href="/events/^event_id^/event.ics">iCal</a>
    <a href="https://www.google.com/calendar/render?action=TEMPLATE&amp;text=^event_name^&amp;dates=^event_start_zulu^/^event_end_zulu^&amp;location=^venue_address^" target="_blank">Google Calendar</a>
  </div>
</div>
"#;

const EVENT_SHORT: &str = r#"<li class="calendar-event-short" id="event_^event_id^">
  <a href="^event_url^">^event_name^</a>
  <span class="calendar-event-date">^event_date^</span>
  <span class="calendar-event-venue">^venue_name^</span>
</li>
"#;

const CALENDAR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Events</title>
  <style>^pb_calendar_css^</style>
</head>
<body>
  <div id="calendar" style="^pb_show_calendar^"></div>
  <div class="calendar-events">^pb_calendar_events_list^</div>
  <script>var calendarEvents = ^pb_calendar_events^;</script>
</body>
</html>
"#;

fn builtin(name: &str) -> Option<&'static str> {
    match name.trim_start_matches('/') {
        EVENT_TEMPLATE => Some(EVENT),
        EVENT_SHORT_TEMPLATE => Some(EVENT_SHORT),
        CALENDAR_PAGE_TEMPLATE => Some(CALENDAR_PAGE),
        _ => None,
    }
}

pub async fn load_template(loader: &TemplateLoader, name: &str) -> Result<String, Error> {
    if let Some(body) = loader.load(name).await? {
        return Ok(body);
    }
    builtin(name)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Template not found: {}", name))
}
