//! Global template helpers exposed to page templates.
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;

use super::feed::{FeedBuilder, FeedFilter, FeedFormat};
use super::settings::CalendarSettings;
use super::templates::{CALENDAR_PAGE_TEMPLATE, load_template};
use crate::host::{GlobalHelper, SettingsService, TemplateService};

pub const CSS_HELPER: &str = "pb_calendar_css";
pub const SHOW_CALENDAR_HELPER: &str = "pb_show_calendar";
pub const EVENTS_LIST_HELPER: &str = "pb_calendar_events_list";
pub const EVENTS_LIST_SHORT_HELPER: &str = "pb_calendar_events_list_short";
pub const EVENTS_JSON_HELPER: &str = "pb_calendar_events";

struct CalendarCss {
    settings: SettingsService,
}

#[async_trait]
impl GlobalHelper for CalendarCss {
    async fn render(&self, _flag: &str) -> Result<String, Error> {
        Ok(CalendarSettings::load(&self.settings).await?.calendar_css)
    }
}

/// Hides the calendar widget when the list-only display is enabled.
struct ShowCalendar {
    settings: SettingsService,
}

#[async_trait]
impl GlobalHelper for ShowCalendar {
    async fn render(&self, _flag: &str) -> Result<String, Error> {
        let settings = CalendarSettings::load(&self.settings).await?;
        Ok(if settings.display_as_list {
            "display: none".to_string()
        } else {
            String::new()
        })
    }
}

struct EventFeed {
    feed: FeedBuilder,
    format: FeedFormat,
    filter: FeedFilter,
}

#[async_trait]
impl GlobalHelper for EventFeed {
    async fn render(&self, _flag: &str) -> Result<String, Error> {
        let body = self.feed.build(self.format, self.filter).await?;
        Ok(match self.format {
            // Inlined into a <script> element
            FeedFormat::Json => body.replace("</", "<\\/"),
            FeedFormat::Html | FeedFormat::HtmlShort => body,
        })
    }
}

pub fn register_helpers(
    templates: &mut TemplateService,
    settings: &SettingsService,
    feed: &FeedBuilder,
) {
    templates.register_global(
        CSS_HELPER,
        Arc::new(CalendarCss {
            settings: settings.clone(),
        }),
    );
    templates.register_global(
        SHOW_CALENDAR_HELPER,
        Arc::new(ShowCalendar {
            settings: settings.clone(),
        }),
    );

    let feeds = [
        (EVENTS_LIST_HELPER, FeedFormat::Html, FeedFilter::Upcoming),
        (EVENTS_LIST_SHORT_HELPER, FeedFormat::HtmlShort, FeedFilter::Upcoming),
        (EVENTS_JSON_HELPER, FeedFormat::Json, FeedFilter::All),
    ];
    for (name, format, filter) in feeds {
        templates.register_global(
            name,
            Arc::new(EventFeed {
                feed: feed.clone(),
                format,
                filter,
            }),
        );
    }
}

/// Render the calendar page, which pulls its content from the helpers
/// registered above.
pub async fn render_calendar_page(templates: &TemplateService) -> Result<String, Error> {
    let page = load_template(templates.loader(), CALENDAR_PAGE_TEMPLATE).await?;
    Ok(templates.render(&page, &HashMap::new()).await)
}
