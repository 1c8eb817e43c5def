//! Event feed rendering. Builds either an HTML list of event fragments
//! or a JSON array consumed by the calendar widget.
use std::sync::Arc;

use anyhow::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::models::Event;
use super::schema::EVENT_TYPE;
use super::substitute::{EVENT_TOKENS, Substitution};
use super::templates::{EVENT_SHORT_TEMPLATE, EVENT_TEMPLATE, load_template};
use super::topic::{TopicMarkup, resolve_topics};
use super::venue::resolve_venue;
use super::zulu::zulu_timestamp;
use crate::host::store::{Filter, Sort};
use crate::host::templates::tokens;
use crate::host::{Collection, ObjectStore, TemplateLoader};

const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y %-I:%M %p";
const TOPICS_TOKEN: &str = "event_topics";
const TOPIC_SEPARATOR: &str = ", ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedFormat {
    #[default]
    Html,
    HtmlShort,
    Json,
}

impl FeedFormat {
    /// What to render when there is nothing to render.
    pub fn empty(&self) -> &'static str {
        match self {
            FeedFormat::Html | FeedFormat::HtmlShort => "",
            FeedFormat::Json => "[]",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedFilter {
    /// Only events that haven't ended yet
    #[default]
    Upcoming,
    All,
}

/// An event as consumed by the calendar widget. Times are epoch
/// milliseconds shifted by the configured local offset.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub title: String,
    pub start: i64,
    pub end: i64,
    pub url: Option<String>,
    pub topics: Vec<String>,
}

#[derive(Clone)]
pub struct FeedBuilder {
    store: Arc<dyn ObjectStore>,
    loader: TemplateLoader,
    date_format: String,
    offset: FixedOffset,
}

impl FeedBuilder {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        loader: TemplateLoader,
        date_format: &str,
        offset: FixedOffset,
    ) -> Self {
        let valid = !StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error));
        let date_format = if valid {
            date_format.to_string()
        } else {
            tracing::warn!(
                "Invalid date format {:?}, using {:?}",
                date_format,
                DEFAULT_DATE_FORMAT
            );
            DEFAULT_DATE_FORMAT.to_string()
        };

        Self {
            store,
            loader,
            date_format,
            offset,
        }
    }

    pub async fn build(&self, format: FeedFormat, filter: FeedFilter) -> Result<String, Error> {
        self.build_at(format, filter, Utc::now()).await
    }

    /// Render the feed as of `now`. Renders an empty feed when the
    /// event type hasn't been installed yet.
    pub async fn build_at(
        &self,
        format: FeedFormat,
        filter: FeedFilter,
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        let Some(event_type) = self.store.load_type_by_name(EVENT_TYPE).await? else {
            tracing::debug!("Event type is not installed, rendering empty feed");
            return Ok(format.empty().to_string());
        };

        let events = self.load_events(&event_type.id, filter, now).await?;
        tracing::debug!("Rendering {} events as {:?}", events.len(), format);

        match format {
            FeedFormat::Html => self.render_html(EVENT_TEMPLATE, &events).await,
            FeedFormat::HtmlShort => self.render_html(EVENT_SHORT_TEMPLATE, &events).await,
            FeedFormat::Json => self.render_json(&events, now).await,
        }
    }

    /// Events sorted by start date. Records that aren't valid events
    /// are skipped.
    async fn load_events(
        &self,
        type_id: &str,
        filter: FeedFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>, Error> {
        let query = match filter {
            FeedFilter::Upcoming => Filter::of_type(type_id).on_or_after("end_date", now),
            FeedFilter::All => Filter::of_type(type_id),
        };
        let records = self
            .store
            .query(Collection::CustomObject, query, Some(Sort::asc("start_date")))
            .await?;

        let mut events: Vec<Event> = records
            .into_iter()
            .filter_map(|record| {
                Event::from_record(record)
                    .inspect_err(|err| tracing::warn!("Skipping malformed event: {}", err))
                    .ok()
            })
            .collect();

        // Storage order is only a hint, dates may carry different offsets
        events.sort_by_key(|event| event.start_date);
        Ok(events)
    }

    async fn render_html(&self, template_name: &str, events: &[Event]) -> Result<String, Error> {
        let template = load_template(&self.loader, template_name).await?;
        let with_topics = tokens(&template).iter().any(|t| t == TOPICS_TOKEN);

        let fragments = join_all(
            events
                .iter()
                .map(|event| self.render_event(&template, event, with_topics)),
        )
        .await;

        Ok(fragments.concat())
    }

    async fn render_event(&self, template: &str, event: &Event, with_topics: bool) -> String {
        let store = self.store.as_ref();
        let venue = resolve_venue(store, event.venue.as_deref()).await;
        let topics = if with_topics {
            resolve_topics(store, &event.topics, TopicMarkup::Anchor)
                .await
                .join(TOPIC_SEPARATOR)
        } else {
            String::new()
        };

        let mut sub = Substitution::with_tokens(EVENT_TOKENS);
        sub.set("event_id", event.id.as_str())
            .set("event_name", event.name.as_str())
            .set("event_url", event.url.as_str())
            .set("event_description", event.description.as_str())
            .set("event_date", self.date_text(&event.start_date))
            .set("venue_name", venue.name)
            .set("venue_address", venue.address)
            .set("venue_url", venue.url)
            .set("event_start_zulu", zulu_timestamp(&event.start_date))
            .set("event_end_zulu", zulu_timestamp(&event.end_date))
            .set(TOPICS_TOKEN, topics);
        sub.apply(template)
    }

    async fn render_json(&self, events: &[Event], now: DateTime<Utc>) -> Result<String, Error> {
        let store = self.store.as_ref();
        let topics = join_all(
            events
                .iter()
                .map(|event| resolve_topics(store, &event.topics, TopicMarkup::Name)),
        )
        .await;

        let entries: Vec<CalendarEntry> = events
            .iter()
            .zip(topics)
            .map(|(event, topics)| CalendarEntry {
                title: event.name.clone(),
                start: self.local_millis(&event.start_date),
                end: self.local_millis(&event.end_date),
                url: (!event.has_ended(now)).then(|| scroll_to_event_url(&event.id)),
                topics,
            })
            .collect();

        Ok(serde_json::to_string(&entries)?)
    }

    fn date_text(&self, date: &DateTime<Utc>) -> String {
        date.with_timezone(&self.offset)
            .format(&self.date_format)
            .to_string()
    }

    fn local_millis(&self, date: &DateTime<Utc>) -> i64 {
        date.timestamp_millis() + i64::from(self.offset.local_minus_utc()) * 1000
    }
}

/// Link that scrolls the page to the event's fragment in the list.
pub fn scroll_to_event_url(event_id: &str) -> String {
    format!(
        r##"javascript:$("#event_{}")[0].scrollIntoView(true)"##,
        event_id
    )
}
