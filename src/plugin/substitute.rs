//! Fills caret delimited templates with event and venue values.
use std::collections::BTreeMap;

use crate::host::templates::replace_tokens;

/// Tokens available to the HTML event fragments.
pub const EVENT_TOKENS: &[&str] = &[
    "event_id",
    "event_name",
    "event_url",
    "event_description",
    "event_date",
    "venue_name",
    "venue_address",
    "venue_url",
    "event_start_zulu",
    "event_end_zulu",
    "event_topics",
];

/// Tokens available to the iCalendar template.
pub const ICS_TOKENS: &[&str] = &[
    "event_id",
    "event_name",
    "event_description",
    "venue_address",
    "site_com",
    "event_start_zulu",
    "event_end_zulu",
];

/// A fixed set of named values substituted into a template. Every
/// declared token is replaced, with an empty string when no value
/// was set. Tokens outside the declared set are left untouched.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    values: BTreeMap<String, String>,
}

impl Substitution {
    pub fn with_tokens(tokens: &[&str]) -> Self {
        Self {
            values: tokens
                .iter()
                .map(|token| (token.to_string(), String::new()))
                .collect(),
        }
    }

    pub fn set(&mut self, token: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(token.to_string(), value.into());
        self
    }

    pub fn apply(&self, template: &str) -> String {
        replace_tokens(template, |name| self.values.get(name).cloned())
    }
}
