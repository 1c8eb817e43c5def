//! Typed views over the venue, event and topic records.
use anyhow::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::host::Record;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_ref")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "lenient_refs")]
    pub topics: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Topic {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Venue {
    pub fn from_record(record: Record) -> Result<Self, Error> {
        Ok(serde_json::from_value(Value::Object(record))?)
    }
}

impl Event {
    pub fn from_record(record: Record) -> Result<Self, Error> {
        Ok(serde_json::from_value(Value::Object(record))?)
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_date < now
    }
}

impl Topic {
    pub fn from_record(record: Record) -> Result<Self, Error> {
        Ok(serde_json::from_value(Value::Object(record))?)
    }
}

// References are edited through the generic object UI so anything
// other than a string is treated as no reference at all.
fn lenient_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_refs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
