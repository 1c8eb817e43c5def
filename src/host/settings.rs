//! Per plugin key/value settings stored as JSON.
use anyhow::{Error, Result};
use rusqlite::OptionalExtension;
use serde_json::Value;
use tokio_rusqlite::Connection;

#[derive(Clone)]
pub struct SettingsService {
    db: Connection,
}

impl SettingsService {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }

    pub async fn get_setting(&self, plugin: &str, key: &str) -> Result<Option<Value>, Error> {
        let (plugin, key) = (plugin.to_owned(), key.to_owned());
        let raw: Option<String> = self
            .db
            .call(move |conn| {
                let value = conn
                    .prepare("SELECT value FROM plugin_setting WHERE plugin = ? AND key = ?")?
                    .query_row([&plugin, &key], |row| row.get(0))
                    .optional()?;
                Ok(value)
            })
            .await?;

        raw.map(|v| serde_json::from_str(&v))
            .transpose()
            .map_err(|e| e.into())
    }

    pub async fn set_setting(&self, plugin: &str, key: &str, value: &Value) -> Result<(), Error> {
        let (plugin, key, value) = (plugin.to_owned(), key.to_owned(), value.to_string());
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO plugin_setting (plugin, key, value) VALUES (?, ?, ?)",
                    [&plugin, &key, &value],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}
