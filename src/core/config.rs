use std::env;

use chrono::{FixedOffset, Local, Offset, Utc};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    pub templates_path: String,
    // Written verbatim into exported ICS files
    pub site_ip: String,
    // chrono format string used for the human readable event date
    pub date_format: String,
    pub utc_offset_minutes: i32,
}

impl AppConfig {
    /// The local timezone adjustment applied to rendered dates and
    /// the JSON feed. Falls back to UTC if the configured offset is
    /// out of range.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "UTC offset of {} minutes is out of range, using UTC",
                    self.utc_offset_minutes
                );
                Utc.fix()
            })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("CALENDAR_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path);
        let templates_path = env::var("CALENDAR_TEMPLATES_PATH")
            .unwrap_or_else(|_| format!("{}/templates", storage_path));
        let site_ip =
            env::var("CALENDAR_SITE_IP").unwrap_or_else(|_| "http://localhost:2222".to_string());
        let date_format =
            env::var("CALENDAR_DATE_FORMAT").unwrap_or_else(|_| "%B %-d, %Y %-I:%M %p".to_string());
        let utc_offset_minutes = env::var("CALENDAR_UTC_OFFSET_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or_else(|| Local::now().offset().fix().local_minus_utc() / 60);

        Self {
            storage_path,
            db_path,
            templates_path,
            site_ip,
            date_format,
            utc_offset_minutes,
        }
    }
}
