use chrono::{DateTime, TimeZone, Utc};

/// Format a date as the compact UTC timestamp used by iCalendar,
/// e.g. `20150302T090500Z`. Seconds are always written as `00`.
pub fn zulu_timestamp<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Utc).format("%Y%m%dT%H%M00Z").to_string()
}
