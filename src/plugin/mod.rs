//! Calendar plugin: venue and event schemas, event list and feed
//! rendering, and iCalendar export.
pub mod feed;
pub mod helpers;
pub mod ics;
pub mod lifecycle;
pub mod models;
pub mod schema;
pub mod settings;
pub mod substitute;
pub mod templates;
pub mod topic;
pub mod venue;
pub mod zulu;

#[cfg(test)]
mod testing;

pub use lifecycle::CalendarPlugin;

pub const PLUGIN_UID: &str = "calendar";
