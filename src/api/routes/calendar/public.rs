//! Public types for the calendar API
use serde::{Deserialize, Serialize};

pub use crate::host::NavItem;
pub use crate::plugin::feed::{CalendarEntry, FeedFilter, FeedFormat};
pub use crate::plugin::settings::CalendarSettings;

#[derive(Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub format: FeedFormat,
    #[serde(default)]
    pub filter: FeedFilter,
}

#[derive(Serialize, Deserialize)]
pub struct InstallResponse {
    pub success: bool,
}
