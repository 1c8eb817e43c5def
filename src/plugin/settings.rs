use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PLUGIN_UID;
use crate::host::SettingsService;

const CALENDAR_CSS: &str = "calendar_css";
const DISPLAY_AS_LIST: &str = "display_as_list";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// Extra CSS injected into the calendar page
    #[serde(default)]
    pub calendar_css: String,
    /// Hide the calendar widget and only show the event list
    #[serde(default)]
    pub display_as_list: bool,
}

impl CalendarSettings {
    pub async fn load(settings: &SettingsService) -> Result<Self, Error> {
        let calendar_css = settings
            .get_setting(PLUGIN_UID, CALENDAR_CSS)
            .await?
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let display_as_list = settings
            .get_setting(PLUGIN_UID, DISPLAY_AS_LIST)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or_default();

        Ok(Self {
            calendar_css,
            display_as_list,
        })
    }

    pub async fn save(&self, settings: &SettingsService) -> Result<(), Error> {
        settings
            .set_setting(
                PLUGIN_UID,
                CALENDAR_CSS,
                &Value::String(self.calendar_css.clone()),
            )
            .await?;
        settings
            .set_setting(
                PLUGIN_UID,
                DISPLAY_AS_LIST,
                &Value::Bool(self.display_as_list),
            )
            .await?;
        Ok(())
    }
}
