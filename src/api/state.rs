use crate::core::AppConfig;
use crate::host::Host;
use crate::plugin::CalendarPlugin;

pub struct AppState {
    pub host: Host,
    pub plugin: CalendarPlugin,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(host: Host, plugin: CalendarPlugin, config: AppConfig) -> Self {
        Self {
            host,
            plugin,
            config,
        }
    }
}
