//! Plugin lifecycle. The host calls these hooks and hands each plugin
//! the services it may use instead of exposing them globally.
use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;

use super::{AdminNav, ObjectStore, SettingsService, TemplateService};

pub struct Host {
    pub store: Arc<dyn ObjectStore>,
    pub settings: SettingsService,
    pub templates: TemplateService,
    pub nav: AdminNav,
}

#[async_trait]
pub trait Plugin: Send + Sync {
    fn uid(&self) -> &'static str;

    /// Called once when the plugin is first installed.
    async fn on_install(&self, host: &Host) -> Result<(), Error>;

    /// Called when the plugin is removed.
    async fn on_uninstall(&self, _host: &Host) -> Result<(), Error> {
        Ok(())
    }

    /// Called every time the application starts, after install.
    async fn on_startup(&self, host: &mut Host) -> Result<(), Error>;

    async fn on_shutdown(&self) -> Result<(), Error> {
        Ok(())
    }
}
