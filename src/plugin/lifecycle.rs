use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;

use super::PLUGIN_UID;
use super::feed::FeedBuilder;
use super::helpers::register_helpers;
use super::schema::{EVENT_TYPE, VENUE_TYPE, ensure_schemas};
use crate::core::AppConfig;
use crate::host::{Host, NavItem, Plugin};

const MANAGE_OBJECTS_PATH: &str = "/admin/content/custom_objects/manage_objects";

pub struct CalendarPlugin {
    config: AppConfig,
}

impl CalendarPlugin {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The event feed as configured for this site.
    pub fn feed_builder(&self, host: &Host) -> FeedBuilder {
        FeedBuilder::new(
            Arc::clone(&host.store),
            host.templates.loader().clone(),
            &self.config.date_format,
            self.config.utc_offset(),
        )
    }

    async fn register_nav(&self, host: &Host) -> Result<(), Error> {
        let entries = [
            (EVENT_TYPE, "events", "Events", "calendar"),
            (VENUE_TYPE, "venues", "Venues", "building-o"),
        ];
        for (type_name, name, title, icon) in entries {
            match host.store.load_type_by_name(type_name).await? {
                Some(object_type) => host.nav.register_for(
                    PLUGIN_UID,
                    NavItem {
                        name: name.to_string(),
                        title: title.to_string(),
                        icon: icon.to_string(),
                        href: format!("{}/{}", MANAGE_OBJECTS_PATH, object_type.id),
                    },
                ),
                None => tracing::warn!("Type {} is not installed, skipping admin nav", type_name),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Plugin for CalendarPlugin {
    fn uid(&self) -> &'static str {
        PLUGIN_UID
    }

    async fn on_install(&self, host: &Host) -> Result<(), Error> {
        let types = ensure_schemas(host.store.as_ref()).await?;
        tracing::info!(
            "Calendar installed with venue type {} and event type {}",
            types.venue.id,
            types.event.id
        );
        self.register_nav(host).await
    }

    async fn on_startup(&self, host: &mut Host) -> Result<(), Error> {
        self.register_nav(host).await?;

        let feed = self.feed_builder(host);
        register_helpers(&mut host.templates, &host.settings, &feed);
        Ok(())
    }
}
