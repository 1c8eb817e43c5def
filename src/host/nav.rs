//! Admin sub-navigation entries registered by plugins.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub name: String,
    pub title: String,
    pub icon: String,
    pub href: String,
}

#[derive(Clone, Default)]
pub struct AdminNav {
    items: Arc<RwLock<HashMap<String, Vec<NavItem>>>>,
}

impl AdminNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to a plugin's settings navigation. Registering an
    /// entry with the same name again replaces it.
    pub fn register_for(&self, plugin_uid: &str, item: NavItem) {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        let entries = items.entry(plugin_uid.to_string()).or_default();
        match entries.iter_mut().find(|existing| existing.name == item.name) {
            Some(existing) => *existing = item,
            None => entries.push(item),
        }
    }

    pub fn items_for(&self, plugin_uid: &str) -> Vec<NavItem> {
        self.items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(plugin_uid)
            .cloned()
            .unwrap_or_default()
    }
}
