//! Services provided by the host application that plugins build on.
pub mod nav;
pub mod plugin;
pub mod settings;
pub mod store;
pub mod templates;

pub use nav::{AdminNav, NavItem};
pub use plugin::{Host, Plugin};
pub use settings::SettingsService;
pub use store::{Collection, ObjectStore, Record, SqliteStore};
pub use templates::{GlobalHelper, TemplateLoader, TemplateService};
