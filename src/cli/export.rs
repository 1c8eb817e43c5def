use anyhow::{Result, anyhow};

use crate::core::AppConfig;
use crate::core::db::async_db;
use crate::host::{SqliteStore, TemplateLoader};
use crate::plugin::ics::export_event;

pub async fn run(id: &str, config: &AppConfig) -> Result<()> {
    let db = async_db(&config.db_path).await?;
    let store = SqliteStore::new(db);
    let loader = TemplateLoader::new(&config.templates_path);

    let file = export_event(&store, &loader, &config.site_ip, id)
        .await?
        .ok_or_else(|| anyhow!("No event found with id {}", id))?;
    print!("{}", file.body);

    Ok(())
}
