use anyhow::Result;

use crate::api::build_state;
use crate::core::AppConfig;
use crate::core::db::async_db;
use crate::host::Plugin;

pub async fn run(config: &AppConfig) -> Result<()> {
    let db = async_db(&config.db_path).await?;
    let state = build_state(db, config.clone()).await?;

    println!("Installing calendar object types...");
    state.plugin.on_install(&state.host).await?;
    for item in state.host.nav.items_for(state.plugin.uid()) {
        println!("{}: {}", item.title, item.href);
    }
    println!("Finished installing");

    Ok(())
}
