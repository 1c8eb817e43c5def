use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::AppState;
use crate::core::{AppConfig, db::async_db};
use crate::host::{
    AdminNav, Host, Plugin, SettingsService, SqliteStore, TemplateLoader, TemplateService,
};
use crate::plugin::CalendarPlugin;

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        // API routes
        .nest("/api", routes::router())
        // Pages and downloads
        .merge(routes::site_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Wire the host services to the database and run the calendar's
/// startup hook so its template helpers are registered.
pub async fn build_state(db: tokio_rusqlite::Connection, config: AppConfig) -> Result<AppState> {
    let store = SqliteStore::new(db.clone());
    let mut host = Host {
        store: Arc::new(store),
        settings: SettingsService::new(db),
        templates: TemplateService::new(TemplateLoader::new(&config.templates_path)),
        nav: AdminNav::new(),
    };

    let plugin = CalendarPlugin::new(config.clone());
    plugin.on_startup(&mut host).await?;

    Ok(AppState::new(host, plugin, config))
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = async_db(&config.db_path).await?;
    let shared_state = Arc::new(build_state(db, config).await?);
    let app = app(Arc::clone(&shared_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", err);
            }
        })
        .await?;

    shared_state.plugin.on_shutdown().await?;
    tracing::debug!("Server stopped");
    Ok(())
}
