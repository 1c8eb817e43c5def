//! Test utilities for integration tests
#![allow(dead_code)]
use std::sync::Arc;

use axum::{Router, body::Body};
use serde_json::{Value, json};
use tempfile::TempDir;

use calendar::api::{app, build_state};
use calendar::core::AppConfig;
use calendar::core::db::{async_db, initialize_db};
use calendar::host::{Collection, ObjectStore, Record, SqliteStore};
use calendar::plugin::schema::CalendarTypes;

pub struct TestContext {
    pub app: Router,
    pub store: SqliteStore,
    // Keeps the temporary storage alive for the duration of the test
    _dir: TempDir,
}

/// Creates a test application backed by a fresh database in a
/// temporary directory.
pub async fn test_context() -> TestContext {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = dir.path().join("db");
    let templates_path = dir.path().join("templates");
    std::fs::create_dir_all(&db_path).expect("Failed to create db directory");

    let db = async_db(db_path.to_str().unwrap())
        .await
        .expect("Failed to connect to async db");
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await
    .unwrap();

    let app_config = AppConfig {
        storage_path: dir.path().display().to_string(),
        db_path: db_path.display().to_string(),
        templates_path: templates_path.display().to_string(),
        site_ip: String::from("calendar.test"),
        date_format: String::from("%Y-%m-%d %H:%M"),
        utc_offset_minutes: 0,
    };

    let store = SqliteStore::new(db.clone());
    let state = build_state(db, app_config)
        .await
        .expect("Failed to build app state");

    TestContext {
        app: app(Arc::new(state)),
        store,
        _dir: dir,
    }
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

pub async fn install(store: &SqliteStore) -> CalendarTypes {
    calendar::plugin::schema::ensure_schemas(store)
        .await
        .expect("Failed to install schemas")
}

pub async fn add_venue(
    store: &SqliteStore,
    types: &CalendarTypes,
    name: &str,
    address: &str,
) -> String {
    store
        .save_object(
            Collection::CustomObject,
            record(json!({
                "type": types.venue.id,
                "name": name,
                "description": "",
                "address": address,
                "url": "https://example.com/venue",
            })),
        )
        .await
        .expect("Failed to save venue")
}

pub async fn add_topic(store: &SqliteStore, name: &str) -> String {
    store
        .save_object(Collection::Topic, record(json!({ "name": name })))
        .await
        .expect("Failed to save topic")
}

pub async fn add_event(
    store: &SqliteStore,
    types: &CalendarTypes,
    name: &str,
    start: &str,
    end: &str,
    venue: Option<&str>,
    topics: &[&str],
) -> String {
    store
        .save_object(
            Collection::CustomObject,
            record(json!({
                "type": types.event.id,
                "name": name,
                "start_date": start,
                "end_date": end,
                "description": format!("All about {}", name),
                "url": "https://example.com/event",
                "venue": venue,
                "topics": topics,
            })),
        )
        .await
        .expect("Failed to save event")
}
