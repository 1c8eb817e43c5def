//! Store fixtures shared by the plugin's unit tests.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio_rusqlite::Connection;

use crate::core::db::initialize_db;
use crate::host::store::{CustomObjectType, Filter, Sort, TypeDefinition};
use crate::host::{Collection, ObjectStore, Record, SqliteStore};

pub async fn memory_store() -> SqliteStore {
    let db = Connection::open_in_memory().await.unwrap();
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await
    .unwrap();
    SqliteStore::new(db)
}

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap_or_default()
}

pub fn topic_record(name: &str) -> Record {
    record(json!({ "name": name }))
}

pub fn venue_record(type_id: &str, name: &str, address: &str) -> Record {
    record(json!({
        "type": type_id,
        "name": name,
        "description": "",
        "address": address,
        "url": format!("https://example.com/{}", name.to_lowercase().replace(' ', "-")),
    }))
}

pub fn event_record(
    type_id: &str,
    name: &str,
    start: &str,
    end: &str,
    venue: Option<&str>,
    topics: &[&str],
) -> Record {
    record(json!({
        "type": type_id,
        "name": name,
        "start_date": start,
        "end_date": end,
        "description": format!("About {}", name),
        "url": format!("https://example.com/{}", name.to_lowercase()),
        "venue": venue.unwrap_or(""),
        "topics": topics,
    }))
}

/// Counts calls made to the wrapped store.
pub struct CountingStore<S> {
    inner: S,
    create_type: AtomicUsize,
    load_by_id: AtomicUsize,
}

impl<S: ObjectStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            create_type: AtomicUsize::new(0),
            load_by_id: AtomicUsize::new(0),
        }
    }

    pub fn create_type_calls(&self) -> usize {
        self.create_type.load(Ordering::SeqCst)
    }

    pub fn load_by_id_calls(&self) -> usize {
        self.load_by_id.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: ObjectStore> ObjectStore for CountingStore<S> {
    async fn create_type(&self, definition: TypeDefinition) -> Result<CustomObjectType, Error> {
        self.create_type.fetch_add(1, Ordering::SeqCst);
        self.inner.create_type(definition).await
    }

    async fn load_type_by_name(&self, name: &str) -> Result<Option<CustomObjectType>, Error> {
        self.inner.load_type_by_name(name).await
    }

    async fn load_by_id(
        &self,
        id: &str,
        collection: Collection,
    ) -> Result<Option<Record>, Error> {
        self.load_by_id.fetch_add(1, Ordering::SeqCst);
        self.inner.load_by_id(id, collection).await
    }

    async fn query(
        &self,
        collection: Collection,
        filter: Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Record>, Error> {
        self.inner.query(collection, filter, sort).await
    }

    async fn save_object(&self, collection: Collection, record: Record) -> Result<String, Error> {
        self.inner.save_object(collection, record).await
    }
}

/// Delays `load_by_id` so that ids earlier in `slow_first` complete
/// last, and returns query results in reverse storage order.
pub struct DelayedStore<S> {
    inner: S,
    slow_first: Vec<String>,
}

impl<S: ObjectStore> DelayedStore<S> {
    pub fn new(inner: S, slow_first: Vec<String>) -> Self {
        Self { inner, slow_first }
    }
}

#[async_trait]
impl<S: ObjectStore> ObjectStore for DelayedStore<S> {
    async fn create_type(&self, definition: TypeDefinition) -> Result<CustomObjectType, Error> {
        self.inner.create_type(definition).await
    }

    async fn load_type_by_name(&self, name: &str) -> Result<Option<CustomObjectType>, Error> {
        self.inner.load_type_by_name(name).await
    }

    async fn load_by_id(
        &self,
        id: &str,
        collection: Collection,
    ) -> Result<Option<Record>, Error> {
        if let Some(position) = self.slow_first.iter().position(|slow| slow == id) {
            let delay = (self.slow_first.len() - position) as u64 * 20;
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.inner.load_by_id(id, collection).await
    }

    async fn query(
        &self,
        collection: Collection,
        filter: Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Record>, Error> {
        let mut results = self.inner.query(collection, filter, sort).await?;
        results.reverse();
        Ok(results)
    }

    async fn save_object(&self, collection: Collection, record: Record) -> Result<String, Error> {
        self.inner.save_object(collection, record).await
    }
}

/// Fails `load_by_id` for the listed ids as a broken storage
/// backend would.
pub struct FailingStore<S> {
    inner: S,
    failing: Vec<String>,
}

impl<S: ObjectStore> FailingStore<S> {
    pub fn new(inner: S, failing: Vec<String>) -> Self {
        Self { inner, failing }
    }
}

#[async_trait]
impl<S: ObjectStore> ObjectStore for FailingStore<S> {
    async fn create_type(&self, definition: TypeDefinition) -> Result<CustomObjectType, Error> {
        self.inner.create_type(definition).await
    }

    async fn load_type_by_name(&self, name: &str) -> Result<Option<CustomObjectType>, Error> {
        self.inner.load_type_by_name(name).await
    }

    async fn load_by_id(
        &self,
        id: &str,
        collection: Collection,
    ) -> Result<Option<Record>, Error> {
        if self.failing.iter().any(|failing| failing == id) {
            return Err(anyhow!("connection reset while loading {}", id));
        }
        self.inner.load_by_id(id, collection).await
    }

    async fn query(
        &self,
        collection: Collection,
        filter: Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Record>, Error> {
        self.inner.query(collection, filter, sort).await
    }

    async fn save_object(&self, collection: Collection, record: Record) -> Result<String, Error> {
        self.inner.save_object(collection, record).await
    }
}
