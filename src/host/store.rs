//! Generic custom object storage. Plugins define record schemas at
//! runtime (`TypeDefinition`) and read records back as loosely typed
//! JSON objects that they deserialize into their own models.
use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_rusqlite::Connection;
use uuid::Uuid;

/// A stored record. Always carries its identifier under `_id` and,
/// for custom objects, the owning type id under `type`.
pub type Record = Map<String, Value>;

pub const ID_KEY: &str = "_id";
pub const TYPE_KEY: &str = "type";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    CustomObject,
    Topic,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::CustomObject => "custom_object",
            Collection::Topic => "topic",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field_type", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Date,
    // A single reference to another object
    PeerObject { object_type: String },
    // An ordered list of references to other objects
    ChildObjects { object_type: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub fields: BTreeMap<String, FieldType>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CustomObjectType {
    pub id: String,
    pub name: String,
    pub fields: BTreeMap<String, FieldType>,
}

#[derive(Clone, Debug)]
pub enum Condition {
    /// The date stored in `field` is at or after `value`
    OnOrAfter { field: String, value: DateTime<Utc> },
}

#[derive(Clone, Debug, Default)]
pub struct Filter {
    pub type_id: Option<String>,
    pub conditions: Vec<Condition>,
}

impl Filter {
    pub fn of_type(type_id: &str) -> Self {
        Self {
            type_id: Some(type_id.to_string()),
            conditions: Vec::new(),
        }
    }

    pub fn on_or_after(mut self, field: &str, value: DateTime<Utc>) -> Self {
        self.conditions.push(Condition::OnOrAfter {
            field: field.to_string(),
            value,
        });
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Clone, Debug)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            order: SortOrder::Asc,
        }
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn create_type(&self, definition: TypeDefinition) -> Result<CustomObjectType, Error>;

    async fn load_type_by_name(&self, name: &str) -> Result<Option<CustomObjectType>, Error>;

    async fn load_by_id(&self, id: &str, collection: Collection)
    -> Result<Option<Record>, Error>;

    async fn query(
        &self,
        collection: Collection,
        filter: Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Record>, Error>;

    /// Insert or replace a record, returning its id. A new id is
    /// assigned when the record has no `_id`.
    async fn save_object(&self, collection: Collection, record: Record) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> Connection {
        self.db.clone()
    }
}

fn json_path(field: &str) -> String {
    format!("$.{}", field)
}

fn record_from_row(id: String, type_id: Option<String>, data: &str) -> Result<Record, Error> {
    let mut record: Record = serde_json::from_str(data)?;
    record.insert(ID_KEY.to_string(), Value::String(id));
    if let Some(type_id) = type_id {
        record.insert(TYPE_KEY.to_string(), Value::String(type_id));
    }
    Ok(record)
}

fn type_from_row(id: String, name: String, fields: &str) -> Result<CustomObjectType, Error> {
    Ok(CustomObjectType {
        id,
        name,
        fields: serde_json::from_str(fields)?,
    })
}

#[async_trait]
impl ObjectStore for SqliteStore {
    async fn create_type(&self, definition: TypeDefinition) -> Result<CustomObjectType, Error> {
        let id = Uuid::new_v4().to_string();
        let fields = serde_json::to_string(&definition.fields)?;
        let (type_id, name) = (id.clone(), definition.name.clone());
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO custom_object_type (id, name, fields) VALUES (?, ?, ?)",
                    [&type_id, &name, &fields],
                )?;
                Ok(())
            })
            .await?;

        tracing::debug!("Created custom object type {} ({})", definition.name, id);

        Ok(CustomObjectType {
            id,
            name: definition.name,
            fields: definition.fields,
        })
    }

    async fn load_type_by_name(&self, name: &str) -> Result<Option<CustomObjectType>, Error> {
        let name = name.to_owned();
        let row = self
            .db
            .call(move |conn| {
                let row = conn
                    .prepare(
                        "SELECT id, name, fields FROM custom_object_type WHERE name = ? ORDER BY created_at LIMIT 1",
                    )?
                    .query_row([&name], |i| {
                        Ok((
                            i.get::<_, String>(0)?,
                            i.get::<_, String>(1)?,
                            i.get::<_, String>(2)?,
                        ))
                    })
                    .optional()?;
                Ok(row)
            })
            .await?;

        row.map(|(id, name, fields)| type_from_row(id, name, &fields))
            .transpose()
    }

    async fn load_by_id(
        &self,
        id: &str,
        collection: Collection,
    ) -> Result<Option<Record>, Error> {
        let id = id.to_owned();
        let row = self
            .db
            .call(move |conn| {
                let row = conn
                    .prepare(
                        "SELECT id, type_id, data FROM object WHERE id = ? AND collection = ? LIMIT 1",
                    )?
                    .query_row([id.as_str(), collection.as_str()], |i| {
                        Ok((
                            i.get::<_, String>(0)?,
                            i.get::<_, Option<String>>(1)?,
                            i.get::<_, String>(2)?,
                        ))
                    })
                    .optional()?;
                Ok(row)
            })
            .await?;

        row.map(|(id, type_id, data)| record_from_row(id, type_id, &data))
            .transpose()
    }

    async fn query(
        &self,
        collection: Collection,
        filter: Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Record>, Error> {
        let mut sql = String::from("SELECT id, type_id, data FROM object WHERE collection = ?");
        let mut params: Vec<String> = vec![collection.as_str().to_string()];

        if let Some(type_id) = filter.type_id {
            sql.push_str(" AND type_id = ?");
            params.push(type_id);
        }

        for condition in filter.conditions {
            match condition {
                Condition::OnOrAfter { field, value } => {
                    sql.push_str(" AND julianday(json_extract(data, ?)) >= julianday(?)");
                    params.push(json_path(&field));
                    params.push(value.to_rfc3339());
                }
            }
        }

        if let Some(Sort { field, order }) = sort {
            let direction = match order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            sql.push_str(&format!(" ORDER BY json_extract(data, ?) {}", direction));
            params.push(json_path(&field));
        }

        let rows = self
            .db
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(params.iter()), |i| {
                        Ok((
                            i.get::<_, String>(0)?,
                            i.get::<_, Option<String>>(1)?,
                            i.get::<_, String>(2)?,
                        ))
                    })?
                    .collect::<Result<Vec<_>, rusqlite::Error>>()?;
                Ok(rows)
            })
            .await?;

        rows.into_iter()
            .map(|(id, type_id, data)| record_from_row(id, type_id, &data))
            .collect()
    }

    async fn save_object(
        &self,
        collection: Collection,
        mut record: Record,
    ) -> Result<String, Error> {
        let id = match record.remove(ID_KEY) {
            Some(Value::String(id)) => id,
            Some(other) => return Err(anyhow!("Invalid object id {}", other)),
            None => Uuid::new_v4().to_string(),
        };
        let type_id = match record.remove(TYPE_KEY) {
            Some(Value::String(type_id)) => Some(type_id),
            Some(other) => return Err(anyhow!("Invalid object type {}", other)),
            None => None,
        };
        if collection == Collection::CustomObject && type_id.is_none() {
            return Err(anyhow!("Custom objects require a type"));
        }

        let data = serde_json::to_string(&record)?;
        let object_id = id.clone();
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO object (id, collection, type_id, data) VALUES (?, ?, ?, ?)",
                    rusqlite::params![object_id, collection.as_str(), type_id, data],
                )?;
                Ok(())
            })
            .await?;

        Ok(id)
    }
}
