//! Custom object types backing venues and events.
use std::collections::BTreeMap;

use anyhow::{Error, Result};

use crate::host::ObjectStore;
use crate::host::store::{CustomObjectType, FieldType, TypeDefinition};

pub const VENUE_TYPE: &str = "venue";
pub const EVENT_TYPE: &str = "event";
pub const TOPIC_OBJECT_TYPE: &str = "topic";

pub fn venue_definition() -> TypeDefinition {
    let fields = ["name", "description", "address", "url"]
        .into_iter()
        .map(|name| (name.to_string(), FieldType::Text))
        .collect();
    TypeDefinition {
        name: VENUE_TYPE.to_string(),
        fields,
    }
}

pub fn event_definition() -> TypeDefinition {
    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), FieldType::Text);
    fields.insert("start_date".to_string(), FieldType::Date);
    fields.insert("end_date".to_string(), FieldType::Date);
    fields.insert("description".to_string(), FieldType::Text);
    fields.insert("url".to_string(), FieldType::Text);
    fields.insert(
        "venue".to_string(),
        FieldType::PeerObject {
            object_type: format!("custom:{}", VENUE_TYPE),
        },
    );
    fields.insert(
        "topics".to_string(),
        FieldType::ChildObjects {
            object_type: TOPIC_OBJECT_TYPE.to_string(),
        },
    );
    TypeDefinition {
        name: EVENT_TYPE.to_string(),
        fields,
    }
}

#[derive(Debug)]
pub struct CalendarTypes {
    pub venue: CustomObjectType,
    pub event: CustomObjectType,
}

async fn ensure_type(
    store: &dyn ObjectStore,
    definition: TypeDefinition,
) -> Result<CustomObjectType, Error> {
    if let Some(existing) = store.load_type_by_name(&definition.name).await? {
        return Ok(existing);
    }
    tracing::info!("Creating custom object type {}", definition.name);
    store.create_type(definition).await
}

/// Create the venue and event types unless they already exist. Each
/// type is checked independently so a partial run can be repeated.
pub async fn ensure_schemas(store: &dyn ObjectStore) -> Result<CalendarTypes, Error> {
    let venue = ensure_type(store, venue_definition()).await?;
    let event = ensure_type(store, event_definition()).await?;
    Ok(CalendarTypes { venue, event })
}
