use uuid::Uuid;

use super::models::Venue;
use crate::host::{Collection, ObjectStore};

/// Resolve an event's venue reference. Anything that can't produce a
/// venue (no reference, a malformed id, a missing record or a storage
/// failure) resolves to an empty venue so rendering can continue.
pub async fn resolve_venue(store: &dyn ObjectStore, venue_ref: Option<&str>) -> Venue {
    let Some(venue_id) = venue_ref.filter(|id| Uuid::parse_str(id).is_ok()) else {
        return Venue::default();
    };

    match store.load_by_id(venue_id, Collection::CustomObject).await {
        Ok(Some(record)) => Venue::from_record(record).unwrap_or_else(|err| {
            tracing::warn!("Ignoring malformed venue {}: {}", venue_id, err);
            Venue::default()
        }),
        Ok(None) => {
            tracing::debug!("Venue {} not found", venue_id);
            Venue::default()
        }
        Err(err) => {
            tracing::warn!("Failed to load venue {}: {}", venue_id, err);
            Venue::default()
        }
    }
}
