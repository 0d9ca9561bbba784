//! Record lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::{CollectionId, Record};

/// Payload for record create/update/delete hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEvent {
    /// The record being written.
    pub record: Record,
    /// Id of the record's collection, when it resolved to a stored one.
    #[serde(default)]
    pub collection_id: Option<CollectionId>,
    /// Failure message, set only for after-error events.
    pub error: Option<String>,
}

impl RecordEvent {
    /// Creates an event for the given record.
    pub fn new(record: Record) -> Self {
        Self {
            record,
            collection_id: None,
            error: None,
        }
    }

    /// Attaches the id of the record's collection.
    pub fn with_collection_id(mut self, id: CollectionId) -> Self {
        self.collection_id = Some(id);
        self
    }

    /// Name of the collection the record belongs to.
    pub fn collection(&self) -> &str {
        &self.record.collection
    }
}
