//! Collection lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::Collection;

/// Payload for collection create/update/delete hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEvent {
    /// The collection being written.
    pub collection: Collection,
    /// Failure message, set only for after-error events.
    pub error: Option<String>,
}

impl CollectionEvent {
    /// Creates an event for the given collection.
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            error: None,
        }
    }
}
