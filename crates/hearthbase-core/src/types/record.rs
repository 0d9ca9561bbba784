//! Record payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;

/// A single row of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record id.
    pub id: RecordId,
    /// Name of the owning collection. Also the tag record hooks are
    /// triggered with.
    pub collection: String,
    /// Field values.
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last modification time.
    pub updated: DateTime<Utc>,
}

impl Record {
    /// Creates an empty record in the given collection.
    pub fn new(collection: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            collection: collection.into(),
            data: Map::new(),
            created: now,
            updated: now,
        }
    }

    /// Sets a field value.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Sets a field value in place.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.data.insert(key.to_string(), value.into());
    }

    /// Gets a field value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Gets a string field value.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }
}
