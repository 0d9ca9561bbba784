//! Collection payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::CollectionId;

/// Kind of collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// Plain data collection.
    #[default]
    Base,
    /// Collection whose records can authenticate.
    Auth,
    /// Read-only collection backed by a query.
    View,
}

/// A named group of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection id.
    pub id: CollectionId,
    /// Unique collection name.
    pub name: String,
    /// Collection kind.
    #[serde(default)]
    pub kind: CollectionKind,
    /// Creation time.
    pub created: DateTime<Utc>,
}

impl Collection {
    /// Creates a base collection with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CollectionId::new(),
            name: name.into(),
            kind: CollectionKind::Base,
            created: Utc::now(),
        }
    }

    /// Sets the collection kind.
    pub fn with_kind(mut self, kind: CollectionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether records in this collection may be written through the API.
    pub fn is_writable(&self) -> bool {
        self.kind != CollectionKind::View
    }
}
