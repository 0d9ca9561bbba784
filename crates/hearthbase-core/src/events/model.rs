//! Generic model events.
//!
//! Model hooks observe every persisted write regardless of whether it is a
//! record or a collection.

use serde::{Deserialize, Serialize};

use crate::types::{Collection, Record};

/// Any persisted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "model", rename_all = "snake_case")]
pub enum Model {
    /// A record.
    Record(Record),
    /// A collection definition.
    Collection(Collection),
}

impl Model {
    /// Name of the table the model is stored in.
    pub fn table_name(&self) -> &str {
        match self {
            Self::Record(record) => &record.collection,
            Self::Collection(_) => "_collections",
        }
    }
}

/// Payload for model create/update/delete hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEvent {
    /// The model being written.
    pub model: Model,
    /// Failure message, set only for after-error events.
    pub error: Option<String>,
}

impl ModelEvent {
    /// Creates an event for the given model.
    pub fn new(model: Model) -> Self {
        Self { model, error: None }
    }
}
