//! Persistence seam used by the write lifecycle.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use hearthbase_core::error::AppError;
use hearthbase_core::events::Model;
use hearthbase_core::result::AppResult;
use hearthbase_core::types::{Collection, Record, RecordId};

/// Storage backend for collections and records.
///
/// Writes take a [`Model`] so the model-level execute hooks can hand the
/// final, handler-adjusted value straight to the store.
#[async_trait]
pub trait DataStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a collection by name.
    async fn find_collection(&self, name: &str) -> AppResult<Option<Collection>>;

    /// List all collections, ordered by name.
    async fn list_collections(&self) -> AppResult<Vec<Collection>>;

    /// Find a record by id within a collection.
    async fn find_record(&self, collection: &str, id: &RecordId) -> AppResult<Option<Record>>;

    /// List the records of a collection, oldest first.
    async fn list_records(&self, collection: &str) -> AppResult<Vec<Record>>;

    /// Insert a new model. Fails if it already exists.
    async fn insert(&self, model: &Model) -> AppResult<()>;

    /// Replace an existing model. Fails if it does not exist.
    async fn update(&self, model: &Model) -> AppResult<()>;

    /// Delete an existing model. Deleting a collection also deletes its records.
    async fn delete(&self, model: &Model) -> AppResult<()>;
}

/// In-memory [`DataStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Collection>,
    records: DashMap<RecordId, Record>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_collection(&self, collection: &Collection) -> AppResult<()> {
        match self.collections.entry(collection.name.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Collection '{}' already exists",
                collection.name
            ))),
            Entry::Vacant(slot) => {
                slot.insert(collection.clone());
                Ok(())
            }
        }
    }

    fn insert_record(&self, record: &Record) -> AppResult<()> {
        if !self.collections.contains_key(&record.collection) {
            return Err(AppError::not_found(format!(
                "Collection '{}' not found",
                record.collection
            )));
        }
        match self.records.entry(record.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Record {} already exists",
                record.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn find_collection(&self, name: &str) -> AppResult<Option<Collection>> {
        Ok(self.collections.get(name).map(|c| c.value().clone()))
    }

    async fn list_collections(&self) -> AppResult<Vec<Collection>> {
        let mut collections: Vec<Collection> =
            self.collections.iter().map(|c| c.value().clone()).collect();
        collections.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(collections)
    }

    async fn find_record(&self, collection: &str, id: &RecordId) -> AppResult<Option<Record>> {
        Ok(self
            .records
            .get(id)
            .filter(|r| r.collection == collection)
            .map(|r| r.value().clone()))
    }

    async fn list_records(&self, collection: &str) -> AppResult<Vec<Record>> {
        let mut records: Vec<Record> = self
            .records
            .iter()
            .filter(|r| r.collection == collection)
            .map(|r| r.value().clone())
            .collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    async fn insert(&self, model: &Model) -> AppResult<()> {
        match model {
            Model::Collection(collection) => self.insert_collection(collection)?,
            Model::Record(record) => self.insert_record(record)?,
        }
        debug!(table = model.table_name(), "Model inserted");
        Ok(())
    }

    async fn update(&self, model: &Model) -> AppResult<()> {
        match model {
            Model::Collection(collection) => match self.collections.get_mut(&collection.name) {
                Some(mut existing) => *existing = collection.clone(),
                None => {
                    return Err(AppError::not_found(format!(
                        "Collection '{}' not found",
                        collection.name
                    )));
                }
            },
            Model::Record(record) => match self.records.get_mut(&record.id) {
                Some(mut existing) if existing.collection == record.collection => {
                    *existing = record.clone()
                }
                _ => {
                    return Err(AppError::not_found(format!(
                        "Record {} not found in '{}'",
                        record.id, record.collection
                    )));
                }
            },
        }
        debug!(table = model.table_name(), "Model updated");
        Ok(())
    }

    async fn delete(&self, model: &Model) -> AppResult<()> {
        match model {
            Model::Collection(collection) => {
                if self.collections.remove(&collection.name).is_none() {
                    return Err(AppError::not_found(format!(
                        "Collection '{}' not found",
                        collection.name
                    )));
                }
                self.records.retain(|_, r| r.collection != collection.name);
            }
            Model::Record(record) => {
                if self
                    .records
                    .remove_if(&record.id, |_, r| r.collection == record.collection)
                    .is_none()
                {
                    return Err(AppError::not_found(format!(
                        "Record {} not found in '{}'",
                        record.id, record.collection
                    )));
                }
            }
        }
        debug!(table = model.table_name(), "Model deleted");
        Ok(())
    }
}
