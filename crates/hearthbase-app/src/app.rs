//! Application lifecycle and write entry points.
//!
//! Every public operation builds its event, then triggers the matching hook
//! with the real action as terminal continuation. Handlers therefore wrap
//! the action: code before `next.proceed(e)` runs before it, code after
//! runs once it has completed, and skipping `next` skips it.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::{debug, info};

use hearthbase_core::config::AppConfig;
use hearthbase_core::events::{
    BootstrapEvent, CollectionEvent, RecordEvent, ServeEvent, TerminateEvent,
};
use hearthbase_core::result::AppResult;
use hearthbase_core::types::{Collection, Record};

use crate::hooks::AppHooks;
use crate::lifecycle::{self, LifecycleEvent, Operation, Stages};
use crate::store::{DataStore, MemoryStore};

/// The assembled application.
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    hooks: Arc<AppHooks>,
    store: Arc<dyn DataStore>,
    bootstrapped: Arc<AtomicBool>,
}

impl App {
    /// Creates an application over the given store.
    pub fn new(config: AppConfig, store: Arc<dyn DataStore>) -> Self {
        Self {
            config,
            hooks: Arc::new(AppHooks::new()),
            store,
            bootstrapped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates an application backed by a [`MemoryStore`].
    pub fn with_memory_store(config: AppConfig) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lifecycle hooks.
    pub fn hooks(&self) -> &AppHooks {
        &self.hooks
    }

    /// Persistence backend.
    pub fn store(&self) -> &Arc<dyn DataStore> {
        &self.store
    }

    /// Whether [`App::bootstrap`] completed and [`App::terminate`] has not
    /// run since.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.load(Ordering::SeqCst)
    }

    /// Prepares the data directory.
    ///
    /// Handlers of `on_bootstrap` may adjust the data directory before
    /// calling `next`.
    pub async fn bootstrap(&self) -> AppResult<()> {
        let mut event = BootstrapEvent {
            data_dir: self.config.app.data_dir.clone(),
            is_dev: self.config.app.is_dev,
        };

        let bootstrapped = self.bootstrapped.clone();
        self.hooks
            .on_bootstrap()
            .trigger(&mut event, move |e| {
                Box::pin(async move {
                    tokio::fs::create_dir_all(&e.data_dir).await?;
                    bootstrapped.store(true, Ordering::SeqCst);
                    Ok(())
                })
            })
            .await?;

        info!(
            data_dir = %event.data_dir,
            is_dev = event.is_dev,
            bootstrapped = self.is_bootstrapped(),
            "Application bootstrapped"
        );
        Ok(())
    }

    /// Serves until `shutdown` completes.
    ///
    /// Bootstraps first when needed. `on_serve` handlers wrap the whole
    /// serving window.
    pub async fn serve<S>(&self, shutdown: S) -> AppResult<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        if !self.is_bootstrapped() {
            self.bootstrap().await?;
        }

        let mut event = ServeEvent {
            started_at: Utc::now(),
            stopped_at: None,
        };
        info!(name = %self.config.app.name, "Serving");

        self.hooks
            .on_serve()
            .trigger(&mut event, move |e| {
                Box::pin(async move {
                    shutdown.await;
                    e.stopped_at = Some(Utc::now());
                    Ok(())
                })
            })
            .await?;

        info!(
            started_at = %event.started_at,
            stopped_at = ?event.stopped_at,
            "Stopped serving"
        );
        Ok(())
    }

    /// Shuts the application down.
    pub async fn terminate(&self, is_restart: bool) -> AppResult<()> {
        let mut event = TerminateEvent { is_restart };

        let bootstrapped = self.bootstrapped.clone();
        self.hooks
            .on_terminate()
            .trigger(&mut event, move |_| {
                Box::pin(async move {
                    bootstrapped.store(false, Ordering::SeqCst);
                    Ok(())
                })
            })
            .await?;

        info!(is_restart = event.is_restart, "Application terminated");
        Ok(())
    }

    // ── Records ─────────────────────────────────────────────────

    /// Creates a record. Returns it as finally persisted.
    pub async fn create_record(&self, record: Record) -> AppResult<Record> {
        let mut event = self.record_event(record).await?;
        self.write(Stages::record(Operation::Create), &mut event)
            .await?;
        debug!(collection = %event.record.collection, record_id = %event.record.id, "Record created");
        Ok(event.record)
    }

    /// Updates a record, stamping its modification time.
    pub async fn update_record(&self, mut record: Record) -> AppResult<Record> {
        record.updated = Utc::now();
        let mut event = self.record_event(record).await?;
        self.write(Stages::record(Operation::Update), &mut event)
            .await?;
        debug!(collection = %event.record.collection, record_id = %event.record.id, "Record updated");
        Ok(event.record)
    }

    /// Deletes a record.
    pub async fn delete_record(&self, record: Record) -> AppResult<()> {
        let mut event = self.record_event(record).await?;
        self.write(Stages::record(Operation::Delete), &mut event)
            .await?;
        debug!(collection = %event.record.collection, record_id = %event.record.id, "Record deleted");
        Ok(())
    }

    // ── Collections ─────────────────────────────────────────────

    /// Creates a collection.
    pub async fn create_collection(&self, collection: Collection) -> AppResult<Collection> {
        let mut event = CollectionEvent::new(collection);
        self.write(Stages::collection(Operation::Create), &mut event)
            .await?;
        debug!(collection = %event.collection.name, "Collection created");
        Ok(event.collection)
    }

    /// Updates a collection.
    pub async fn update_collection(&self, collection: Collection) -> AppResult<Collection> {
        let mut event = CollectionEvent::new(collection);
        self.write(Stages::collection(Operation::Update), &mut event)
            .await?;
        debug!(collection = %event.collection.name, "Collection updated");
        Ok(event.collection)
    }

    /// Deletes a collection together with its records.
    pub async fn delete_collection(&self, collection: Collection) -> AppResult<()> {
        let mut event = CollectionEvent::new(collection);
        self.write(Stages::collection(Operation::Delete), &mut event)
            .await?;
        debug!(collection = %event.collection.name, "Collection deleted");
        Ok(())
    }

    /// Builds a record event tagged with its collection's id when the
    /// collection exists. Unknown collections are left to the hooks.
    async fn record_event(&self, record: Record) -> AppResult<RecordEvent> {
        let collection = self.store.find_collection(&record.collection).await?;
        let event = RecordEvent::new(record);
        Ok(match collection {
            Some(collection) => event.with_collection_id(collection.id),
            None => event,
        })
    }

    async fn write<E: LifecycleEvent>(&self, stages: Stages<E>, event: &mut E) -> AppResult<()> {
        lifecycle::run(self.hooks.clone(), self.store.clone(), stages, event).await
    }
}
