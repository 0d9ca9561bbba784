//! Handlers shipped with the application.
//!
//! Builtins use fixed handler ids, so installing them again replaces the
//! previous registration instead of stacking a duplicate.

use std::sync::Arc;

use tracing::{debug, info, warn};

use hearthbase_core::error::AppError;
use hearthbase_core::events::{CollectionEvent, RecordEvent};
use hearthbase_hook::Handler;

use crate::hooks::AppHooks;
use crate::lifecycle::Operation;
use crate::store::DataStore;

/// Priority of the audit log handlers. Runs after user handlers.
pub const AUDIT_LOG_PRIORITY: i32 = 1000;

/// Priority of the collection guard. Runs before user validators.
pub const COLLECTION_GUARD_PRIORITY: i32 = -1000;

/// Handler id of the collection guard.
pub const COLLECTION_GUARD_ID: &str = "builtin.collection_guard";

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

/// Logs every record and collection write outcome.
pub fn install_audit_log(hooks: &AppHooks) {
    hooks
        .on_record_after_create_success()
        .bind(record_written(Operation::Create));
    hooks
        .on_record_after_update_success()
        .bind(record_written(Operation::Update));
    hooks
        .on_record_after_delete_success()
        .bind(record_written(Operation::Delete));
    hooks
        .on_record_after_create_error()
        .bind(record_failed(Operation::Create));
    hooks
        .on_record_after_update_error()
        .bind(record_failed(Operation::Update));
    hooks
        .on_record_after_delete_error()
        .bind(record_failed(Operation::Delete));

    hooks
        .on_collection_after_create_success()
        .bind(collection_written(Operation::Create));
    hooks
        .on_collection_after_update_success()
        .bind(collection_written(Operation::Update));
    hooks
        .on_collection_after_delete_success()
        .bind(collection_written(Operation::Delete));
    hooks
        .on_collection_after_create_error()
        .bind(collection_failed(Operation::Create));
    hooks
        .on_collection_after_update_error()
        .bind(collection_failed(Operation::Update));
    hooks
        .on_collection_after_delete_error()
        .bind(collection_failed(Operation::Delete));

    debug!("Audit log handlers installed");
}

fn record_written(op: Operation) -> Handler<RecordEvent> {
    Handler::<RecordEvent>::new(format!("builtin.audit_log.record_{op}"), move |e, next| {
        info!(
            operation = %op,
            collection = %e.record.collection,
            record_id = %e.record.id,
            "Record written"
        );
        next.proceed(e)
    })
    .with_priority(AUDIT_LOG_PRIORITY)
}

fn record_failed(op: Operation) -> Handler<RecordEvent> {
    Handler::<RecordEvent>::new(
        format!("builtin.audit_log.record_{op}_error"),
        move |e, next| {
            warn!(
                operation = %op,
                collection = %e.record.collection,
                record_id = %e.record.id,
                error = e.error.as_deref().unwrap_or_default(),
                "Record write failed"
            );
            next.proceed(e)
        },
    )
    .with_priority(AUDIT_LOG_PRIORITY)
}

fn collection_written(op: Operation) -> Handler<CollectionEvent> {
    Handler::<CollectionEvent>::new(
        format!("builtin.audit_log.collection_{op}"),
        move |e, next| {
            info!(
                operation = %op,
                collection = %e.collection.name,
                "Collection written"
            );
            next.proceed(e)
        },
    )
    .with_priority(AUDIT_LOG_PRIORITY)
}

fn collection_failed(op: Operation) -> Handler<CollectionEvent> {
    Handler::<CollectionEvent>::new(
        format!("builtin.audit_log.collection_{op}_error"),
        move |e, next| {
            warn!(
                operation = %op,
                collection = %e.collection.name,
                error = e.error.as_deref().unwrap_or_default(),
                "Collection write failed"
            );
            next.proceed(e)
        },
    )
    .with_priority(AUDIT_LOG_PRIORITY)
}

// ---------------------------------------------------------------------------
// Collection guard
// ---------------------------------------------------------------------------

/// Rejects record writes targeting a missing or read-only collection.
pub fn install_collection_guard(hooks: &AppHooks, store: Arc<dyn DataStore>) {
    hooks.on_record_validate().bind(
        Handler::<RecordEvent>::new(COLLECTION_GUARD_ID, move |e, next| {
            let store = store.clone();
            Box::pin(async move {
                let collection = store.find_collection(e.collection()).await?;
                match collection {
                    None => Err(AppError::validation(format!(
                        "Collection '{}' does not exist",
                        e.record.collection
                    ))),
                    Some(collection) if !collection.is_writable() => {
                        Err(AppError::validation(format!(
                            "Collection '{}' is read-only",
                            collection.name
                        )))
                    }
                    Some(_) => next.proceed(e).await,
                }
            })
        })
        .with_priority(COLLECTION_GUARD_PRIORITY),
    );

    debug!("Collection guard installed");
}
