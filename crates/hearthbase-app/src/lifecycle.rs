//! Write lifecycle orchestration.
//!
//! A record or collection write nests its hooks like this:
//!
//! ```text
//! on_<kind>_<op>
//!   └─ on_<kind>_validate            (create/update only)
//!   └─ on_<kind>_<op>_execute
//!        └─ on_model_<op>
//!             └─ on_model_validate   (create/update only)
//!             └─ on_model_<op>_execute
//!                  └─ store write
//!             on_model_after_<op>_success | on_model_after_<op>_error
//! on_<kind>_after_<op>_success | on_<kind>_after_<op>_error
//! ```
//!
//! Each level is the terminal continuation of the level above it, so a
//! handler that skips `next` vetoes everything nested below it. Record
//! hooks are triggered with the record's collection name and, once the
//! collection is resolved, its id as filter tags.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::warn;

use hearthbase_core::error::AppError;
use hearthbase_core::events::{CollectionEvent, Model, ModelEvent, RecordEvent};
use hearthbase_core::result::AppResult;
use hearthbase_hook::{Hook, TagSet, noop};

use crate::hooks::AppHooks;
use crate::store::DataStore;

/// Kind of write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert a new model.
    Create,
    /// Replace an existing model.
    Update,
    /// Remove an existing model.
    Delete,
}

impl Operation {
    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Selector<E> = fn(&AppHooks) -> &Hook<E>;

/// The hooks one write passes through.
pub(crate) struct Stages<E> {
    op: Operation,
    main: Selector<E>,
    validate: Option<Selector<E>>,
    execute: Selector<E>,
    after_success: Selector<E>,
    after_error: Selector<E>,
}

impl Stages<RecordEvent> {
    pub(crate) fn record(op: Operation) -> Self {
        match op {
            Operation::Create => Self {
                op,
                main: AppHooks::on_record_create,
                validate: Some(AppHooks::on_record_validate),
                execute: AppHooks::on_record_create_execute,
                after_success: AppHooks::on_record_after_create_success,
                after_error: AppHooks::on_record_after_create_error,
            },
            Operation::Update => Self {
                op,
                main: AppHooks::on_record_update,
                validate: Some(AppHooks::on_record_validate),
                execute: AppHooks::on_record_update_execute,
                after_success: AppHooks::on_record_after_update_success,
                after_error: AppHooks::on_record_after_update_error,
            },
            Operation::Delete => Self {
                op,
                main: AppHooks::on_record_delete,
                validate: None,
                execute: AppHooks::on_record_delete_execute,
                after_success: AppHooks::on_record_after_delete_success,
                after_error: AppHooks::on_record_after_delete_error,
            },
        }
    }
}

impl Stages<CollectionEvent> {
    pub(crate) fn collection(op: Operation) -> Self {
        match op {
            Operation::Create => Self {
                op,
                main: AppHooks::on_collection_create,
                validate: Some(AppHooks::on_collection_validate),
                execute: AppHooks::on_collection_create_execute,
                after_success: AppHooks::on_collection_after_create_success,
                after_error: AppHooks::on_collection_after_create_error,
            },
            Operation::Update => Self {
                op,
                main: AppHooks::on_collection_update,
                validate: Some(AppHooks::on_collection_validate),
                execute: AppHooks::on_collection_update_execute,
                after_success: AppHooks::on_collection_after_update_success,
                after_error: AppHooks::on_collection_after_update_error,
            },
            Operation::Delete => Self {
                op,
                main: AppHooks::on_collection_delete,
                validate: None,
                execute: AppHooks::on_collection_delete_execute,
                after_success: AppHooks::on_collection_after_delete_success,
                after_error: AppHooks::on_collection_after_delete_error,
            },
        }
    }
}

impl Stages<ModelEvent> {
    pub(crate) fn model(op: Operation) -> Self {
        match op {
            Operation::Create => Self {
                op,
                main: AppHooks::on_model_create,
                validate: Some(AppHooks::on_model_validate),
                execute: AppHooks::on_model_create_execute,
                after_success: AppHooks::on_model_after_create_success,
                after_error: AppHooks::on_model_after_create_error,
            },
            Operation::Update => Self {
                op,
                main: AppHooks::on_model_update,
                validate: Some(AppHooks::on_model_validate),
                execute: AppHooks::on_model_update_execute,
                after_success: AppHooks::on_model_after_update_success,
                after_error: AppHooks::on_model_after_update_error,
            },
            Operation::Delete => Self {
                op,
                main: AppHooks::on_model_delete,
                validate: None,
                execute: AppHooks::on_model_delete_execute,
                after_success: AppHooks::on_model_after_delete_success,
                after_error: AppHooks::on_model_after_delete_error,
            },
        }
    }
}

/// An event that can travel through a write lifecycle.
pub(crate) trait LifecycleEvent: Send + Sync + 'static {
    /// Filter tags for every trigger of this event. `None` triggers unfiltered.
    fn tags(&self) -> Option<TagSet>;

    /// Records the failure for after-error handlers.
    fn set_error(&mut self, message: String);

    /// The innermost action, run as terminal of the execute hook.
    fn commit<'e>(
        hooks: Arc<AppHooks>,
        store: Arc<dyn DataStore>,
        op: Operation,
        event: &'e mut Self,
    ) -> BoxFuture<'e, AppResult<()>>;
}

impl LifecycleEvent for RecordEvent {
    fn tags(&self) -> Option<TagSet> {
        let mut tags = TagSet::from(self.collection());
        if let Some(id) = &self.collection_id {
            tags.insert(id.to_string());
        }
        Some(tags)
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn commit<'e>(
        hooks: Arc<AppHooks>,
        store: Arc<dyn DataStore>,
        op: Operation,
        event: &'e mut Self,
    ) -> BoxFuture<'e, AppResult<()>> {
        Box::pin(async move {
            let mut model = ModelEvent::new(Model::Record(event.record.clone()));
            run(hooks, store, Stages::model(op), &mut model).await?;
            if let Model::Record(record) = model.model {
                event.record = record;
            }
            Ok(())
        })
    }
}

impl LifecycleEvent for CollectionEvent {
    fn tags(&self) -> Option<TagSet> {
        None
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn commit<'e>(
        hooks: Arc<AppHooks>,
        store: Arc<dyn DataStore>,
        op: Operation,
        event: &'e mut Self,
    ) -> BoxFuture<'e, AppResult<()>> {
        Box::pin(async move {
            let mut model = ModelEvent::new(Model::Collection(event.collection.clone()));
            run(hooks, store, Stages::model(op), &mut model).await?;
            if let Model::Collection(collection) = model.model {
                event.collection = collection;
            }
            Ok(())
        })
    }
}

impl LifecycleEvent for ModelEvent {
    fn tags(&self) -> Option<TagSet> {
        None
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn commit<'e>(
        _hooks: Arc<AppHooks>,
        store: Arc<dyn DataStore>,
        op: Operation,
        event: &'e mut Self,
    ) -> BoxFuture<'e, AppResult<()>> {
        Box::pin(async move {
            match op {
                Operation::Create => store.insert(&event.model).await,
                Operation::Update => store.update(&event.model).await,
                Operation::Delete => store.delete(&event.model).await,
            }
        })
    }
}

/// Triggers `hook`, filtered by `tags` when present.
async fn fire<E, F>(hook: &Hook<E>, tags: Option<&TagSet>, event: &mut E, terminal: F) -> AppResult<()>
where
    F: for<'e> FnOnce(&'e mut E) -> BoxFuture<'e, AppResult<()>> + Send,
{
    match tags {
        Some(tags) => hook.trigger_tagged(event, tags.clone(), terminal).await,
        None => hook.trigger(event, terminal).await,
    }
}

/// Runs one write through its hooks.
///
/// Returns the first error raised by a handler or by the store. In that
/// case the after-error hook sees the message in the event; its own
/// failure is logged and the original error is returned. An error from
/// the after-success hook is returned as is.
pub(crate) async fn run<E: LifecycleEvent>(
    hooks: Arc<AppHooks>,
    store: Arc<dyn DataStore>,
    stages: Stages<E>,
    event: &mut E,
) -> AppResult<()> {
    let Stages {
        op,
        main,
        validate,
        execute,
        after_success,
        after_error,
    } = stages;
    let tags = event.tags();

    let inner_hooks = hooks.clone();
    let inner_tags = tags.clone();
    let result = fire(main(&hooks), tags.as_ref(), event, move |event| {
        Box::pin(async move {
            if let Some(validate) = validate {
                fire(validate(&inner_hooks), inner_tags.as_ref(), event, noop).await?;
            }
            let commit_hooks = inner_hooks.clone();
            fire(execute(&inner_hooks), inner_tags.as_ref(), event, move |event| {
                E::commit(commit_hooks, store, op, event)
            })
            .await
        })
    })
    .await;

    match result {
        Ok(()) => fire(after_success(&hooks), tags.as_ref(), event, noop).await,
        Err(err) => {
            event.set_error(err.to_string());
            if let Err(hook_err) = fire(after_error(&hooks), tags.as_ref(), event, noop).await {
                warn!(
                    operation = %op,
                    error = %hook_err,
                    "After-error hook failed"
                );
                let message = format!("{}; {hook_err}", err.message);
                return Err(AppError::with_source(err.kind, message, err));
            }
            Err(err)
        }
    }
}
