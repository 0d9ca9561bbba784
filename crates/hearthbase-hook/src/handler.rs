//! Handler records, the unit of registration on a hook.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use hearthbase_core::result::AppResult;

use crate::chain::Next;
use crate::id::HandlerId;
use crate::tags::TagSet;

/// Callback invoked for every matching trigger.
pub type HandlerFn<T> =
    Arc<dyn for<'e> Fn(&'e mut T, Next<'e, T>) -> BoxFuture<'e, AppResult<()>> + Send + Sync>;

/// A registered callback with its id, priority, and optional tags.
///
/// Handlers without tags (or with an empty tag set) are global: they run
/// for every trigger regardless of the filter tags supplied.
pub struct Handler<T> {
    /// Identifier, unique within the owning hook.
    pub id: HandlerId,
    /// Priority (lower = earlier execution).
    pub priority: i32,
    /// Tags selecting which filtered triggers this handler joins.
    pub tags: Option<TagSet>,
    callback: HandlerFn<T>,
}

impl<T> Handler<T> {
    /// Creates a handler with priority 0 and no tags.
    pub fn new<F>(id: impl Into<HandlerId>, callback: F) -> Self
    where
        F: for<'e> Fn(&'e mut T, Next<'e, T>) -> BoxFuture<'e, AppResult<()>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            id: id.into(),
            priority: 0,
            tags: None,
            callback: Arc::new(callback),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets explicit tags. An empty set still makes the handler global.
    pub fn with_tags(mut self, tags: impl Into<TagSet>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Whether the handler runs for every trigger.
    pub fn is_global(&self) -> bool {
        self.tags.as_ref().is_none_or(TagSet::is_empty)
    }

    /// Whether the handler joins a trigger filtered by `filter`.
    pub fn runs_for(&self, filter: &TagSet) -> bool {
        match &self.tags {
            Some(tags) if !tags.is_empty() => tags.intersects(filter),
            _ => true,
        }
    }

    /// Read-only description of the handler.
    pub fn info(&self) -> HandlerInfo {
        HandlerInfo {
            id: self.id.clone(),
            priority: self.priority,
            tags: self.tags.as_ref().map(TagSet::to_vec),
        }
    }

    pub(crate) fn call<'e>(&self, event: &'e mut T, next: Next<'e, T>) -> BoxFuture<'e, AppResult<()>> {
        (self.callback)(event, next)
    }
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Snapshot of a registered handler, as returned by [`Hook::handlers`](crate::Hook::handlers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerInfo {
    /// Handler id.
    pub id: HandlerId,
    /// Handler priority.
    pub priority: i32,
    /// Handler tags, if any were set.
    pub tags: Option<Vec<String>>,
}
