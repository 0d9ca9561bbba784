//! Priority-ordered handler list with onion-model dispatch.

use std::fmt;
use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;
use tracing::{debug, trace};

use hearthbase_core::result::AppResult;

use crate::chain::{Next, Terminal};
use crate::handler::{Handler, HandlerInfo};
use crate::id::{HandlerId, IdSequence};
use crate::tags::TagSet;
use crate::view::HookView;

/// Dispatcher for one kind of event.
///
/// Handlers are kept sorted by ascending priority; handlers with equal
/// priority keep their registration order. A hook may carry owner tags
/// describing what it represents as a whole (see [`Hook::matches_tags`]);
/// those are independent from the per-handler tags used to filter a
/// trigger.
pub struct Hook<T> {
    /// Owner tags. Empty means the hook matches any tag set.
    owner_tags: TagSet,
    /// Handlers sorted by priority (lower first).
    handlers: RwLock<Vec<Arc<Handler<T>>>>,
    /// Source of generated handler ids.
    ids: IdSequence,
}

impl<T> Hook<T> {
    /// Creates a hook with no owner tags.
    pub fn new() -> Self {
        Self::with_tags(TagSet::new())
    }

    /// Creates a hook owned by the given tags.
    pub fn with_tags(tags: impl Into<TagSet>) -> Self {
        Self {
            owner_tags: tags.into(),
            handlers: RwLock::new(Vec::new()),
            ids: IdSequence::default(),
        }
    }

    /// Registers a callback under a freshly generated id and returns the id.
    pub fn bind_fn<F>(&self, callback: F, priority: i32) -> HandlerId
    where
        F: for<'e> Fn(&'e mut T, Next<'e, T>) -> BoxFuture<'e, AppResult<()>>
            + Send
            + Sync
            + 'static,
    {
        let id = self.ids.next_id();
        self.bind(Handler::new(id.clone(), callback).with_priority(priority));
        id
    }

    /// Registers a callback with explicit tags under a freshly generated id.
    ///
    /// The handler only joins triggers whose filter tags intersect `tags`
    /// (or unfiltered triggers).
    pub fn bind_fn_with_tags<F>(&self, callback: F, tags: impl Into<TagSet>, priority: i32) -> HandlerId
    where
        F: for<'e> Fn(&'e mut T, Next<'e, T>) -> BoxFuture<'e, AppResult<()>>
            + Send
            + Sync
            + 'static,
    {
        let id = self.ids.next_id();
        self.bind(
            Handler::new(id.clone(), callback)
                .with_priority(priority)
                .with_tags(tags),
        );
        id
    }

    /// Registers a handler, replacing any existing handler with the same id.
    ///
    /// The replacement is re-inserted after existing handlers of equal
    /// priority.
    pub fn bind(&self, handler: Handler<T>) {
        let id = handler.id.clone();
        let priority = handler.priority;

        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        let before = handlers.len();
        handlers.retain(|h| h.id != id);
        let replaced = handlers.len() != before;

        handlers.push(Arc::new(handler));
        // Stable sort keeps registration order among equal priorities.
        handlers.sort_by_key(|h| h.priority);

        debug!(
            handler_id = %id,
            priority = priority,
            replaced = replaced,
            "Hook handler bound"
        );
    }

    /// Removes the handler with the given id. Returns whether one was removed.
    pub fn unbind(&self, id: &HandlerId) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        let before = handlers.len();
        handlers.retain(|h| &h.id != id);
        let removed = handlers.len() != before;

        if removed {
            debug!(handler_id = %id, "Hook handler unbound");
        }
        removed
    }

    /// Removes all handlers.
    pub fn reset(&self) {
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        debug!("Hook handlers reset");
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered snapshot of the registered handlers.
    pub fn handlers(&self) -> Vec<HandlerInfo> {
        self.handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|h| h.info())
            .collect()
    }

    /// Copy of the owner tags.
    pub fn tags(&self) -> Vec<String> {
        self.owner_tags.to_vec()
    }

    /// Whether this hook is relevant for `target`.
    ///
    /// True when the hook has no owner tags or shares at least one with
    /// `target`. This does not affect which handlers a trigger runs.
    pub fn matches_tags(&self, target: &[&str]) -> bool {
        self.owner_tags.is_empty() || target.iter().any(|t| self.owner_tags.contains(t))
    }

    /// Returns a view over this hook scoped to `tags`.
    pub fn view(&self, tags: impl Into<TagSet>) -> HookView<'_, T> {
        HookView::new(self, tags)
    }

    /// Runs every handler, then `terminal`.
    ///
    /// Handlers run sequentially in priority order; each decides whether to
    /// continue by calling [`Next::proceed`]. The first error from a handler
    /// or from `terminal` is returned and stops the chain. Handlers that
    /// already ran are not rolled back.
    pub async fn trigger<F>(&self, event: &mut T, terminal: F) -> AppResult<()>
    where
        F: for<'e> FnOnce(&'e mut T) -> BoxFuture<'e, AppResult<()>> + Send,
    {
        self.dispatch(event, None, Box::new(terminal)).await
    }

    /// Like [`Hook::trigger`], but only handlers that are global or whose
    /// tags intersect `filter` take part. Global handlers keep their place
    /// in the priority order.
    pub async fn trigger_tagged<F>(
        &self,
        event: &mut T,
        filter: impl Into<TagSet>,
        terminal: F,
    ) -> AppResult<()>
    where
        F: for<'e> FnOnce(&'e mut T) -> BoxFuture<'e, AppResult<()>> + Send,
    {
        let filter = filter.into();
        self.dispatch(event, Some(&filter), Box::new(terminal)).await
    }

    pub(crate) async fn dispatch(
        &self,
        event: &mut T,
        filter: Option<&TagSet>,
        terminal: Terminal<'_, T>,
    ) -> AppResult<()> {
        let chain = self.snapshot(filter);

        if chain.is_empty() {
            trace!("No matching hook handlers, running terminal only");
            return terminal(event).await;
        }

        debug!(
            handler_count = chain.len(),
            filtered = filter.is_some(),
            "Triggering hook"
        );

        Next::new(&chain, terminal).proceed(event).await
    }

    /// Filtered copy of the handler list. Taken once per trigger so
    /// concurrent bind/unbind calls cannot change an in-flight chain.
    fn snapshot(&self, filter: Option<&TagSet>) -> Vec<Arc<Handler<T>>> {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        match filter {
            None => handlers.clone(),
            Some(filter) => handlers
                .iter()
                .filter(|h| h.runs_for(filter))
                .cloned()
                .collect(),
        }
    }
}

impl<T> Default for Hook<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("owner_tags", &self.owner_tags)
            .field("handlers", &self.handlers())
            .finish()
    }
}
