//! Tag-scoped views over a shared hook.
//!
//! Many logical channels (for example one per collection) share a single
//! physical [`Hook`]. Each channel gets a [`HookView`] fixed to its tags:
//! handlers bound through the view carry those tags, and triggers issued
//! through the view only reach handlers with an intersecting tag set plus
//! the hook's global (untagged) handlers.

use futures::future::BoxFuture;

use hearthbase_core::result::AppResult;

use crate::chain::Next;
use crate::handler::Handler;
use crate::hook::Hook;
use crate::id::HandlerId;
use crate::tags::TagSet;

/// A borrowed, tag-scoped façade over a [`Hook`]. Holds no handlers itself.
pub struct HookView<'h, T> {
    hook: &'h Hook<T>,
    tags: TagSet,
}

impl<'h, T> HookView<'h, T> {
    /// Creates a view over `hook` fixed to `tags`.
    pub fn new(hook: &'h Hook<T>, tags: impl Into<TagSet>) -> Self {
        Self {
            hook,
            tags: tags.into(),
        }
    }

    /// Registers a callback tagged with the view's tags.
    pub fn bind_fn<F>(&self, callback: F, priority: i32) -> HandlerId
    where
        F: for<'e> Fn(&'e mut T, Next<'e, T>) -> BoxFuture<'e, AppResult<()>>
            + Send
            + Sync
            + 'static,
    {
        self.hook
            .bind_fn_with_tags(callback, self.tags.clone(), priority)
    }

    /// Registers a handler. Handlers without explicit tags receive the
    /// view's tags; explicit tags (even an empty set) are kept as given.
    pub fn bind(&self, mut handler: Handler<T>) {
        if handler.tags.is_none() {
            handler.tags = Some(self.tags.clone());
        }
        self.hook.bind(handler);
    }

    /// Removes a handler from the underlying hook.
    ///
    /// Ids are global to the hook, so this also removes handlers that were
    /// registered through other views.
    pub fn unbind(&self, id: &HandlerId) -> bool {
        self.hook.unbind(id)
    }

    /// Triggers the underlying hook filtered by the view's tags.
    pub async fn trigger<F>(&self, event: &mut T, terminal: F) -> AppResult<()>
    where
        F: for<'e> FnOnce(&'e mut T) -> BoxFuture<'e, AppResult<()>> + Send,
    {
        self.hook
            .dispatch(event, Some(&self.tags), Box::new(terminal))
            .await
    }

    /// Copy of the view's tags.
    pub fn tags(&self) -> Vec<String> {
        self.tags.to_vec()
    }
}

impl<T> Clone for HookView<'_, T> {
    fn clone(&self) -> Self {
        Self {
            hook: self.hook,
            tags: self.tags.clone(),
        }
    }
}

impl<T> std::fmt::Debug for HookView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookView")
            .field("tags", &self.tags)
            .field("hook_handlers", &self.hook.len())
            .finish()
    }
}
