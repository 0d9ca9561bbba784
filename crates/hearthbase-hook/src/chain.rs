//! Onion-model continuation passed to every handler.
//!
//! A trigger snapshots its filtered handler list and walks it through a
//! [`Next`]. Each handler receives the event plus the `Next` for the rest
//! of the chain:
//!
//! - calling [`Next::proceed`] runs every later handler and then the
//!   terminal continuation, returning once they have all completed, so code
//!   after the call observes their effects on the event;
//! - dropping `Next` without calling it short-circuits the chain. Later
//!   handlers and the terminal continuation never run and the trigger
//!   completes successfully when the current handler returns.
//!
//! `proceed` consumes `Next`, so a layer can advance the chain at most once.

use std::sync::Arc;

use futures::future::BoxFuture;

use hearthbase_core::result::AppResult;

use crate::handler::Handler;

/// The base action supplied by the event's originator. Runs once, after
/// every handler in the chain has advanced.
pub type Terminal<'a, T> =
    Box<dyn for<'e> FnOnce(&'e mut T) -> BoxFuture<'e, AppResult<()>> + Send + 'a>;

/// Terminal continuation that does nothing.
///
/// Used for notification-style events (bootstrap, after-success, etc.)
/// whose originator has no base action to run.
pub fn noop<T>(_: &mut T) -> BoxFuture<'_, AppResult<()>> {
    Box::pin(async { Ok(()) })
}

/// Continuation handle for the remainder of a chain.
pub struct Next<'a, T> {
    chain: &'a [Arc<Handler<T>>],
    terminal: Terminal<'a, T>,
}

impl<'a, T> Next<'a, T> {
    pub(crate) fn new(chain: &'a [Arc<Handler<T>>], terminal: Terminal<'a, T>) -> Self {
        Self { chain, terminal }
    }

    /// Number of handlers still ahead of the terminal continuation.
    pub fn remaining(&self) -> usize {
        self.chain.len()
    }

    /// Runs the rest of the chain against `event`.
    ///
    /// Errors from later handlers or from the terminal continuation are
    /// returned unchanged.
    pub fn proceed<'e>(self, event: &'e mut T) -> BoxFuture<'e, AppResult<()>>
    where
        'a: 'e,
    {
        match self.chain.split_first() {
            Some((handler, rest)) => {
                let next: Next<'e, T> = Next {
                    chain: rest,
                    terminal: self.terminal,
                };
                handler.call(event, next)
            }
            None => (self.terminal)(event),
        }
    }
}

impl<T> std::fmt::Debug for Next<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.chain.len())
            .finish_non_exhaustive()
    }
}
