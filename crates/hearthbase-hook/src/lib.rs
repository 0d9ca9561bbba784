//! # hearthbase-hook
//!
//! Event hooks for Hearthbase. Provides:
//!
//! - [`Hook`]: a priority-ordered handler list with upsert/unbind/reset
//! - Onion-model dispatch: each handler receives a [`Next`] it may advance
//!   (before/after work around the rest of the chain) or drop (short-circuit)
//! - Per-handler tags for selective triggering, and owner tags describing
//!   what a hook as a whole represents
//! - [`HookView`]: a tag-scoped façade multiplexing many logical channels
//!   onto one shared hook

pub mod chain;
pub mod handler;
pub mod hook;
pub mod id;
pub mod tags;
pub mod view;

pub use chain::{Next, Terminal, noop};
pub use handler::{Handler, HandlerInfo};
pub use hook::Hook;
pub use id::HandlerId;
pub use tags::TagSet;
pub use view::HookView;

/// Boxed future returned by handlers and terminal continuations.
pub use futures::future::BoxFuture;
