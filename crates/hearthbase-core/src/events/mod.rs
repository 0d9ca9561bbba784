//! Lifecycle event payloads carried through hooks.
//!
//! Every event here is handed to hook handlers as `&mut` so earlier
//! handlers can adjust what later handlers and the base action observe.

pub mod collection;
pub mod model;
pub mod record;
pub mod system;

pub use collection::CollectionEvent;
pub use model::{Model, ModelEvent};
pub use record::RecordEvent;
pub use system::{BootstrapEvent, ServeEvent, TerminateEvent};
