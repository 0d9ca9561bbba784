//! # hearthbase-app
//!
//! Application assembly for Hearthbase. Provides:
//!
//! - [`AppHooks`]: every lifecycle hook, constructed once per application
//! - [`App`]: bootstrap/serve/terminate and record/collection writes, each
//!   routed through its hooks with the real action as terminal continuation
//! - [`DataStore`]: the persistence seam, with an in-memory [`MemoryStore`]
//! - [`builtin`]: handlers shipped with the application

pub mod app;
pub mod builtin;
pub mod hooks;
pub mod lifecycle;
pub mod store;

pub use app::App;
pub use hooks::AppHooks;
pub use lifecycle::Operation;
pub use store::{DataStore, MemoryStore};
