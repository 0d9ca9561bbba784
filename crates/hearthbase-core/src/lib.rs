//! # hearthbase-core
//!
//! Core crate for Hearthbase. Contains configuration schemas, typed
//! identifiers, record and collection payloads, the lifecycle event
//! payloads carried through hooks, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Hearthbase crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
