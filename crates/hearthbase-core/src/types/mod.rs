//! Core type definitions used across the Hearthbase workspace.

pub mod collection;
pub mod id;
pub mod record;

pub use collection::{Collection, CollectionKind};
pub use id::*;
pub use record::Record;
