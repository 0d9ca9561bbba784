//! Handler identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix of ids produced by [`IdSequence`].
pub const GENERATED_PREFIX: &str = "__handler_";

/// Identifier of a handler, unique within one [`Hook`](crate::Hook).
///
/// Ids supplied by callers may be any string; binding a handler under an
/// id that is already present replaces the existing handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(String);

impl HandlerId {
    /// Creates an id from an arbitrary string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id was produced by a hook rather than supplied by a caller.
    pub fn is_generated(&self) -> bool {
        self.0.starts_with(GENERATED_PREFIX)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HandlerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for HandlerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for HandlerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Monotonic id source owned by a single hook.
#[derive(Debug, Default)]
pub(crate) struct IdSequence {
    counter: AtomicU64,
}

impl IdSequence {
    /// Returns the next id. Ids are never reused for the lifetime of the sequence.
    pub(crate) fn next_id(&self) -> HandlerId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        HandlerId(format!("{GENERATED_PREFIX}{n}"))
    }
}
