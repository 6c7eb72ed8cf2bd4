//! Typed identifier newtypes.
//!
//! Unlike randomly generated ids, both identifiers here come from outside the
//! core: a [`LampId`] is assigned by the bridge that owns the lamp, and a
//! [`GenerationId`] is handed out sequentially by the scheduler.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a single addressable light endpoint.
///
/// Assigned by the external bridge; the core never creates or interprets it
/// beyond equality and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LampId(String);

impl LampId {
    /// Wrap a bridge-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LampId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for LampId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LampId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of one scene-application invocation.
///
/// Monotonically increasing within a scheduler, for debugging and tracing; a
/// higher id always belongs to a newer generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationId(u64);

impl GenerationId {
    /// Wrap a sequence number.
    #[must_use]
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Access the sequence number.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
