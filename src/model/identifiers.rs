//! Core identifier newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a story item across content snapshots.
///
/// Opaque to the engine: only equality and hashing are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(u64);

impl StoryId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for StoryId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
