//! Newtype identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The detector's numeric class identifier, an index into the class catalog.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassIndex(pub u64);

impl ClassIndex {
    /// Creates a new ClassIndex.
    #[inline]
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ClassIndex {
    fn from(index: u64) -> Self {
        ClassIndex::new(index)
    }
}

impl fmt::Debug for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassIndex({})", self.0)
    }
}

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
