//! Error type for forest operations.

use std::fmt;

/// Error returned by fallible forest operations.
///
/// Structural-invariant breakage is never reported through this type; the
/// primitives `debug_assert!` their preconditions and treat violations as
/// bugs, not recoverable conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestError {
    /// Extract or find-extreme on a heap with an empty root ring.
    EmptyHeap,
    /// The node id is stale, or the node is not owned by the given heap.
    KeyNotFound,
    /// The new key does not strictly precede the current one under the
    /// forest's ordering.
    KeyNotDecreased,
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestError::EmptyHeap => write!(f, "heap is empty"),
            ForestError::KeyNotFound => {
                write!(f, "node is not in this heap (stale or foreign id)")
            }
            ForestError::KeyNotDecreased => {
                write!(f, "new key does not precede the current key")
            }
        }
    }
}

impl std::error::Error for ForestError {}
