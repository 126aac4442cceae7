//! Error types for queue operations.

use lq_collections::Full;

/// Error returned by fallible queue operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// Storage could not take the new element. The queue is unchanged and
    /// the rejected string copy has been released.
    #[error("allocation failure: no room for a {len}-byte element")]
    AllocationFailure {
        /// Length in bytes of the rejected value.
        len: usize,
    },
}

impl From<Full<String>> for QueueError {
    fn from(full: Full<String>) -> Self {
        QueueError::AllocationFailure {
            len: full.into_inner().len(),
        }
    }
}
