//! Record validation and indexing errors.

use thiserror::Error;

/// Errors raised by record validation and collection edits.
///
/// All of these are recoverable: the collection is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A form failed validation.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// A position is outside the current collection bounds.
    #[error("invalid index {position}: collection has {len} records")]
    InvalidIndex {
        /// The rejected position.
        position: usize,
        /// Collection length at the time of the call.
        len: usize,
    },

    /// No record carries the requested id.
    #[error("no record with id {0}")]
    UnknownId(String),
}

impl RecordError {
    /// Shorthand for a [`RecordError::ValidationFailed`].
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::ValidationFailed(reason.into())
    }
}
