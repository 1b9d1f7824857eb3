//! Store error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    #[track_caller]
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::new(format!("Store lock poisoned: {}", err))
    }
}
