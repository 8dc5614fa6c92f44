//! Error types for guarded execution

use thiserror::Error;

/// Errors returned by [`Breaker::execute`](crate::Breaker::execute).
///
/// The operation's own error type `E` passes through verbatim, so callers
/// can branch on "did we time out" vs "did the operation itself fail" by
/// matching on the variant rather than comparing message strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError<E> {
    /// The deadline elapsed before the operation completed.
    #[error("operation exceeded its deadline")]
    Timeout,

    /// The operation ran to completion and reported a failure.
    #[error("operation failed: {0}")]
    Operation(E),
}

impl<E> GuardError<E> {
    /// Check if the timer won the race.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GuardError::Timeout)
    }

    /// Extract the operation's own error, if the operation (not the timer)
    /// was the side that failed the call.
    pub fn into_operation(self) -> Option<E> {
        match self {
            GuardError::Operation(err) => Some(err),
            GuardError::Timeout => None,
        }
    }
}
