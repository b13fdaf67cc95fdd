//! Write failure record delivered on the error outtake queue.

use thiserror::Error;

use crate::LogError;

/// A failed asynchronous write: the raw message plus the underlying error.
///
/// The producer that enqueued the message is never notified directly; this
/// record is what a separate error consumer observes instead.
#[derive(Debug, Error)]
#[error("failed to write {message:?}: {error}")]
pub struct WriteFailure {
    /// Raw message whose write failed
    pub message: String,
    /// Underlying write error
    pub error: LogError,
}

impl WriteFailure {
    pub fn new(message: impl Into<String>, error: LogError) -> Self {
        Self {
            message: message.into(),
            error,
        }
    }
}
