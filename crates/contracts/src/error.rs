//! Layered error definitions
//!
//! Categorized by source: sink / engine lifecycle / io

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum LogError {
    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink}' write error: {message}")]
    SinkWrite { sink: String, message: String },

    /// Sink already closed
    #[error("sink '{sink}' is closed")]
    SinkClosed { sink: String },

    // ===== Engine Errors =====
    /// Dispatcher already taken by a previous start
    #[error("engine already started")]
    AlreadyStarted,

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a sink closed error
    pub fn sink_closed(sink: impl Into<String>) -> Self {
        Self::SinkClosed { sink: sink.into() }
    }
}
