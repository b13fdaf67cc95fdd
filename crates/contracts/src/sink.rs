//! LogSink trait - engine output interface
//!
//! Defines the abstract interface for log destinations.

use crate::LogError;

/// Byte-stream destination for formatted log records
///
/// The engine never opens or closes a sink on its own; lifetime is the
/// caller's responsibility.
#[trait_variant::make(LogSink: Send)]
pub trait LocalLogSink {
    /// Sink name (used for logging/diagnostics)
    fn name(&self) -> &str;

    /// Write one formatted record, returning the number of bytes written
    ///
    /// # Errors
    /// Returns a write error (should include sink context)
    async fn write(&mut self, record: &[u8]) -> Result<usize, LogError>;

    /// Flush buffered data (if any)
    async fn flush(&mut self) -> Result<(), LogError>;

    /// Close the sink; subsequent writes fail with `SinkClosed`
    async fn close(&mut self) -> Result<(), LogError>;
}
