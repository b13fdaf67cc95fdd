//! MemorySink - capturing in-memory sink
//!
//! Records each write as one atomic unit, which makes it the sink of
//! choice for exercising the write guard and the error path in tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use contracts::{LogError, LogSink};

use crate::engine::SharedSink;

/// In-memory capturing sink.
pub struct MemorySink {
    name: String,
    records: Vec<String>,
    fail_writes: bool,
    delay: Option<Duration>,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
            fail_writes: false,
            delay: None,
        }
    }

    /// A sink that rejects every write.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(name)
        }
    }

    /// A sink whose writes take `delay` to complete.
    pub fn with_delay(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(name)
        }
    }

    /// Convenience: a new sink already behind the shared write guard.
    pub fn shared(name: impl Into<String>) -> SharedSink<Self> {
        Arc::new(Mutex::new(Self::new(name)))
    }

    /// Shared variant of [`MemorySink::failing`].
    pub fn shared_failing(name: impl Into<String>) -> SharedSink<Self> {
        Arc::new(Mutex::new(Self::failing(name)))
    }

    /// Shared variant of [`MemorySink::with_delay`].
    pub fn shared_with_delay(name: impl Into<String>, delay: Duration) -> SharedSink<Self> {
        Arc::new(Mutex::new(Self::with_delay(name, delay)))
    }

    /// Every record captured so far, one entry per write call.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// All captured output, concatenated.
    pub fn contents(&self) -> String {
        self.records.concat()
    }
}

impl LogSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&mut self, record: &[u8]) -> Result<usize, LogError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes {
            return Err(LogError::sink_write(&self.name, "injected write failure"));
        }
        self.records
            .push(String::from_utf8_lossy(record).into_owned());
        Ok(record.len())
    }

    async fn flush(&mut self) -> Result<(), LogError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), LogError> {
        Ok(())
    }
}
