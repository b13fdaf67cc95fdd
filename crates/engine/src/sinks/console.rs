//! ConsoleSink - writes records to stdout

use std::io::Write;

use contracts::{LogError, LogSink};

/// The default destination: process stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    async fn write(&mut self, record: &[u8]) -> Result<usize, LogError> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(record)
            .and_then(|()| stdout.flush())
            .map_err(|e| LogError::sink_write(self.name(), e.to_string()))?;
        Ok(record.len())
    }

    async fn flush(&mut self) -> Result<(), LogError> {
        std::io::stdout()
            .flush()
            .map_err(|e| LogError::sink_write(self.name(), e.to_string()))
    }

    async fn close(&mut self) -> Result<(), LogError> {
        // Stdout is never closed by the process.
        Ok(())
    }
}
