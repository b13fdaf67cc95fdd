//! FileSink - writes records to a file on disk

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use contracts::{LogError, LogSink};

/// Sink backed by a file; created (or truncated) at construction.
pub struct FileSink {
    name: String,
    file: Option<File>,
}

impl FileSink {
    /// Create or truncate the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let name = path.as_ref().display().to_string();
        let file = File::create(path.as_ref())?;
        Ok(Self {
            name,
            file: Some(file),
        })
    }
}

impl LogSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&mut self, record: &[u8]) -> Result<usize, LogError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LogError::sink_closed(&self.name))?;
        file.write_all(record)
            .map_err(|e| LogError::sink_write(&self.name, e.to_string()))?;
        Ok(record.len())
    }

    async fn flush(&mut self) -> Result<(), LogError> {
        match self.file.as_mut() {
            Some(file) => file
                .flush()
                .map_err(|e| LogError::sink_write(&self.name, e.to_string())),
            None => Err(LogError::sink_closed(&self.name)),
        }
    }

    async fn close(&mut self) -> Result<(), LogError> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .map_err(|e| LogError::sink_write(&self.name, e.to_string()))?;
            debug!(sink = %self.name, "FileSink closed");
        }
        Ok(())
    }
}
