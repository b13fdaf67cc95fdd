//! Engine counters for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one engine instance
#[derive(Debug, Default)]
pub struct EngineCounters {
    /// Messages pulled from intake and handed to a write task
    dispatched: AtomicU64,
    /// Write tasks that completed successfully
    completed_writes: AtomicU64,
    /// Write tasks whose sink write failed
    failed_writes: AtomicU64,
    /// Write failures dropped because the error queue was full or closed
    dropped_errors: AtomicU64,
}

impl EngineCounters {
    /// Create new counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Get dispatched message count
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Increment dispatched message count
    pub fn inc_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Get completed write count
    pub fn completed_writes(&self) -> u64 {
        self.completed_writes.load(Ordering::Relaxed)
    }

    /// Increment completed write count
    pub fn inc_completed_writes(&self) {
        self.completed_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failed write count
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Increment failed write count
    pub fn inc_failed_writes(&self) {
        self.failed_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get dropped error report count
    pub fn dropped_errors(&self) -> u64 {
        self.dropped_errors.load(Ordering::Relaxed)
    }

    /// Increment dropped error report count
    pub fn inc_dropped_errors(&self) {
        self.dropped_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            dispatched: self.dispatched(),
            completed_writes: self.completed_writes(),
            failed_writes: self.failed_writes(),
            dropped_errors: self.dropped_errors(),
        }
    }
}

/// Snapshot of engine counters (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct CountersSnapshot {
    pub dispatched: u64,
    pub completed_writes: u64,
    pub failed_writes: u64,
    pub dropped_errors: u64,
}
