//! Engine configuration with capacity normalization.

/// Default bound on concurrent write tasks.
pub const DEFAULT_MAX_CONCURRENT_WRITES: usize = 4;

/// Configuration for one logging engine instance.
///
/// Zero values are defaults, not errors; see [`EngineConfig::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Capacity of the intake queue of raw messages
    pub message_capacity: usize,
    /// Capacity of the error outtake queue
    pub error_capacity: usize,
    /// Maximum number of concurrently running write tasks
    pub max_concurrent_writes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            message_capacity: 1,
            error_capacity: 1,
            max_concurrent_writes: DEFAULT_MAX_CONCURRENT_WRITES,
        }
    }
}

impl EngineConfig {
    /// Create a config with the given queue capacities and the default
    /// write-task bound.
    pub fn new(message_capacity: usize, error_capacity: usize) -> Self {
        Self {
            message_capacity,
            error_capacity,
            ..Self::default()
        }
    }

    /// Replace zero capacities with 1 and a zero worker bound with the
    /// default. Silent substitution, never an error.
    pub fn normalized(self) -> Self {
        Self {
            message_capacity: self.message_capacity.max(1),
            error_capacity: self.error_capacity.max(1),
            max_concurrent_writes: if self.max_concurrent_writes == 0 {
                DEFAULT_MAX_CONCURRENT_WRITES
            } else {
                self.max_concurrent_writes
            },
        }
    }
}
