//! # Contracts
//!
//! Frozen interface contracts shared by the logging engine and its callers:
//! the sink trait, the error taxonomy, and the engine configuration.
//! Business crates depend on this crate only; reverse dependencies are
//! prohibited.

mod config;
mod error;
mod failure;
mod sink;

pub use config::{EngineConfig, DEFAULT_MAX_CONCURRENT_WRITES};
pub use error::LogError;
pub use failure::WriteFailure;
pub use sink::*;
