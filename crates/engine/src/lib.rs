//! # Engine
//!
//! Concurrent logging core.
//!
//! Responsibilities:
//! - Serialize writes from synchronous callers and the asynchronous
//!   message stream into one shared sink
//! - Timestamp and newline-normalize every record
//! - Report asynchronous write failures on a dedicated error queue
//!   instead of crashing producers
//!
//! There are two ways to write through an [`Engine`]:
//! - Synchronously, via [`Engine::write`]
//! - Asynchronously, via the sender returned by [`Engine::intake`],
//!   consumed by the dispatcher started with [`Engine::start`]

pub mod counters;
pub mod dispatcher;
pub mod engine;
pub mod format;
pub mod sinks;

pub use contracts::{EngineConfig, LogError, LogSink, WriteFailure};
pub use counters::{CountersSnapshot, EngineCounters};
pub use dispatcher::Dispatcher;
pub use engine::{Engine, SharedSink};
pub use format::format_record;
pub use sinks::{ConsoleSink, FileSink, MemorySink};
