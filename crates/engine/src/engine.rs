//! Engine facade: shared sink guard, queues, and lifecycle control.

use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use contracts::{EngineConfig, LogError, LogSink, WriteFailure};

use crate::counters::EngineCounters;
use crate::dispatcher::Dispatcher;
use crate::format::format_record;
use crate::sinks::ConsoleSink;

/// A sink shared between the engine and its caller.
///
/// The mutex is the write guard: at most one write to the sink executes at
/// any instant, whichever path it arrives through.
pub type SharedSink<S> = Arc<Mutex<S>>;

/// One logging session over a single destination sink.
///
/// Constructed once with a sink and two queue capacities; not reusable
/// after shutdown. The engine references the sink but never opens or
/// closes it.
pub struct Engine<S: LogSink> {
    sink: SharedSink<S>,
    intake_tx: mpsc::Sender<String>,
    error_rx: Option<mpsc::Receiver<WriteFailure>>,
    shutdown_tx: watch::Sender<bool>,
    counters: Arc<EngineCounters>,
    dispatcher: Option<Dispatcher<S>>,
}

impl Engine<ConsoleSink> {
    /// Create an engine writing to the default console destination.
    pub fn with_console(config: EngineConfig) -> Self {
        Self::new(ConsoleSink::new(), config)
    }
}

impl<S: LogSink + Send + 'static> Engine<S> {
    /// Create an engine owning the guard around `sink`.
    pub fn new(sink: S, config: EngineConfig) -> Self {
        Self::from_shared(Arc::new(Mutex::new(sink)), config)
    }

    /// Create an engine over an already shared sink.
    ///
    /// The caller keeps its own handle to the `Arc` and stays responsible
    /// for closing the sink; the engine only writes through the guard.
    /// Queue capacities of zero are normalized to one. No I/O happens
    /// here.
    pub fn from_shared(sink: SharedSink<S>, config: EngineConfig) -> Self {
        let config = config.normalized();
        let (intake_tx, intake_rx) = mpsc::channel(config.message_capacity);
        let (error_tx, error_rx) = mpsc::channel(config.error_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let counters = Arc::new(EngineCounters::new());

        let dispatcher = Dispatcher::new(
            Arc::clone(&sink),
            intake_rx,
            error_tx,
            shutdown_rx,
            config.max_concurrent_writes,
            Arc::clone(&counters),
        );

        Self {
            sink,
            intake_tx,
            error_rx: Some(error_rx),
            shutdown_tx,
            counters,
            dispatcher: Some(dispatcher),
        }
    }

    /// Synchronous write path.
    ///
    /// Blocks the caller for the full critical section: acquire the write
    /// guard, format, write, release. Any I/O error comes straight back;
    /// the intake and error queues are never involved.
    pub async fn write(&self, raw: &str) -> Result<usize, LogError> {
        let mut sink = self.sink.lock().await;
        let record = format_record(raw);
        sink.write(record.as_bytes()).await
    }

    /// Send-only handle to the intake queue.
    ///
    /// Sends block once the queue is at capacity; that backpressure is the
    /// only flow control on the asynchronous path.
    pub fn intake(&self) -> mpsc::Sender<String> {
        self.intake_tx.clone()
    }

    /// Take the receive-only handle to the error outtake queue.
    ///
    /// Yields `None` on the second call. Consumers should keep draining
    /// it; failures arriving while it is full are dropped and counted.
    pub fn take_errors(&mut self) -> Option<mpsc::Receiver<WriteFailure>> {
        self.error_rx.take()
    }

    /// Shared handle to the sink guard, e.g. for closing a file sink on
    /// exit.
    pub fn sink(&self) -> SharedSink<S> {
        Arc::clone(&self.sink)
    }

    /// Shared handle to the engine counters.
    pub fn counters(&self) -> Arc<EngineCounters> {
        Arc::clone(&self.counters)
    }

    /// Spawn the dispatcher onto the runtime.
    ///
    /// The returned handle resolves once shutdown has drained all
    /// in-flight writes. Fails with [`LogError::AlreadyStarted`] on a
    /// second call.
    pub fn start(&mut self) -> Result<JoinHandle<()>, LogError> {
        let dispatcher = self.dispatcher.take().ok_or(LogError::AlreadyStarted)?;
        Ok(tokio::spawn(dispatcher.run()))
    }

    /// Request shutdown.
    ///
    /// Writes already claimed by the dispatcher complete before the
    /// `start` handle resolves. Messages still queued in intake are NOT
    /// flushed - a known gap, kept deliberately.
    pub fn stop(&self) {
        debug!("engine stop requested");
        let _ = self.shutdown_tx.send(true);
    }
}
