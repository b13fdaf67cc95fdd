//! Dispatcher - main loop turning queued messages into write tasks

use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use contracts::{LogSink, WriteFailure};

use crate::counters::EngineCounters;
use crate::format::format_record;

/// The dispatch loop behind an engine's asynchronous write path.
///
/// Pulls messages off the intake queue in FIFO order and runs each one as
/// its own write task. Concurrency is capped by a semaphore sized at
/// construction; when the pool is saturated the loop itself waits, so
/// backpressure reaches producers through the bounded intake queue.
/// Completion order of the spawned tasks is unordered - the write guard
/// only serializes the writes themselves.
pub struct Dispatcher<S: LogSink> {
    sink: Arc<Mutex<S>>,
    intake_rx: mpsc::Receiver<String>,
    error_tx: mpsc::Sender<WriteFailure>,
    shutdown_rx: watch::Receiver<bool>,
    write_permits: Arc<Semaphore>,
    counters: Arc<EngineCounters>,
    in_flight: JoinSet<()>,
}

impl<S: LogSink + Send + 'static> Dispatcher<S> {
    pub(crate) fn new(
        sink: Arc<Mutex<S>>,
        intake_rx: mpsc::Receiver<String>,
        error_tx: mpsc::Sender<WriteFailure>,
        shutdown_rx: watch::Receiver<bool>,
        max_concurrent_writes: usize,
        counters: Arc<EngineCounters>,
    ) -> Self {
        Self {
            sink,
            intake_rx,
            error_tx,
            shutdown_rx,
            write_permits: Arc::new(Semaphore::new(max_concurrent_writes)),
            counters,
            in_flight: JoinSet::new(),
        }
    }

    /// Run the dispatch loop.
    ///
    /// Returns after a shutdown request (or a fully closed intake) once
    /// every in-flight write task has completed. Shutdown is terminal:
    /// messages still sitting in the intake queue are dropped, not
    /// flushed.
    pub async fn run(mut self) {
        info!(
            workers = self.write_permits.available_permits(),
            "dispatcher started"
        );

        loop {
            tokio::select! {
                maybe_message = self.intake_rx.recv() => match maybe_message {
                    Some(message) => self.dispatch(message).await,
                    None => {
                        debug!("intake closed, draining in-flight writes");
                        break;
                    }
                },
                changed = self.shutdown_rx.changed() => {
                    // A dropped shutdown sender counts as a request too.
                    if changed.is_err() || *self.shutdown_rx.borrow_and_update() {
                        debug!("shutdown requested, draining in-flight writes");
                        break;
                    }
                },
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = ?e, "write task panicked");
                    }
                },
            }
        }

        self.drain().await;

        let snapshot = self.counters.snapshot();
        info!(
            dispatched = snapshot.dispatched,
            completed = snapshot.completed_writes,
            failed = snapshot.failed_writes,
            dropped_errors = snapshot.dropped_errors,
            "dispatcher stopped"
        );
    }

    /// Hand one message to a write task, waiting for a pool permit first.
    async fn dispatch(&mut self, message: String) {
        let permit = match Arc::clone(&self.write_permits).acquire_owned().await {
            Ok(permit) => permit,
            // Closed only if the semaphore were dropped, which never happens.
            Err(_) => return,
        };

        self.counters.inc_dispatched();

        let sink = Arc::clone(&self.sink);
        let error_tx = self.error_tx.clone();
        let counters = Arc::clone(&self.counters);

        self.in_flight.spawn(async move {
            let result = {
                let mut sink = sink.lock().await;
                let record = format_record(&message);
                sink.write(record.as_bytes()).await
            };
            drop(permit);

            match result {
                Ok(_) => counters.inc_completed_writes(),
                Err(error) => {
                    counters.inc_failed_writes();
                    report_failure(&error_tx, &counters, WriteFailure::new(message, error));
                }
            }
        });
    }

    /// Wait for every in-flight write task to finish.
    async fn drain(&mut self) {
        while let Some(joined) = self.in_flight.join_next().await {
            if let Err(e) = joined {
                error!(error = ?e, "write task panicked");
            }
        }
    }
}

/// Deliver a write failure onto the error outtake queue without blocking.
///
/// A full (or closed) queue drops the failure and bumps `dropped_errors`;
/// no write task ever parks on error delivery.
fn report_failure(
    error_tx: &mpsc::Sender<WriteFailure>,
    counters: &EngineCounters,
    failure: WriteFailure,
) {
    match error_tx.try_send(failure) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(failure)) => {
            counters.inc_dropped_errors();
            warn!(
                message = %failure.message.trim_end(),
                error = %failure.error,
                "error queue full, write failure dropped"
            );
        }
        Err(mpsc::error::TrySendError::Closed(failure)) => {
            counters.inc_dropped_errors();
            debug!(
                message = %failure.message.trim_end(),
                "error queue closed, write failure dropped"
            );
        }
    }
}
