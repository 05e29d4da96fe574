//! Logger - aggregate root and dispatch loop

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, error, info, instrument};

use contracts::{LineSink, SinkSpec, WriteFailure};

use crate::error::LoggerError;
use crate::handle::{FailureReceiver, LoggerHandle, MessageSender};
use crate::metrics::LoggerMetrics;
use crate::sinks::{create_sink, AnySink, StdoutSink};
use crate::writer;

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Intake queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Failure channel capacity
    #[serde(default = "default_failure_capacity")]
    pub failure_capacity: usize,
}

fn default_queue_capacity() -> usize {
    64
}

fn default_failure_capacity() -> usize {
    16
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            failure_capacity: default_failure_capacity(),
        }
    }
}

/// The logger aggregate.
///
/// Owns the sink behind an exclusive lock, the message intake, the failure
/// side of the report channel, and the two-phase shutdown pair. Exactly one
/// dispatch loop runs per logger; the logger is not restartable once
/// stopped.
pub struct Logger<S: LineSink> {
    name: String,
    sink: Arc<Mutex<S>>,
    intake_rx: mpsc::Receiver<String>,
    failure_tx: mpsc::Sender<WriteFailure>,
    shutdown_rx: oneshot::Receiver<()>,
    done_tx: oneshot::Sender<()>,
    metrics: Arc<LoggerMetrics>,
}

impl<S: LineSink + Send + 'static> Logger<S> {
    /// Create a logger writing to `sink`, plus its control handle.
    pub fn new(sink: S, config: LoggerConfig) -> (Self, LoggerHandle) {
        let name = sink.name().to_string();
        let (msg_tx, intake_rx) = mpsc::channel(config.queue_capacity.max(1));
        let (failure_tx, failure_rx) = mpsc::channel(config.failure_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        let metrics = Arc::new(LoggerMetrics::new());

        let logger = Self {
            name,
            sink: Arc::new(Mutex::new(sink)),
            intake_rx,
            failure_tx,
            shutdown_rx,
            done_tx,
            metrics: Arc::clone(&metrics),
        };

        let handle = LoggerHandle {
            sender: MessageSender { tx: msg_tx },
            failures: Some(FailureReceiver { rx: failure_rx }),
            metrics,
            shutdown_tx,
            done_rx,
        };

        (logger, handle)
    }

    /// Shared metrics of this logger.
    pub fn metrics(&self) -> Arc<LoggerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the dispatch loop until stopped.
    ///
    /// Each received message is dispatched as an independent writer task;
    /// intake never waits on a slow sink. On a shutdown request the intake
    /// is closed, messages already buffered are still dispatched, and the
    /// loop waits for every outstanding writer before closing the sink and
    /// signaling completion. A dropped control handle counts as a shutdown
    /// request.
    #[instrument(name = "logger_run", skip(self), fields(sink = %self.name))]
    pub async fn run(self) {
        let Logger {
            name,
            sink,
            mut intake_rx,
            failure_tx,
            mut shutdown_rx,
            done_tx,
            metrics,
        } = self;

        info!("Logger started");

        let mut writers = JoinSet::new();
        let mut draining = false;

        while !draining {
            tokio::select! {
                maybe_msg = intake_rx.recv() => match maybe_msg {
                    Some(message) => {
                        dispatch(&mut writers, &sink, &failure_tx, &metrics, message);
                        if metrics.dispatched_count().is_multiple_of(100) {
                            debug!(messages = metrics.dispatched_count(), "Logger progress");
                        }
                        // Reap already-finished writers so the set stays small.
                        while let Some(joined) = writers.try_join_next() {
                            reap(joined, &name, &metrics);
                        }
                    }
                    // Every producer dropped its sender: nothing more can arrive.
                    None => draining = true,
                },
                _ = &mut shutdown_rx => {
                    // Stop accepting new sends; messages already buffered stay
                    // receivable and are dispatched below.
                    intake_rx.close();
                    while let Some(message) = intake_rx.recv().await {
                        dispatch(&mut writers, &sink, &failure_tx, &metrics, message);
                    }
                    draining = true;
                }
            }
        }

        debug!(outstanding = metrics.in_flight(), "Intake closed, draining writers");

        while let Some(joined) = writers.join_next().await {
            reap(joined, &name, &metrics);
        }

        // No writer can be racing for the lock at this point.
        {
            let mut sink = sink.lock().await;
            if let Err(e) = sink.flush().await {
                error!(sink = %name, error = %e, "Flush failed on shutdown");
            }
            if let Err(e) = sink.close().await {
                error!(sink = %name, error = %e, "Close failed on shutdown");
            }
        }

        // Closing the failure channel lets a consumer observe the end of reports.
        drop(failure_tx);

        let _ = done_tx.send(());

        info!(
            written = metrics.write_count(),
            failed = metrics.failure_count(),
            "Logger shutdown complete"
        );
    }

    /// Spawn the dispatch loop as a background task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

impl Logger<StdoutSink> {
    /// Logger writing to process standard output, the construction default
    /// when no sink is configured.
    pub fn stdout(config: LoggerConfig) -> (Self, LoggerHandle) {
        Self::new(StdoutSink::default(), config)
    }
}

/// Spawn one writer task for `message` and account for it.
fn dispatch<S: LineSink + Send + 'static>(
    writers: &mut JoinSet<()>,
    sink: &Arc<Mutex<S>>,
    failure_tx: &mpsc::Sender<WriteFailure>,
    metrics: &Arc<LoggerMetrics>,
    message: String,
) {
    metrics.inc_dispatched_count();
    metrics.inc_in_flight();
    writers.spawn(writer::write_one(
        Arc::clone(sink),
        message,
        failure_tx.clone(),
        Arc::clone(metrics),
    ));
}

/// Account for one joined writer task.
///
/// A panicking sink is contained at the task boundary: the lock was released
/// by unwind, and the outstanding-work accounting still completes so drain
/// can finish.
fn reap(joined: Result<(), JoinError>, name: &str, metrics: &LoggerMetrics) {
    metrics.dec_in_flight();
    if let Err(e) = joined {
        metrics.inc_failure_count();
        error!(sink = %name, error = ?e, "Writer task panicked");
    }
}

/// Convenience function to create a logger from a sink spec
pub fn create_logger(
    spec: &SinkSpec,
    config: LoggerConfig,
) -> Result<(Logger<AnySink>, LoggerHandle), LoggerError> {
    let sink = create_sink(spec)?;
    Ok(Logger::new(sink, config))
}
