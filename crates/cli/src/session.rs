//! Stdin-to-logger session - wires the producer, failure drain, and shutdown.

use std::time::Instant;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use contracts::SinkSpec;
use logger::{create_logger, LoggerConfig, MetricsSnapshot};

use crate::error::CliError;

/// Session configuration
pub struct SessionConfig {
    /// Sink the logger writes to
    pub sink: SinkSpec,
    /// Logger channel capacities
    pub logger: LoggerConfig,
}

/// Statistics from a completed session
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Lines read from stdin and submitted to the logger
    pub lines_submitted: u64,

    /// Wall-clock duration in seconds
    pub duration_secs: f64,

    /// Failures observed on the failure channel
    pub failures_observed: u64,

    /// Final logger metrics
    pub metrics: MetricsSnapshot,
}

impl RunSummary {
    /// Lines submitted per second
    pub fn lines_per_sec(&self) -> f64 {
        if self.duration_secs > 0.0 {
            self.lines_submitted as f64 / self.duration_secs
        } else {
            0.0
        }
    }

    /// Print human-readable summary
    pub fn print_summary(&self) {
        println!("\nSession summary");
        println!("   ├─ Duration: {:.2}s", self.duration_secs);
        println!("   ├─ Lines submitted: {}", self.lines_submitted);
        println!("   ├─ Lines/s: {:.2}", self.lines_per_sec());
        println!("   ├─ Written: {}", self.metrics.write_count);
        println!("   ├─ Failed: {}", self.metrics.failure_count);
        println!(
            "   └─ Failure reports dropped: {}",
            self.metrics.dropped_reports
        );
    }
}

/// Run the stdin-to-log session to completion.
///
/// Reads lines from standard input and submits each one to the logger. A
/// line consisting of `q` ends the session, as do end-of-input and Ctrl-C.
/// The failure channel is drained for the whole session so failing writes
/// can never pile up unread reports.
pub async fn run_session(config: SessionConfig) -> Result<RunSummary, CliError> {
    let start = Instant::now();

    info!(sink = %config.sink.name, kind = ?config.sink.kind, "Creating logger");
    let (logger, mut handle) = create_logger(&config.sink, config.logger)?;

    let sender = handle.sender();
    let mut failures = handle
        .take_failures()
        .ok_or(CliError::FailuresUnavailable)?;
    let metrics = handle.metrics();

    // Failure consumer: report each failed write and count it. Ends when the
    // logger closes the failure channel during shutdown.
    let drain = tokio::spawn(async move {
        let mut observed = 0u64;
        while let Some(failure) = failures.recv().await {
            error!(sink = %failure.sink_name, error = %failure.error, "Write failed");
            observed += 1;
        }
        observed
    });

    let logger_join = logger.spawn();

    let mut lines_submitted = 0u64;
    let mut pending_err: Option<CliError> = None;
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            next = lines.next_line() => match next {
                Ok(Some(line)) => {
                    if line.trim() == "q" {
                        info!("Quit requested");
                        break;
                    }
                    if sender.send(line).await.is_err() {
                        warn!("Logger intake closed, ending session");
                        break;
                    }
                    lines_submitted += 1;
                }
                Ok(None) => {
                    info!("End of input");
                    break;
                }
                Err(e) => {
                    pending_err = Some(CliError::Io(e));
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, shutting down");
                break;
            }
        }
    }

    // Two-phase shutdown: request, then wait for the drain to finish.
    handle.stop().await?;
    let _ = logger_join.await;
    let failures_observed = drain.await.unwrap_or(0);

    if let Some(e) = pending_err {
        return Err(e);
    }

    Ok(RunSummary {
        lines_submitted,
        duration_secs: start.elapsed().as_secs_f64(),
        failures_observed,
        metrics: metrics.snapshot(),
    })
}
