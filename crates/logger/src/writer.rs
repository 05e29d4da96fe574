//! Writer task - one formatted write under exclusive sink access

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use contracts::{ContractError, LineSink, WriteFailure};

use crate::format::format_line;
use crate::metrics::LoggerMetrics;

/// Format one message and write it to the shared sink.
///
/// Never surfaces an error to the dispatch loop: a sink failure is forwarded
/// to the failure channel and the task completes normally either way. The
/// mutex guard is scoped, so it is released on every exit path, including a
/// panic inside the sink; a failing write cannot leave the lock held.
pub(crate) async fn write_one<S: LineSink>(
    sink: Arc<Mutex<S>>,
    message: String,
    failure_tx: mpsc::Sender<WriteFailure>,
    metrics: Arc<LoggerMetrics>,
) {
    let line = format_line(&message);
    let bytes = line.as_bytes();

    let outcome = {
        let mut sink = sink.lock().await;
        let sink_name = sink.name().to_string();
        let result = match sink.write(bytes).await {
            Ok(n) if n < bytes.len() => {
                Err(ContractError::short_write(&sink_name, n, bytes.len()))
            }
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };
        result.map_err(|error| WriteFailure::new(sink_name, error))
    };

    match outcome {
        Ok(()) => metrics.inc_write_count(),
        Err(failure) => {
            metrics.inc_failure_count();
            report(failure, &failure_tx, &metrics);
        }
    }
}

/// Hand a failure to the failure channel without ever blocking the writer.
///
/// A full channel drops the report and counts the drop; a closed channel
/// means no consumer exists anymore, which is the consumer's choice.
fn report(
    failure: WriteFailure,
    failure_tx: &mpsc::Sender<WriteFailure>,
    metrics: &LoggerMetrics,
) {
    match failure_tx.try_send(failure) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(f)) => {
            metrics.inc_dropped_reports();
            warn!(sink = %f.sink_name, "Failure channel full, report dropped");
        }
        Err(mpsc::error::TrySendError::Closed(f)) => {
            debug!(sink = %f.sink_name, "No failure consumer, report discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    struct RejectingSink;

    impl LineSink for RejectingSink {
        fn name(&self) -> &str {
            "rejecting"
        }

        async fn write(&mut self, _line: &[u8]) -> Result<usize, ContractError> {
            Err(ContractError::sink_write("rejecting", "always fails"))
        }

        async fn flush(&mut self) -> Result<(), ContractError> {
            Ok(())
        }

        async fn close(&mut self) -> Result<(), ContractError> {
            Ok(())
        }
    }

    struct NibblingSink;

    impl LineSink for NibblingSink {
        fn name(&self) -> &str {
            "nibbling"
        }

        async fn write(&mut self, line: &[u8]) -> Result<usize, ContractError> {
            Ok(line.len() / 2)
        }

        async fn flush(&mut self) -> Result<(), ContractError> {
            Ok(())
        }

        async fn close(&mut self) -> Result<(), ContractError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_write_one_appends_formatted_line() {
        let sink = MemorySink::new("mem");
        let contents = sink.clone();
        let (failure_tx, _failure_rx) = mpsc::channel(4);
        let metrics = Arc::new(LoggerMetrics::new());

        write_one(
            Arc::new(Mutex::new(sink)),
            "hello".to_string(),
            failure_tx,
            Arc::clone(&metrics),
        )
        .await;

        let written = contents.contents_string();
        assert!(written.ends_with("] - hello\n"));
        assert_eq!(metrics.write_count(), 1);
        assert_eq!(metrics.failure_count(), 0);
    }

    #[tokio::test]
    async fn test_sink_error_becomes_failure_report() {
        let (failure_tx, mut failure_rx) = mpsc::channel(4);
        let metrics = Arc::new(LoggerMetrics::new());

        write_one(
            Arc::new(Mutex::new(RejectingSink)),
            "doomed".to_string(),
            failure_tx,
            Arc::clone(&metrics),
        )
        .await;

        let failure = failure_rx.try_recv().expect("one report expected");
        assert_eq!(failure.sink_name, "rejecting");
        assert_eq!(metrics.failure_count(), 1);
        assert_eq!(metrics.write_count(), 0);
    }

    #[tokio::test]
    async fn test_short_write_is_reported() {
        let (failure_tx, mut failure_rx) = mpsc::channel(4);
        let metrics = Arc::new(LoggerMetrics::new());

        write_one(
            Arc::new(Mutex::new(NibblingSink)),
            "half".to_string(),
            failure_tx,
            Arc::clone(&metrics),
        )
        .await;

        let failure = failure_rx.try_recv().expect("short write reported");
        assert!(matches!(failure.error, ContractError::ShortWrite { .. }));
    }

    #[tokio::test]
    async fn test_full_failure_channel_drops_and_counts() {
        let (failure_tx, _failure_rx) = mpsc::channel(1);
        let metrics = Arc::new(LoggerMetrics::new());
        let sink = Arc::new(Mutex::new(RejectingSink));

        for _ in 0..3 {
            write_one(
                Arc::clone(&sink),
                "x".to_string(),
                failure_tx.clone(),
                Arc::clone(&metrics),
            )
            .await;
        }

        // One report fits, the rest are dropped without blocking.
        assert_eq!(metrics.failure_count(), 3);
        assert_eq!(metrics.dropped_reports(), 2);
    }
}
