//! Direction-restricted channel views and shutdown control
//!
//! Producers get a [`MessageSender`] and cannot read failures through it;
//! consumers get a [`FailureReceiver`] and cannot inject messages through it.
//! The discipline is enforced at the type level, not by convention.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use contracts::WriteFailure;

use crate::error::LoggerError;
use crate::metrics::LoggerMetrics;

/// Send-only view of the message intake channel.
///
/// Cloneable; every producer keeps its own. Submitting is fire-and-forget:
/// write failures never come back through this handle.
#[derive(Clone)]
pub struct MessageSender {
    pub(crate) tx: mpsc::Sender<String>,
}

impl MessageSender {
    /// Submit a message, waiting for intake capacity if the queue is full.
    ///
    /// # Errors
    /// Returns [`LoggerError::IntakeClosed`] once the logger is stopping or
    /// stopped.
    pub async fn send(&self, message: impl Into<String>) -> Result<(), LoggerError> {
        self.tx
            .send(message.into())
            .await
            .map_err(|_| LoggerError::IntakeClosed)
    }

    /// Submit a message without waiting.
    ///
    /// # Errors
    /// Returns [`LoggerError::IntakeFull`] when the queue is at capacity and
    /// [`LoggerError::IntakeClosed`] once the logger is stopping or stopped.
    pub fn try_send(&self, message: impl Into<String>) -> Result<(), LoggerError> {
        self.tx.try_send(message.into()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => LoggerError::IntakeFull,
            mpsc::error::TrySendError::Closed(_) => LoggerError::IntakeClosed,
        })
    }
}

/// Receive-only view of the failure channel.
pub struct FailureReceiver {
    pub(crate) rx: mpsc::Receiver<WriteFailure>,
}

impl FailureReceiver {
    /// Await the next write failure.
    ///
    /// Returns `None` once the logger has stopped and every pending report
    /// has been drained.
    pub async fn recv(&mut self) -> Option<WriteFailure> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<WriteFailure> {
        self.rx.try_recv().ok()
    }
}

/// Control handle for a running logger.
///
/// Holds the producer side, the failure side, and the two-phase shutdown
/// pair (request, completion).
pub struct LoggerHandle {
    pub(crate) sender: MessageSender,
    pub(crate) failures: Option<FailureReceiver>,
    pub(crate) metrics: Arc<LoggerMetrics>,
    pub(crate) shutdown_tx: oneshot::Sender<()>,
    pub(crate) done_rx: oneshot::Receiver<()>,
}

impl LoggerHandle {
    /// A cloneable send-only view of the intake channel.
    pub fn sender(&self) -> MessageSender {
        self.sender.clone()
    }

    /// Take the receive-only failure view. Yields `Some` exactly once.
    pub fn take_failures(&mut self) -> Option<FailureReceiver> {
        self.failures.take()
    }

    /// Shared metrics of the logger this handle controls.
    pub fn metrics(&self) -> Arc<LoggerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Request shutdown and wait for the dispatch loop to drain and exit.
    ///
    /// Messages already buffered on the intake at the moment of the request
    /// are still written; sends racing with the request fail fast at the
    /// producer. Consuming `self` makes a second stop unrepresentable.
    ///
    /// # Errors
    /// Returns [`LoggerError::ShutdownInterrupted`] when the dispatch loop
    /// terminated without signaling completion.
    pub async fn stop(self) -> Result<(), LoggerError> {
        // A rejected request means the loop is already past the point of
        // listening; completion is still signaled in that case.
        let _ = self.shutdown_tx.send(());
        self.done_rx
            .await
            .map_err(|_| LoggerError::ShutdownInterrupted)
    }
}
