//! Logger error types

use thiserror::Error;

/// Logger-specific errors
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Intake channel closed, the logger is stopping or stopped
    #[error("intake closed, logger is stopping or stopped")]
    IntakeClosed,

    /// Intake queue at capacity, message not accepted
    #[error("intake queue full, message not accepted")]
    IntakeFull,

    /// Dispatch loop went away before signaling shutdown completion
    #[error("dispatch loop terminated without completing shutdown")]
    ShutdownInterrupted,

    /// Sink error (from contract)
    #[error("sink error: {0}")]
    Contract(#[from] contracts::ContractError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
