//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Logger runtime error
    #[error("logger error: {0}")]
    Logger(#[from] logger::LoggerError),

    /// Failure receiver was already taken from the handle
    #[error("failure receiver unavailable")]
    FailuresUnavailable,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
