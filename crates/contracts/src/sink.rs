//! LineSink trait - logger output interface
//!
//! Defines the abstract interface for sinks.

use crate::ContractError;

/// Byte-sink trait
///
/// All sink implementations must implement this trait. A write either
/// accepts the whole line, reports how many bytes it took, or fails; no
/// partial-write recovery is attempted by callers.
#[trait_variant::make(LineSink: Send)]
pub trait LocalLineSink {
    /// Sink name (used for logging/metrics and failure reports)
    fn name(&self) -> &str;

    /// Write one formatted line
    ///
    /// Returns the number of bytes the sink accepted.
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, line: &[u8]) -> Result<usize, ContractError>;

    /// Flush buffered output (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
