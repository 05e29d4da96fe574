//! Write failure report delivered on the failure channel.

use crate::ContractError;

/// A single failed write, as observed by the writer task.
///
/// Delivered at most once per failed write and never retried. Carries no
/// retry metadata.
#[derive(Debug)]
pub struct WriteFailure {
    /// Name of the sink that rejected the write
    pub sink_name: String,
    /// The underlying sink error
    pub error: ContractError,
}

impl WriteFailure {
    /// Create a new failure report
    pub fn new(sink_name: impl Into<String>, error: ContractError) -> Self {
        Self {
            sink_name: sink_name.into(),
            error,
        }
    }
}

impl std::fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "write to sink '{}' failed: {}", self.sink_name, self.error)
    }
}
