//! StdoutSink - writes lines to process standard output

use std::io::Write;

use contracts::{ContractError, LineSink};

/// Sink for the process standard output stream.
///
/// This is the construction default when no sink is configured. Tests that
/// need to observe output substitute a [`MemorySink`](super::MemorySink)
/// instead of capturing the real stream.
#[derive(Debug, Clone)]
pub struct StdoutSink {
    name: String,
}

impl StdoutSink {
    /// Create a new StdoutSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new("stdout")
    }
}

impl LineSink for StdoutSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&mut self, line: &[u8]) -> Result<usize, ContractError> {
        std::io::stdout()
            .lock()
            .write(line)
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        std::io::stdout()
            .lock()
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        std::io::stdout()
            .lock()
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }
}
