//! Sink implementations
//!
//! Contains StdoutSink, FileSink, and MemorySink, plus the factory that
//! resolves a [`SinkSpec`] into a concrete sink at construction time.

mod file;
mod memory;
mod stdout;

pub use self::file::FileSink;
pub use self::memory::MemorySink;
pub use self::stdout::StdoutSink;

use contracts::{ContractError, LineSink, SinkKind, SinkSpec};

/// A sink built from configuration.
///
/// Closed enum rather than a trait object: the sink trait's async methods
/// are not object safe, and the set of built-in sinks is fixed.
#[derive(Debug)]
pub enum AnySink {
    Stdout(StdoutSink),
    File(FileSink),
    Memory(MemorySink),
}

impl LineSink for AnySink {
    fn name(&self) -> &str {
        match self {
            AnySink::Stdout(s) => s.name(),
            AnySink::File(s) => s.name(),
            AnySink::Memory(s) => s.name(),
        }
    }

    async fn write(&mut self, line: &[u8]) -> Result<usize, ContractError> {
        match self {
            AnySink::Stdout(s) => s.write(line).await,
            AnySink::File(s) => s.write(line).await,
            AnySink::Memory(s) => s.write(line).await,
        }
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        match self {
            AnySink::Stdout(s) => s.flush().await,
            AnySink::File(s) => s.flush().await,
            AnySink::Memory(s) => s.flush().await,
        }
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        match self {
            AnySink::Stdout(s) => s.close().await,
            AnySink::File(s) => s.close().await,
            AnySink::Memory(s) => s.close().await,
        }
    }
}

/// Create a sink from configuration
pub fn create_sink(spec: &SinkSpec) -> Result<AnySink, ContractError> {
    match spec.kind {
        SinkKind::Stdout => Ok(AnySink::Stdout(StdoutSink::new(&spec.name))),
        SinkKind::File => Ok(AnySink::File(FileSink::from_params(
            &spec.name,
            &spec.params,
        )?)),
        SinkKind::Memory => Ok(AnySink::Memory(MemorySink::new(&spec.name))),
    }
}
