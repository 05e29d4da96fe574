//! # Logger
//!
//! Asynchronous line logger core.
//!
//! Responsibilities:
//! - Accept submitted messages without blocking producers on sink speed
//! - Spawn one writer task per message
//! - Serialize sink access behind a shared lock
//! - Surface write failures on a side channel instead of returning them
//! - Drain all in-flight writes on shutdown

pub mod error;
pub mod format;
pub mod handle;
pub mod logger;
pub mod metrics;
pub mod sinks;
mod writer;

pub use contracts::{ContractError, LineSink, SinkKind, SinkSpec, WriteFailure};
pub use error::LoggerError;
pub use format::format_line;
pub use handle::{FailureReceiver, LoggerHandle, MessageSender};
pub use logger::{create_logger, Logger, LoggerConfig};
pub use metrics::{LoggerMetrics, MetricsSnapshot};
pub use sinks::{create_sink, AnySink, FileSink, MemorySink, StdoutSink};
