//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};

use contracts::SinkSpec;
use logger::LoggerConfig;

/// linelog - asynchronous line logger fed from standard input
#[derive(Parser, Debug)]
#[command(
    name = "linelog",
    author,
    version,
    about = "Asynchronous line logger",
    long_about = "Reads lines from standard input and writes each one, \n\
                  timestamp-prefixed, to the configured sink through an \n\
                  asynchronous dispatch loop.\n\n\
                  Type 'q' on its own line to quit; Ctrl-C and end-of-input \n\
                  also shut the session down gracefully."
)]
pub struct Cli {
    /// Log output destination: 'stdout' or a file path
    #[arg(short, long, default_value = "stdout", env = "LINELOG_OUT")]
    pub out: String,

    /// Intake queue capacity
    #[arg(long, default_value = "64", env = "LINELOG_QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    /// Failure channel capacity
    #[arg(long, default_value = "16", env = "LINELOG_FAILURE_CAPACITY")]
    pub failure_capacity: usize,

    /// Print the session summary as JSON on exit
    #[arg(long)]
    pub json: bool,

    /// Increase diagnostic verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "LINELOG_VERBOSE")]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        env = "LINELOG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

impl Cli {
    /// Resolve the `--out` flag into a sink spec.
    ///
    /// `stdout` (any case) selects the standard output sink; anything else
    /// is treated as a file path.
    pub fn sink_spec(&self) -> SinkSpec {
        if self.out.eq_ignore_ascii_case("stdout") {
            SinkSpec::stdout()
        } else {
            SinkSpec::file("file", self.out.clone())
        }
    }

    /// Logger configuration from the channel-capacity flags.
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            queue_capacity: self.queue_capacity,
            failure_capacity: self.failure_capacity,
        }
    }
}

/// Diagnostic output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
