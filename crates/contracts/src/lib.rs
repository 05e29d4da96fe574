//! # Contracts
//!
//! Frozen interface contracts, defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are
//! prohibited.
//!
//! ## Line Model
//! - A submitted message is a plain UTF-8 `String`
//! - The formatted line is `[YYYY-MM-DD HH:MM:SS] - <message>\n`
//! - Sinks consume bytes and report a written count or a failure

mod error;
mod failure;
mod sink;
mod sink_spec;

pub use error::*;
pub use failure::*;
pub use sink::*;
pub use sink_spec::*;
