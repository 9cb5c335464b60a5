//! Trace replay.
//!
//! Provides the memory-access trace reader and the hierarchy controller that
//! replays a trace against a set of cache levels.

/// Hierarchy controller: per-access protocol and statistics.
pub mod simulator;

/// Memory-access records and the text trace reader.
pub mod trace;

pub use simulator::{AccessOutcome, Hierarchy};
pub use trace::{Access, Operation, TraceReader};
