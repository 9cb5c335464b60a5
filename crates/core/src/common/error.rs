//! Configuration and Trace Error definitions.
//!
//! The simulation core itself is infallible: decoding, lookup, and install are
//! total over validated geometry. Errors only arise at the edges:
//! 1. **Configuration:** Invalid sizes, associativity strings, or policies, rejected before a level is built.
//! 2. **Trace Loading:** I/O failures and malformed trace records.

use std::io;

use thiserror::Error;

/// Rejected cache or hierarchy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size parameter is zero or not a power of two.
    #[error("{field} must be a positive power of two, got {value}")]
    NotPowerOfTwo {
        /// Which parameter was rejected.
        field: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// A numeric argument could not be parsed.
    #[error("invalid {field} `{value}`: expected a positive integer")]
    InvalidNumber {
        /// Which parameter was rejected.
        field: &'static str,
        /// The text that failed to parse.
        value: String,
    },

    /// The associativity string is not `direct`, `assoc`, or `assoc:N`.
    #[error("invalid associativity `{0}`: expected `direct`, `assoc` or `assoc:N`")]
    InvalidAssociativity(String),

    /// The policy string is neither `fifo` nor `lru`.
    #[error("unknown replacement policy `{0}`: expected `fifo` or `lru`")]
    UnknownPolicy(String),

    /// A single block does not fit in the cache.
    #[error("block size {line_bytes} exceeds cache size {size_bytes}")]
    BlockLargerThanCache {
        /// Cache capacity in bytes.
        size_bytes: usize,
        /// Block size in bytes.
        line_bytes: usize,
    },

    /// One set of the requested associativity does not fit in the cache.
    #[error("{ways}-way sets of {line_bytes}-byte blocks do not fit in {size_bytes} bytes")]
    AssociativityTooLarge {
        /// Requested lines per set.
        ways: usize,
        /// Block size in bytes.
        line_bytes: usize,
        /// Cache capacity in bytes.
        size_bytes: usize,
    },

    /// The derived geometry has no sets.
    #[error("cache geometry has no sets")]
    NoSets,

    /// A hand-built geometry whose count disagrees with its bit width.
    #[error("{field} {value} does not match a {bits}-bit index")]
    InconsistentGeometry {
        /// Which quantity disagrees (`set count` or `block size`).
        field: &'static str,
        /// The stored count.
        value: usize,
        /// The stored bit width.
        bits: u32,
    },

    /// Offset and set-index bits together exceed the address width.
    #[error("address split needs {0} bits, more than a 64-bit address provides")]
    GeometryTooWide(u32),

    /// A hierarchy description without any cache level.
    #[error("cache hierarchy has no levels")]
    NoLevels,

    /// A specific level of a hierarchy failed validation.
    #[error("L{level}: {source}")]
    Level {
        /// 1-based level number.
        level: usize,
        /// The underlying error.
        source: Box<ConfigError>,
    },

    /// A JSON hierarchy description could not be deserialized.
    #[error("invalid hierarchy description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while reading a memory-access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace source could not be read.
    #[error("trace i/o error: {0}")]
    Io(#[from] io::Error),

    /// A line is not a valid `R <addr>` / `W <addr>` record.
    #[error("line {line}: {reason}: `{text}`")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}
