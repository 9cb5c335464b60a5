//! Memory-Access Trace Reader.
//!
//! This module parses the text trace format replayed by the simulator. It provides:
//! 1. **Records:** `Operation` (read/write) and `Access` (operation plus address).
//! 2. **Line parsing:** `R 0x1f` / `W 7fff0010`; the `0x` prefix is optional.
//! 3. **Streaming:** `TraceReader` yields records lazily from any `BufRead`.
//!
//! A line starting with `#` ends the trace; everything after it is ignored.
//! Blank lines are skipped.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::TraceError;

/// Kind of memory operation in a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Load.
    Read,
    /// Store.
    Write,
}

/// One trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Access {
    /// Load or store.
    pub op: Operation,
    /// Byte address.
    pub addr: u64,
}

impl Access {
    /// A read of `addr`.
    pub const fn read(addr: u64) -> Self {
        Self {
            op: Operation::Read,
            addr,
        }
    }

    /// A write of `addr`.
    pub const fn write(addr: u64) -> Self {
        Self {
            op: Operation::Write,
            addr,
        }
    }

    /// Returns `true` for a write.
    pub const fn is_write(&self) -> bool {
        matches!(self.op, Operation::Write)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            Operation::Read => 'R',
            Operation::Write => 'W',
        };
        write!(f, "{op} {:#x}", self.addr)
    }
}

/// Returns `true` if the line terminates the trace.
fn is_end_marker(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - The raw line text.
/// * `line_no` - 1-based line number, used in errors.
///
/// # Returns
///
/// `Ok(None)` for a blank line, `Ok(Some(access))` for a record.
///
/// # Errors
///
/// `Malformed` if the operation is not `R`/`W`, the address is missing or not
/// hexadecimal, or extra fields follow the address.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Access>, TraceError> {
    let text = line.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let malformed = |reason: &'static str| TraceError::Malformed {
        line: line_no,
        text: text.to_string(),
        reason,
    };

    let mut fields = text.split_whitespace();
    let op = match fields.next() {
        Some("R" | "r") => Operation::Read,
        Some("W" | "w") => Operation::Write,
        _ => return Err(malformed("expected `R` or `W`")),
    };
    let raw = fields.next().ok_or_else(|| malformed("missing address"))?;
    if fields.next().is_some() {
        return Err(malformed("unexpected trailing field"));
    }
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let addr = u64::from_str_radix(digits, 16).map_err(|_| malformed("invalid hex address"))?;

    Ok(Some(Access { op, addr }))
}

/// Streaming trace parser.
///
/// Yields one `Result<Access, TraceError>` per record. Iteration ends at the
/// `#` marker, at end of input, or after the first error.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            done: false,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Access, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let text = match self.lines.next() {
                None => break,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                Some(Ok(text)) => text,
            };
            self.line_no += 1;
            if is_end_marker(&text) {
                break;
            }
            match parse_line(&text, self.line_no) {
                Ok(None) => {}
                Ok(Some(access)) => return Some(Ok(access)),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.done = true;
        None
    }
}

/// Reads a whole trace file into memory.
///
/// # Errors
///
/// The first I/O or parse error encountered.
pub fn read_trace(path: impl AsRef<Path>) -> Result<Vec<Access>, TraceError> {
    TraceReader::open(path)?.collect()
}

/// Parses a trace held in a string.
///
/// # Errors
///
/// The first parse error encountered.
pub fn parse_trace(text: &str) -> Result<Vec<Access>, TraceError> {
    TraceReader::new(text.as_bytes()).collect()
}
