//! Branch Trace Reader.
//!
//! Traces are plain text with one dynamic branch per line:
//!
//! ```text
//! # pc        taken
//! 0x401000    1
//! 401004      0
//! ```
//!
//! The address is hexadecimal, with or without a `0x` prefix. The outcome is a
//! decimal integer: zero means not taken, anything else means taken. Blank lines
//! and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::{Outcome, TraceError};

/// One dynamic branch: its address and resolved direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BranchEvent {
    /// Address of the branch instruction.
    pub pc: u64,
    /// Resolved direction.
    pub outcome: Outcome,
}

impl BranchEvent {
    /// Creates an event.
    pub const fn new(pc: u64, outcome: Outcome) -> Self {
        Self { pc, outcome }
    }
}

/// Parses one trace line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a description of the problem for a malformed line; the caller adds
/// the line number.
pub fn parse_line(line: &str) -> Result<Option<BranchEvent>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let (Some(pc_field), Some(taken_field)) = (fields.next(), fields.next()) else {
        return Err(format!("expected `<pc_hex> <taken>`, found `{line}`"));
    };
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected trailing field `{extra}`"));
    }

    let digits = pc_field
        .strip_prefix("0x")
        .or_else(|| pc_field.strip_prefix("0X"))
        .unwrap_or(pc_field);
    let pc = u64::from_str_radix(digits, 16)
        .map_err(|e| format!("invalid branch address `{pc_field}`: {e}"))?;
    let taken: i64 = taken_field
        .parse()
        .map_err(|e| format!("invalid outcome `{taken_field}`: {e}"))?;

    Ok(Some(BranchEvent::new(pc, Outcome::from(taken != 0))))
}

/// Streaming reader over a text branch trace.
///
/// Yields one `Result` per event; iteration should stop at the first error.
#[derive(Debug)]
pub struct TraceReader<R> {
    /// Underlying line source.
    reader: R,
    /// Reusable line buffer.
    buf: String,
    /// 1-based number of the last line read.
    line: usize,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps any buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(TraceError::Io(e))),
            }
            match parse_line(&self.buf) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => {}
                Err(reason) => {
                    return Some(Err(TraceError::Parse {
                        line: self.line,
                        reason,
                    }));
                }
            }
        }
    }
}
