//! Error definitions.
//!
//! The predictor core is total and never fails; errors only arise at the edges:
//! 1. **Configuration:** Scheme parameters the hardware model cannot represent.
//! 2. **Traces:** Unreadable files and malformed event lines.
//! 3. **Reports:** Failures while writing or serializing results, and empty result sets.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results carrying the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid or unreadable simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// History width outside `1..=HISTORY_MAX_BITS`.
    #[error("scheme `{scheme}`: history width {bits} is outside 1..={max}", max = crate::common::HISTORY_MAX_BITS)]
    HistoryBits {
        /// Scheme label.
        scheme: String,
        /// Requested history width.
        bits: u32,
    },

    /// History table size that is zero or not a power of two.
    #[error("scheme `{scheme}`: {entries} history table entries is not a power of two")]
    EntriesNotPowerOfTwo {
        /// Scheme label.
        scheme: String,
        /// Requested entry count.
        entries: usize,
    },

    /// Associativity that does not split the table into power-of-two sets.
    #[error("scheme `{scheme}`: {ways} ways cannot partition {entries} entries into power-of-two sets")]
    WaysInvalid {
        /// Scheme label.
        scheme: String,
        /// Requested associativity.
        ways: usize,
        /// Requested entry count.
        entries: usize,
    },

    /// Scheme without a label.
    #[error("scheme name must not be empty")]
    EmptyName,

    /// Two predictors sharing one label (reports would be ambiguous).
    #[error("duplicate predictor name `{0}`")]
    DuplicateName(String),

    /// Configuration with no scheme and no baseline enabled.
    #[error("configuration contains no predictors")]
    NoPredictors,

    /// Malformed JSON.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("cannot read configuration `{path}`: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Failure while reading a branch trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Trace file could not be opened.
    #[error("cannot open trace `{path}`: {source}")]
    Open {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Read failure in the middle of a trace.
    #[error("trace read failed: {0}")]
    Io(#[from] io::Error),

    /// Malformed event line.
    #[error("trace line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trace error.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Report or results table could not be read or written.
    #[error("report I/O failed: {0}")]
    Report(#[from] io::Error),

    /// Report could not be serialized.
    #[error("cannot serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Aggregation or summary input held no result rows.
    #[error("no CSV rows found in {0}")]
    NoRows(String),
}
