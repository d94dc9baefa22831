//! CSV Aggregation.
//!
//! Run logs contain a CSV block introduced by a line starting with `=== CSV`.
//! This module pulls the data rows out of any number of logs so results from
//! several benchmarks land in one table. A block ends at a blank line, at a
//! `Trace file:` or `Benchmark:` line, or at the first line that is not a
//! six-field row. Header lines inside a block are dropped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::CSV_HEADER;

/// Number of fields in a results row.
const CSV_FIELDS: usize = 6;

/// Extracts the CSV data rows from one log.
///
/// # Errors
///
/// Propagates read failures.
pub fn extract_rows(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut rows = Vec::new();
    let mut in_csv = false;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            in_csv = false;
            continue;
        }
        if line.starts_with("=== CSV") {
            in_csv = true;
            continue;
        }
        if !in_csv || line.starts_with("benchmark,scheme") {
            continue;
        }
        if line.starts_with("Trace file:")
            || line.starts_with("Benchmark:")
            || line.split(',').count() != CSV_FIELDS
        {
            in_csv = false;
            continue;
        }
        rows.push(line.to_owned());
    }
    Ok(rows)
}

/// Extracts and concatenates the CSV rows of several log files, in order.
///
/// Missing files are skipped with a warning.
///
/// # Errors
///
/// Returns any I/O failure other than a missing file.
pub fn aggregate_logs<P: AsRef<Path>>(paths: &[P]) -> io::Result<Vec<String>> {
    let mut rows = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "log file not found, skipping");
                continue;
            }
            Err(e) => return Err(e),
        };
        let found = extract_rows(BufReader::new(file))?;
        debug!(path = %path.display(), rows = found.len(), "extracted CSV rows");
        rows.extend(found);
    }
    Ok(rows)
}

/// Writes a single header followed by `rows`.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_rows(rows: &[String], w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "{CSV_HEADER}")?;
    for row in rows {
        writeln!(w, "{row}")?;
    }
    Ok(())
}
