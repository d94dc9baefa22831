//! Cross-Benchmark Summary.
//!
//! Reads a merged results table (`benchmark,scheme,total,correct,accuracy,hw_bits`)
//! and condenses it into:
//! 1. **Accuracy matrix:** One accuracy per benchmark and scheme.
//! 2. **Geometric means:** One accuracy per scheme across all benchmarks.
//!
//! Loading is lenient. Blank lines, run-log headers, `===` markers, rows without
//! six fields and rows whose accuracy does not parse are skipped. Benchmarks and
//! schemes keep the order in which they first appear.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

/// Geometric mean of accuracies given in percent.
///
/// Zero accuracies are left out, since one of them would drive the mean to zero.
/// Returns 0 when nothing is left.
///
/// # Arguments
///
/// * `values` - Accuracies in `[0, 100]`.
pub fn geometric_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|&&v| v > 0.0)
        .fold((0.0, 0usize), |(sum, count), &v| (sum + (v / 100.0).ln(), count + 1));
    if count == 0 {
        0.0
    } else {
        (sum / count as f64).exp() * 100.0
    }
}

/// Accuracies from a merged results table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultsTable {
    /// Benchmarks in first-seen order.
    benchmarks: Vec<String>,
    /// Schemes in first-seen order.
    schemes: Vec<String>,
    /// Latest accuracy per `(benchmark, scheme)`.
    cells: HashMap<(String, String), f64>,
    /// Every accuracy seen per scheme, duplicates included.
    samples: HashMap<String, Vec<f64>>,
}

impl ResultsTable {
    /// Loads a results table.
    ///
    /// # Errors
    ///
    /// Propagates read failures.
    pub fn from_reader(reader: impl BufRead) -> io::Result<Self> {
        let mut table = Self::default();
        for line in reader.lines() {
            let _ = table.push_line(&line?);
        }
        Ok(table)
    }

    /// Builds a table from CSV rows, such as the output of
    /// [`aggregate_logs`](super::aggregate::aggregate_logs).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut table = Self::default();
        for row in rows {
            let _ = table.push_line(row.as_ref());
        }
        table
    }

    /// Adds one line of the table.
    ///
    /// # Returns
    ///
    /// `true` if the line was a usable data row.
    pub fn push_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty()
            || line.starts_with("benchmark,scheme")
            || line.starts_with("Trace file:")
            || line.starts_with("Benchmark:")
            || line.starts_with("===")
        {
            return false;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let &[bench, scheme, _total, _correct, accuracy, _hw_bits] = fields.as_slice() else {
            return false;
        };
        if bench.is_empty() || scheme.is_empty() {
            return false;
        }
        let Ok(accuracy) = accuracy.parse::<f64>() else {
            return false;
        };

        if !self.benchmarks.iter().any(|b| b == bench) {
            self.benchmarks.push(bench.to_owned());
        }
        if !self.schemes.iter().any(|s| s == scheme) {
            self.schemes.push(scheme.to_owned());
        }
        let _ = self
            .cells
            .insert((bench.to_owned(), scheme.to_owned()), accuracy);
        self.samples
            .entry(scheme.to_owned())
            .or_default()
            .push(accuracy);
        true
    }

    /// `true` if no data row was loaded.
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Benchmarks in first-seen order.
    pub fn benchmarks(&self) -> &[String] {
        &self.benchmarks
    }

    /// Schemes in first-seen order.
    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }

    /// Accuracy of `scheme` on `benchmark`; a repeated row replaces the earlier one.
    pub fn accuracy(&self, benchmark: &str, scheme: &str) -> Option<f64> {
        self.cells
            .get(&(benchmark.to_owned(), scheme.to_owned()))
            .copied()
    }

    /// Geometric-mean accuracy per scheme, in first-seen order.
    ///
    /// Every row counts, so a benchmark listed twice weighs twice.
    pub fn geometric_means(&self) -> Vec<(String, f64)> {
        self.schemes
            .iter()
            .map(|scheme| {
                let samples = self.samples.get(scheme).map_or(&[][..], Vec::as_slice);
                (scheme.clone(), geometric_mean(samples))
            })
            .collect()
    }

    /// Writes the accuracy matrix and the per-scheme geometric means.
    ///
    /// Missing cells print as `-`.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_text(&self, w: &mut impl Write) -> io::Result<()> {
        let bench_width = self
            .benchmarks
            .iter()
            .map(String::len)
            .fold("benchmark".len(), usize::max);

        writeln!(w, "=== Accuracy by benchmark (%) ===")?;
        writeln!(w)?;
        for (i, scheme) in self.schemes.iter().enumerate() {
            writeln!(w, "  [{i}] {scheme}")?;
        }
        writeln!(w)?;
        write!(w, "{:<bench_width$}", "benchmark")?;
        for i in 0..self.schemes.len() {
            write!(w, " {:>7}", format!("[{i}]"))?;
        }
        writeln!(w)?;
        for bench in &self.benchmarks {
            write!(w, "{bench:<bench_width$}")?;
            for scheme in &self.schemes {
                match self.accuracy(bench, scheme) {
                    Some(acc) => write!(w, " {acc:>7.2}")?,
                    None => write!(w, " {:>7}", "-")?,
                }
            }
            writeln!(w)?;
        }
        writeln!(w)?;

        let scheme_width = self.schemes.iter().map(String::len).max().unwrap_or(0);
        writeln!(w, "=== Geometric mean accuracy per scheme (%) ===")?;
        writeln!(w)?;
        for (scheme, gmean) in self.geometric_means() {
            writeln!(w, "{scheme:<scheme_width$}  {gmean:>6.2}")?;
        }
        Ok(())
    }

    /// Writes the geometric means as CSV (`scheme,gmean_accuracy`).
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_csv(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "scheme,gmean_accuracy")?;
        for (scheme, gmean) in self.geometric_means() {
            writeln!(w, "{scheme},{gmean:.2}")?;
        }
        Ok(())
    }
}
