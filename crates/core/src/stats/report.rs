//! Simulation Reports.
//!
//! A [`SimReport`] is a snapshot of every predictor's score after a run. It renders as:
//! 1. **Text:** A per-predictor summary split into two-level schemes and baselines,
//!    followed by the CSV block.
//! 2. **CSV:** One row per predictor, the format consumed by [`aggregate`](super::aggregate).
//! 3. **JSON:** The report structure serialized with serde.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use super::PredictorStats;
use crate::predictor::{BranchPredictor, PredictorClass};

/// Header row of the CSV results format.
pub const CSV_HEADER: &str = "benchmark,scheme,total,correct,accuracy,hw_bits";

/// Line that introduces the CSV block in text output.
pub const CSV_BLOCK_MARKER: &str = "=== CSV (copy/paste into analysis/results.csv) ===";

/// Final score of one predictor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemeResult {
    /// Predictor label.
    pub scheme: String,
    /// Report section.
    pub class: PredictorClass,
    /// Predictions made.
    pub total: u64,
    /// Correct predictions.
    pub correct: u64,
    /// Accuracy in percent.
    pub accuracy_pct: f64,
    /// Approximate storage cost (0 for baselines).
    pub hw_bits: usize,
}

impl SchemeResult {
    /// Captures a predictor's label, cost and score.
    pub fn new(predictor: &impl BranchPredictor, stats: &PredictorStats) -> Self {
        Self {
            scheme: predictor.name().to_owned(),
            class: predictor.class(),
            total: stats.total,
            correct: stats.correct,
            accuracy_pct: stats.accuracy() * 100.0,
            hw_bits: predictor.hardware_cost_bits(),
        }
    }
}

/// Results of one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    /// Trace the results were measured on.
    pub trace: String,
    /// Benchmark label for CSV rows.
    pub benchmark: String,
    /// One result per predictor, in simulation order.
    pub results: Vec<SchemeResult>,
}

impl SimReport {
    fn section(&self, class: PredictorClass) -> impl Iterator<Item = &SchemeResult> {
        self.results.iter().filter(move |r| r.class == class)
    }

    /// Writes the human-readable summary followed by the CSV block.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_text(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "Trace file: {}", self.trace)?;
        writeln!(w, "Benchmark:  {}", self.benchmark)?;
        writeln!(w)?;

        writeln!(w, "=== Two-Level Adaptive Training (AT) Schemes ===")?;
        writeln!(w)?;
        for r in self.section(PredictorClass::TwoLevel) {
            writeln!(w, "{}", r.scheme)?;
            writeln!(w, "  Total branches:   {}", r.total)?;
            writeln!(w, "  Correct predicts: {}", r.correct)?;
            writeln!(w, "  Accuracy:         {:.2} %", r.accuracy_pct)?;
            writeln!(w, "  HW cost (approx): {} bits", r.hw_bits)?;
            writeln!(w)?;
        }

        writeln!(w, "=== Baseline Predictors ===")?;
        writeln!(w)?;
        for r in self.section(PredictorClass::Baseline) {
            writeln!(w, "{}", r.scheme)?;
            writeln!(w, "  Total branches:   {}", r.total)?;
            writeln!(w, "  Correct predicts: {}", r.correct)?;
            writeln!(w, "  Accuracy:         {:.2} %", r.accuracy_pct)?;
            writeln!(w)?;
        }

        writeln!(w, "{CSV_BLOCK_MARKER}")?;
        self.write_csv(w)
    }

    /// Writes the results as CSV, header first.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_csv(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "{CSV_HEADER}")?;
        for r in &self.results {
            writeln!(
                w,
                "{},{},{},{},{:.2},{}",
                self.benchmark, r.scheme, r.total, r.correct, r.accuracy_pct, r.hw_bits
            )?;
        }
        Ok(())
    }

    /// Prints the text summary to stdout.
    ///
    /// # Errors
    ///
    /// Propagates write failures (for example a closed pipe).
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_text(&mut lock)
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; in practice only non-finite accuracies fail.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
