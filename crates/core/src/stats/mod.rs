//! Prediction statistics collection and reporting.
//!
//! This module tracks how well each predictor does on a trace. It provides:
//! 1. **Counters:** Per-predictor totals and correct predictions.
//! 2. **Reports:** Human-readable, CSV and JSON summaries of a run.
//! 3. **Aggregation:** Merging the CSV blocks of several run logs into one table.
//! 4. **Summary:** Per-benchmark accuracy matrix and per-scheme geometric means.

/// Merging CSV blocks from run logs.
pub mod aggregate;

/// Per-run report rendering.
pub mod report;

/// Cross-benchmark accuracy summary.
pub mod summary;

pub use report::{CSV_HEADER, SchemeResult, SimReport};
pub use summary::ResultsTable;

/// Running score of one predictor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredictorStats {
    /// Predictions made.
    pub total: u64,
    /// Predictions that matched the outcome.
    pub correct: u64,
}

impl PredictorStats {
    /// Records one prediction.
    #[inline(always)]
    pub const fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.correct += 1;
        }
    }

    /// Fraction of correct predictions in `[0, 1]`; 0 before any prediction.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    /// Predictions that missed.
    pub const fn mispredictions(&self) -> u64 {
        self.total - self.correct
    }
}
