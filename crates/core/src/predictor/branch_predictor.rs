//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait shared by the two-level
//! adaptive predictor and the baselines. A driver calls `predict` for a branch,
//! compares the answer with the trace, then calls `update` exactly once with the
//! true outcome before moving on to the next event.

use crate::common::Outcome;

/// Broad family of a predictor, used to group report sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PredictorClass {
    /// A two-level adaptive training scheme.
    TwoLevel,
    /// A static or per-branch baseline.
    Baseline,
}

/// Trait for direction predictors.
pub trait BranchPredictor {
    /// Label of this predictor in reports.
    fn name(&self) -> &str;

    /// Predicts whether the branch at `pc` will be taken.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction.
    fn predict(&self, pc: u64) -> bool;

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction.
    /// * `outcome` - Whether the branch was actually taken.
    fn update(&mut self, pc: u64, outcome: Outcome);

    /// Approximate storage cost in bits (0 for predictors without modeled hardware).
    fn hardware_cost_bits(&self) -> usize {
        0
    }

    /// Report family of this predictor.
    fn class(&self) -> PredictorClass {
        PredictorClass::Baseline
    }
}
