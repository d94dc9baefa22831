//! Static Branch Predictor.
//!
//! Implements a simple "Always Taken" prediction policy. It keeps no state and
//! serves as the floor every dynamic scheme is compared against.

use super::BranchPredictor;
use crate::common::Outcome;

/// Always-taken predictor structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysTakenPredictor;

impl AlwaysTakenPredictor {
    /// Report label.
    pub const NAME: &'static str = "AlwaysTaken";

    /// Creates a new always-taken predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for AlwaysTakenPredictor {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// Always predicts taken.
    fn predict(&self, _pc: u64) -> bool {
        true
    }

    /// Does not maintain any direction history.
    fn update(&mut self, _pc: u64, _outcome: Outcome) {}
}
