//! Branch predictor implementations.
//!
//! This module contains the two-level adaptive training predictor and its parts
//! (automata, pattern table, history register tables), plus the always-taken and
//! bimodal baselines used for comparison.

pub use self::branch_predictor::{BranchPredictor, PredictorClass};

/// Pattern table automata (Last-Time and saturating counters).
pub mod automaton;

/// Per-branch 2-bit counter baseline.
pub mod bimodal;

/// Branch predictor trait and common functionality.
pub mod branch_predictor;

/// History register tables (ideal, hashed, associative).
pub mod hrt;

/// Per-history-pattern automaton table.
pub mod pattern_table;

/// Static always-taken baseline.
pub mod static_bp;

/// Two-level adaptive training predictor.
pub mod two_level;

pub use self::{
    bimodal::BimodalPredictor, pattern_table::PatternTable, static_bp::AlwaysTakenPredictor,
    two_level::TwoLevelPredictor,
};

use crate::common::Outcome;
use crate::config::Config;

/// Enum wrapper for static dispatch of branch predictors.
/// This avoids vtable lookups in the per-event simulation loop.
#[derive(Clone, Debug)]
pub enum PredictorWrapper {
    /// Two-level adaptive training scheme.
    TwoLevel(Box<TwoLevelPredictor>),
    /// Always-taken baseline.
    AlwaysTaken(AlwaysTakenPredictor),
    /// Per-branch 2-bit counter baseline.
    Bimodal(BimodalPredictor),
}

impl PredictorWrapper {
    /// Builds every predictor a configuration asks for.
    ///
    /// Two-level schemes come first, in configuration order, followed by the
    /// enabled baselines (always-taken, then bimodal).
    pub fn from_config(config: &Config) -> Vec<Self> {
        let schemes = config
            .schemes
            .iter()
            .map(|s| Self::TwoLevel(Box::new(TwoLevelPredictor::new(s))));
        let always = config
            .baselines
            .always_taken
            .then(|| Self::AlwaysTaken(AlwaysTakenPredictor::new()));
        let bimodal = config
            .baselines
            .bimodal
            .then(|| Self::Bimodal(BimodalPredictor::new()));
        schemes.chain(always).chain(bimodal).collect()
    }
}

impl BranchPredictor for PredictorWrapper {
    fn name(&self) -> &str {
        match self {
            Self::TwoLevel(bp) => bp.name(),
            Self::AlwaysTaken(bp) => bp.name(),
            Self::Bimodal(bp) => bp.name(),
        }
    }

    #[inline(always)]
    fn predict(&self, pc: u64) -> bool {
        match self {
            Self::TwoLevel(bp) => bp.predict(pc),
            Self::AlwaysTaken(bp) => bp.predict(pc),
            Self::Bimodal(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn update(&mut self, pc: u64, outcome: Outcome) {
        match self {
            Self::TwoLevel(bp) => bp.update(pc, outcome),
            Self::AlwaysTaken(bp) => bp.update(pc, outcome),
            Self::Bimodal(bp) => bp.update(pc, outcome),
        }
    }

    fn hardware_cost_bits(&self) -> usize {
        match self {
            Self::TwoLevel(bp) => bp.hardware_cost_bits(),
            Self::AlwaysTaken(bp) => bp.hardware_cost_bits(),
            Self::Bimodal(bp) => bp.hardware_cost_bits(),
        }
    }

    fn class(&self) -> PredictorClass {
        match self {
            Self::TwoLevel(bp) => bp.class(),
            Self::AlwaysTaken(bp) => bp.class(),
            Self::Bimodal(bp) => bp.class(),
        }
    }
}
