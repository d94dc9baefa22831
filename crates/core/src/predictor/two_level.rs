//! Two-Level Adaptive Training Predictor.
//!
//! Composes a history register table (first level) with a pattern table (second
//! level), following `AT(HRT(entries, kSR), PT(2^k, automaton))`:
//!
//! 1. **Predict:** read the branch's k-bit history, then ask the pattern table slot
//!    selected by that history.
//! 2. **Update:** train that same slot with the outcome, then shift the outcome into
//!    the history register (newest bit lowest, oldest bit discarded).
//!
//! The pattern table must be trained with the *old* history, before the register
//! advances, so that the slot trained is the slot that made the prediction.

use tracing::debug;

use super::branch_predictor::{BranchPredictor, PredictorClass};
use super::hrt::{HistoryTable, HistoryTableWrapper};
use super::pattern_table::PatternTable;
use crate::common::constants::{PT_ENTRY_COST_BITS, history_mask};
use crate::common::{History, Outcome};
use crate::config::SchemeConfig;

/// Two-Level Adaptive Training predictor structure.
#[derive(Clone, Debug)]
pub struct TwoLevelPredictor {
    /// Scheme label.
    name: String,
    /// History register width `k`.
    history_bits: u32,
    /// Mask keeping the low `k` history bits.
    mask: History,
    /// First level: per-branch history registers.
    hrt: HistoryTableWrapper,
    /// Second level: per-pattern automata.
    pt: PatternTable,
}

impl TwoLevelPredictor {
    /// Creates a predictor from a scheme description.
    ///
    /// The scheme is trusted; run [`SchemeConfig::validate`] first when it comes
    /// from user input.
    pub fn new(scheme: &SchemeConfig) -> Self {
        debug!(
            scheme = %scheme.name,
            hrt = %scheme.hrt_kind,
            entries = scheme.hrt_entries,
            ways = scheme.hrt_ways,
            k = scheme.history_bits,
            automaton = %scheme.automaton,
            "building two-level predictor"
        );
        Self {
            name: scheme.name.clone(),
            history_bits: scheme.history_bits,
            mask: history_mask(scheme.history_bits),
            hrt: HistoryTableWrapper::new(scheme),
            pt: PatternTable::new(scheme.history_bits, scheme.automaton),
        }
    }

    /// Shifts `outcome` into `history`, keeping `k` bits.
    #[inline(always)]
    pub const fn next_history(&self, history: History, outcome: Outcome) -> History {
        ((history << 1) | outcome.bit()) & self.mask
    }

    /// History the next prediction for `pc` would be made from.
    pub fn history(&self, pc: u64) -> History {
        self.hrt.peek(pc)
    }

    /// History register width `k`.
    pub const fn history_bits(&self) -> u32 {
        self.history_bits
    }

    /// First-level table.
    pub const fn history_table(&self) -> &HistoryTableWrapper {
        &self.hrt
    }

    /// Second-level table.
    pub const fn pattern_table(&self) -> &PatternTable {
        &self.pt
    }
}

impl BranchPredictor for TwoLevelPredictor {
    fn name(&self) -> &str {
        &self.name
    }

    /// Predicts from the pattern table slot selected by the branch's current history.
    ///
    /// Does not touch either table.
    #[inline(always)]
    fn predict(&self, pc: u64) -> bool {
        self.pt.predict(self.hrt.peek(pc))
    }

    /// Trains the slot for the old history, then stores the shifted history.
    #[inline(always)]
    fn update(&mut self, pc: u64, outcome: Outcome) {
        let old_history = self.hrt.get(pc);
        self.pt.update(old_history, outcome);
        let new_history = self.next_history(old_history, outcome);
        self.hrt.set(pc, new_history);
    }

    /// `HRT entries * k + PT entries * 2` bits.
    fn hardware_cost_bits(&self) -> usize {
        self.hrt.capacity_entries() * self.history_bits as usize
            + self.pt.entry_count() * PT_ENTRY_COST_BITS
    }

    fn class(&self) -> PredictorClass {
        PredictorClass::TwoLevel
    }
}
