//! Bimodal Branch Predictor.
//!
//! One `A2` 2-bit saturating counter per static branch, kept in an unbounded
//! address-keyed map so that branches never alias. States 2 and 3 predict taken.
//! A branch seen for the first time starts strongly taken.

use std::collections::HashMap;

use super::BranchPredictor;
use super::automaton::{self, AutomatonState};
use crate::common::Outcome;
use crate::config::AutomatonKind;

/// Automaton used by every counter.
const KIND: AutomatonKind = AutomatonKind::A2;

/// Bimodal predictor structure.
#[derive(Clone, Debug, Default)]
pub struct BimodalPredictor {
    /// Counter state per branch address.
    table: HashMap<u64, AutomatonState>,
}

impl BimodalPredictor {
    /// Report label.
    pub const NAME: &'static str = "Bimodal2Bit";

    /// Creates a predictor with no branches seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter state for `pc` (strongly taken if unseen).
    pub fn state(&self, pc: u64) -> AutomatonState {
        self.table
            .get(&pc)
            .copied()
            .unwrap_or(automaton::initial_state(KIND))
    }

    /// Number of distinct branches trained so far.
    pub fn tracked_branches(&self) -> usize {
        self.table.len()
    }
}

impl BranchPredictor for BimodalPredictor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn predict(&self, pc: u64) -> bool {
        automaton::predict(KIND, self.state(pc))
    }

    fn update(&mut self, pc: u64, outcome: Outcome) {
        let next = automaton::transition(KIND, self.state(pc), outcome);
        let _ = self.table.insert(pc, next);
    }
}
