//! Pattern Table (PT).
//!
//! The second level of the predictor: `2^k` automata indexed by the k-bit
//! history of the branch being predicted. Every branch whose history register
//! holds the same pattern reads and trains the same slot.

use super::automaton::{self, AutomatonState};
use crate::common::constants::history_mask;
use crate::common::{History, Outcome};
use crate::config::AutomatonKind;

/// Pattern Table structure.
#[derive(Clone, Debug)]
pub struct PatternTable {
    /// Automaton driving every slot.
    kind: AutomatonKind,
    /// Mask selecting the low `k` history bits.
    mask: History,
    /// One automaton state per history pattern.
    states: Vec<AutomatonState>,
}

impl PatternTable {
    /// Creates a pattern table with `2^history_bits` slots in the automaton's initial state.
    ///
    /// # Arguments
    ///
    /// * `history_bits` - History width `k` (at most `HISTORY_MAX_BITS`).
    /// * `kind` - Automaton used by every slot.
    pub fn new(history_bits: u32, kind: AutomatonKind) -> Self {
        let mask = history_mask(history_bits);
        Self {
            kind,
            mask,
            states: vec![automaton::initial_state(kind); mask as usize + 1],
        }
    }

    /// Index of the slot addressed by `history`.
    #[inline(always)]
    fn index(&self, history: History) -> usize {
        (history & self.mask) as usize
    }

    /// Predicts from the slot addressed by `history`.
    #[inline(always)]
    pub fn predict(&self, history: History) -> bool {
        automaton::predict(self.kind, self.states[self.index(history)])
    }

    /// Trains the slot addressed by `history` with `outcome`.
    ///
    /// `history` must be the history the prediction was made from, before the
    /// outcome is shifted into the history register.
    #[inline(always)]
    pub fn update(&mut self, history: History, outcome: Outcome) {
        let idx = self.index(history);
        self.states[idx] = automaton::transition(self.kind, self.states[idx], outcome);
    }

    /// Current state of the slot addressed by `history`.
    pub fn state(&self, history: History) -> AutomatonState {
        self.states[self.index(history)]
    }

    /// Number of slots (`2^k`).
    pub fn entry_count(&self) -> usize {
        self.states.len()
    }

    /// Automaton driving every slot.
    pub const fn automaton(&self) -> AutomatonKind {
        self.kind
    }
}
