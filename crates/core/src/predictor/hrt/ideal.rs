//! Ideal History Register Table (IHRT).
//!
//! One history register per distinct branch address, with no capacity limit and
//! therefore no interference between branches.

use std::collections::HashMap;

use super::HistoryTable;
use crate::common::History;
use crate::common::constants::history_mask;

/// Ideal History Register Table structure.
#[derive(Clone, Debug)]
pub struct IdealHistoryTable {
    /// History of a branch that has never been written.
    init_history: History,
    /// Registers keyed by branch address.
    table: HashMap<u64, History>,
}

impl IdealHistoryTable {
    /// Creates an empty table of `history_bits`-wide registers.
    pub fn new(history_bits: u32) -> Self {
        Self {
            init_history: history_mask(history_bits),
            table: HashMap::new(),
        }
    }
}

impl HistoryTable for IdealHistoryTable {
    /// Reads the register for `pc`; an unseen address reads as all ones and is not inserted.
    fn peek(&self, pc: u64) -> History {
        self.table.get(&pc).copied().unwrap_or(self.init_history)
    }

    /// Inserts or overwrites the register for `pc`.
    fn set(&mut self, pc: u64, history: History) {
        let _ = self.table.insert(pc, history);
    }

    /// Number of distinct addresses written so far.
    fn capacity_entries(&self) -> usize {
        self.table.len()
    }
}
