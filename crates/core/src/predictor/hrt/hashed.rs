//! Hashed History Register Table (HHRT).
//!
//! A direct-mapped array of history registers indexed by `(pc >> 2) & (N - 1)`.
//! No tag is stored, so branches whose index bits collide read and write the same
//! register. That interference is the behavior being modeled.

use super::HistoryTable;
use crate::common::History;
use crate::common::constants::{ADDR_ALIGN_SHIFT, history_mask};

/// Hashed History Register Table structure.
#[derive(Clone, Debug)]
pub struct HashedHistoryTable {
    /// One register per slot.
    hist: Vec<History>,
    /// `entries - 1`.
    mask: usize,
}

impl HashedHistoryTable {
    /// Creates a table of `entries` registers, all ones.
    ///
    /// # Arguments
    ///
    /// * `entries` - Number of registers. Must be a power of 2.
    /// * `history_bits` - Register width `k`.
    pub fn new(entries: usize, history_bits: u32) -> Self {
        Self {
            hist: vec![history_mask(history_bits); entries],
            mask: entries.wrapping_sub(1),
        }
    }

    /// Slot used by `pc`: word-aligned address bits masked to the table size.
    #[inline(always)]
    pub fn index(&self, pc: u64) -> usize {
        ((pc >> ADDR_ALIGN_SHIFT) as usize) & self.mask
    }
}

impl HistoryTable for HashedHistoryTable {
    fn peek(&self, pc: u64) -> History {
        self.hist[self.index(pc)]
    }

    /// Overwrites the slot; whichever branch shares it sees the new value.
    fn set(&mut self, pc: u64, history: History) {
        let idx = self.index(pc);
        self.hist[idx] = history;
    }

    fn capacity_entries(&self) -> usize {
        self.hist.len()
    }
}
