//! Associative History Register Table (AHRT).
//!
//! An `N`-entry, `W`-way set-associative table of tagged history registers.
//! The word-aligned low address bits select the set and the remaining high bits
//! form the tag. Every access, read or write, looks the address up first:
//!
//! - **Hit:** the matching way is used.
//! - **Miss:** the set's round-robin victim is claimed (valid bit and tag
//!   overwritten) and used. Its history register is *not* reset, so the new
//!   branch starts from the evicted branch's history.

use super::{HistoryTable, RoundRobinPolicy};
use crate::common::History;
use crate::common::constants::{ADDR_ALIGN_SHIFT, history_mask};

/// An entry in the associative history table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HrtEntry {
    /// Indicates if this entry belongs to a branch.
    pub valid: bool,
    /// High address bits of the owning branch.
    pub tag: u64,
    /// k-bit history register.
    pub history: History,
}

/// Associative History Register Table structure.
#[derive(Clone, Debug)]
pub struct AssociativeHistoryTable {
    /// Entries stored set-major: set `s` occupies `s * ways .. (s + 1) * ways`.
    entries: Vec<HrtEntry>,
    /// Number of sets.
    sets: usize,
    /// Associativity.
    ways: usize,
    /// `log2(sets)`.
    set_index_bits: u32,
    /// Victim selection.
    policy: RoundRobinPolicy,
}

impl AssociativeHistoryTable {
    /// Creates a table with every entry invalid and holding an all-ones history.
    ///
    /// # Arguments
    ///
    /// * `entries` - Total number of entries. Must be a power of 2.
    /// * `ways` - Associativity. Must be a power of 2 no larger than `entries`.
    /// * `history_bits` - Register width `k`.
    pub fn new(entries: usize, ways: usize, history_bits: u32) -> Self {
        let sets = entries / ways;
        let empty = HrtEntry {
            valid: false,
            tag: 0,
            history: history_mask(history_bits),
        };
        Self {
            entries: vec![empty; sets * ways],
            sets,
            ways,
            set_index_bits: sets.trailing_zeros(),
            policy: RoundRobinPolicy::new(sets, ways),
        }
    }

    /// Set selected by `pc`.
    #[inline(always)]
    pub fn set_index(&self, pc: u64) -> usize {
        ((pc >> ADDR_ALIGN_SHIFT) as usize) & (self.sets - 1)
    }

    /// Tag stored for `pc`: the address bits above the set index.
    #[inline(always)]
    pub fn tag_for(&self, pc: u64) -> u64 {
        pc >> (ADDR_ALIGN_SHIFT + self.set_index_bits)
    }

    /// Way of `set` holding `tag`, if any.
    fn lookup(&self, set: usize, tag: u64) -> Option<usize> {
        let base = set * self.ways;
        self.entries[base..base + self.ways]
            .iter()
            .position(|e| e.valid && e.tag == tag)
    }

    /// Returns the flat index of the entry for `pc`, claiming a victim on a miss.
    ///
    /// The victim keeps its history register.
    fn access(&mut self, pc: u64) -> usize {
        let set = self.set_index(pc);
        let tag = self.tag_for(pc);
        let base = set * self.ways;

        if let Some(way) = self.lookup(set, tag) {
            return base + way;
        }

        let idx = base + self.policy.next_victim(set);
        let entry = &mut self.entries[idx];
        entry.valid = true;
        entry.tag = tag;
        idx
    }

    /// Entry in `set` at `way`, for inspection.
    pub fn entry(&self, set: usize, way: usize) -> &HrtEntry {
        &self.entries[set * self.ways + way]
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }
}

impl HistoryTable for AssociativeHistoryTable {
    /// Reads the history `get` would return: the hit way's, or the next victim's on a miss.
    fn peek(&self, pc: u64) -> History {
        let set = self.set_index(pc);
        let way = self
            .lookup(set, self.tag_for(pc))
            .unwrap_or_else(|| self.policy.peek_victim(set));
        self.entry(set, way).history
    }

    fn get(&mut self, pc: u64) -> History {
        let idx = self.access(pc);
        self.entries[idx].history
    }

    fn set(&mut self, pc: u64, history: History) {
        let idx = self.access(pc);
        self.entries[idx].history = history;
    }

    fn capacity_entries(&self) -> usize {
        self.entries.len()
    }
}
