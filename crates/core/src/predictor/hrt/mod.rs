//! History Register Tables (HRT).
//!
//! The first level of the two-level predictor: per-branch k-bit shift registers
//! holding the most recent outcomes. Three implementations share one contract:
//!
//! - `Ideal`: one register per static branch, unbounded. The interference-free upper bound.
//! - `Hashed`: direct-mapped, untagged. Colliding branches silently share a register.
//! - `Associative`: tagged and set-associative with round-robin replacement. A
//!   reallocated entry keeps the previous owner's history.
//!
//! Every register starts as all ones (biased toward taken).

/// Tagged set-associative history table.
pub mod associative;

/// Direct-mapped untagged history table.
pub mod hashed;

/// Unbounded per-address history table.
pub mod ideal;

/// Round-robin victim selection for the associative table.
pub mod replacement;

pub use associative::AssociativeHistoryTable;
pub use hashed::HashedHistoryTable;
pub use ideal::IdealHistoryTable;
pub use replacement::RoundRobinPolicy;

use crate::common::History;
use crate::config::{HrtKind, SchemeConfig};

/// Trait for history register tables.
///
/// No operation can fail: an address without a register reads as the all-ones
/// default, and a write is visible to the next read of the same (or aliased) address.
pub trait HistoryTable {
    /// Returns the history a [`get`](HistoryTable::get) would return, without changing the table.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction.
    fn peek(&self, pc: u64) -> History;

    /// Returns the history register for `pc`.
    ///
    /// Tagged tables allocate an entry on a miss, so this takes `&mut self`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction.
    fn get(&mut self, pc: u64) -> History {
        self.peek(pc)
    }

    /// Writes the history register for `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction.
    /// * `history` - New k-bit history.
    fn set(&mut self, pc: u64, history: History);

    /// Number of registers charged by the hardware cost estimate.
    ///
    /// Fixed tables report their size; the ideal table reports the number of
    /// distinct addresses stored so far.
    fn capacity_entries(&self) -> usize;
}

/// Enum wrapper for static dispatch of history tables.
/// Keeps the per-event predict/update path free of vtable calls.
#[derive(Clone, Debug)]
pub enum HistoryTableWrapper {
    /// Unbounded per-address table.
    Ideal(IdealHistoryTable),
    /// Direct-mapped untagged table.
    Hashed(HashedHistoryTable),
    /// Tagged set-associative table.
    Associative(AssociativeHistoryTable),
}

impl HistoryTableWrapper {
    /// Creates the history table selected by a scheme.
    ///
    /// The scheme is trusted: table sizes must be powers of two (see
    /// [`SchemeConfig::validate`]).
    pub fn new(scheme: &SchemeConfig) -> Self {
        match scheme.hrt_kind {
            HrtKind::Ideal => Self::Ideal(IdealHistoryTable::new(scheme.history_bits)),
            HrtKind::Hashed => Self::Hashed(HashedHistoryTable::new(
                scheme.hrt_entries,
                scheme.history_bits,
            )),
            HrtKind::Associative => Self::Associative(AssociativeHistoryTable::new(
                scheme.hrt_entries,
                scheme.hrt_ways,
                scheme.history_bits,
            )),
        }
    }

    /// Table implementation in use.
    pub const fn kind(&self) -> HrtKind {
        match self {
            Self::Ideal(_) => HrtKind::Ideal,
            Self::Hashed(_) => HrtKind::Hashed,
            Self::Associative(_) => HrtKind::Associative,
        }
    }
}

impl HistoryTable for HistoryTableWrapper {
    #[inline(always)]
    fn peek(&self, pc: u64) -> History {
        match self {
            Self::Ideal(t) => t.peek(pc),
            Self::Hashed(t) => t.peek(pc),
            Self::Associative(t) => t.peek(pc),
        }
    }

    #[inline(always)]
    fn get(&mut self, pc: u64) -> History {
        match self {
            Self::Ideal(t) => t.get(pc),
            Self::Hashed(t) => t.get(pc),
            Self::Associative(t) => t.get(pc),
        }
    }

    #[inline(always)]
    fn set(&mut self, pc: u64, history: History) {
        match self {
            Self::Ideal(t) => t.set(pc, history),
            Self::Hashed(t) => t.set(pc, history),
            Self::Associative(t) => t.set(pc, history),
        }
    }

    fn capacity_entries(&self) -> usize {
        match self {
            Self::Ideal(t) => t.capacity_entries(),
            Self::Hashed(t) => t.capacity_entries(),
            Self::Associative(t) => t.capacity_entries(),
        }
    }
}
