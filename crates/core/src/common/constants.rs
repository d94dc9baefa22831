//! Global Simulator Constants.
//!
//! This module defines constants used across the predictor core. It includes:
//! 1. **History Constants:** The storage type and maximum width of a history register.
//! 2. **Address Constants:** Alignment assumptions used by the hashed and associative tables.
//! 3. **Automaton Constants:** Saturation bounds and thresholds of the counter automata.

/// Storage type of a k-bit branch history register.
///
/// The most recent outcome lives in bit 0; only the low `k` bits are meaningful.
pub type History = u16;

/// Maximum supported history width in bits (the width of [`History`]).
pub const HISTORY_MAX_BITS: u32 = History::BITS;

/// Number of low address bits dropped before indexing a history table.
///
/// Branch instructions are assumed to be 4-byte aligned, so the two least
/// significant bits never distinguish branches.
pub const ADDR_ALIGN_SHIFT: u32 = 2;

/// Largest state of the 2-bit saturating counter automata (strongly taken).
pub const COUNTER_MAX: u8 = 3;

/// Smallest counter state that predicts taken.
pub const COUNTER_TAKEN_THRESHOLD: u8 = 2;

/// Number of bits charged per pattern table entry by the hardware cost estimate.
pub const PT_ENTRY_COST_BITS: usize = 2;

/// Returns the all-ones history of `bits` width, the initial value of every history register.
///
/// # Arguments
///
/// * `bits` - History width `k`, at most [`HISTORY_MAX_BITS`].
#[inline(always)]
pub const fn history_mask(bits: u32) -> History {
    if bits >= HISTORY_MAX_BITS {
        History::MAX
    } else {
        ((1u32 << bits) - 1) as History
    }
}
