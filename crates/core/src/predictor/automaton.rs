//! Pattern Table Automata.
//!
//! Each pattern table slot holds the state of a small finite-state machine.
//! This module defines, per [`AutomatonKind`]:
//! 1. **Initial state:** Both families start biased toward taken.
//! 2. **Decision function:** Maps a state to a taken/not-taken prediction.
//! 3. **Transition function:** Maps a state and an outcome to the next state.
//!
//! `A3` and `A4` share the `A2` saturating counter.

use crate::common::Outcome;
use crate::common::constants::{COUNTER_MAX, COUNTER_TAKEN_THRESHOLD};
use crate::config::AutomatonKind;

/// State of one automaton (0..=1 for Last-Time, 0..=3 for the counters).
pub type AutomatonState = u8;

/// Last-Time state recording a taken outcome.
const LAST_TAKEN: AutomatonState = 1;

/// Last-Time state recording a not-taken outcome.
const LAST_NOT_TAKEN: AutomatonState = 0;

/// Returns the initial state of every pattern table slot.
///
/// Last-Time starts as if the last outcome was taken; the counters start strongly taken.
#[inline(always)]
pub const fn initial_state(kind: AutomatonKind) -> AutomatonState {
    match kind {
        AutomatonKind::LastTime => LAST_TAKEN,
        AutomatonKind::A2 | AutomatonKind::A3 | AutomatonKind::A4 => COUNTER_MAX,
    }
}

/// Returns the prediction made from `state` (`true` = taken).
#[inline(always)]
pub const fn predict(kind: AutomatonKind, state: AutomatonState) -> bool {
    match kind {
        AutomatonKind::LastTime => state & 1 != 0,
        AutomatonKind::A2 | AutomatonKind::A3 | AutomatonKind::A4 => {
            state >= COUNTER_TAKEN_THRESHOLD
        }
    }
}

/// Returns the state following `state` once `outcome` is known.
///
/// Last-Time overwrites its state with the outcome. The counters saturate at
/// `0` and [`COUNTER_MAX`].
#[inline(always)]
pub const fn transition(
    kind: AutomatonKind,
    state: AutomatonState,
    outcome: Outcome,
) -> AutomatonState {
    match kind {
        AutomatonKind::LastTime => match outcome {
            Outcome::Taken => LAST_TAKEN,
            Outcome::NotTaken => LAST_NOT_TAKEN,
        },
        AutomatonKind::A2 | AutomatonKind::A3 | AutomatonKind::A4 => match outcome {
            Outcome::Taken if state < COUNTER_MAX => state + 1,
            Outcome::NotTaken if state > 0 => state - 1,
            _ => state,
        },
    }
}
