//! Branch outcome.
//!
//! The outcome is the ground truth reported by the trace for one dynamic branch.
//! It is shifted into history registers as a single bit (taken = 1).

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

use super::constants::History;

/// Outcome of a single dynamic branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The branch fell through.
    NotTaken,
    /// The branch was taken.
    Taken,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Taken`].
    #[inline(always)]
    pub const fn is_taken(self) -> bool {
        matches!(self, Self::Taken)
    }

    /// Returns the history bit shifted in for this outcome (taken = 1).
    #[inline(always)]
    pub const fn bit(self) -> History {
        match self {
            Self::Taken => 1,
            Self::NotTaken => 0,
        }
    }

    /// Returns `true` if a boolean prediction matches this outcome.
    #[inline(always)]
    pub const fn matches(self, predicted_taken: bool) -> bool {
        self.is_taken() == predicted_taken
    }
}

impl From<bool> for Outcome {
    fn from(taken: bool) -> Self {
        if taken { Self::Taken } else { Self::NotTaken }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> Self {
        outcome.is_taken()
    }
}

impl Not for Outcome {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Taken => Self::NotTaken,
            Self::NotTaken => Self::Taken,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Taken => write!(f, "T"),
            Self::NotTaken => write!(f, "N"),
        }
    }
}
