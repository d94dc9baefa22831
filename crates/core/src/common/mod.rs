//! Common types used throughout the branch prediction simulator.
//!
//! This module provides the building blocks shared by the predictor core and the driver:
//! 1. **Outcome:** The taken/not-taken result of a dynamic branch.
//! 2. **Constants:** History widths, address alignment, and automaton encodings.
//! 3. **Error Handling:** Configuration, trace and report error types.

/// Simulator-wide constants.
pub mod constants;

/// Error types for configuration, trace parsing and reporting.
pub mod error;

/// Branch outcome type.
pub mod outcome;

pub use constants::{ADDR_ALIGN_SHIFT, HISTORY_MAX_BITS, History};
pub use error::{ConfigError, Error, Result, TraceError};
pub use outcome::Outcome;
