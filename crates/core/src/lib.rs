//! Two-level adaptive training branch prediction simulator library.
//!
//! This crate models the two-level adaptive branch predictor of Yeh and Patt with the following:
//! 1. **Predictor core:** Automata, the pattern table, and three history register tables
//!    (ideal, hashed, set-associative) composed into a [`TwoLevelPredictor`].
//! 2. **Baselines:** Always-taken and per-branch 2-bit (bimodal) predictors.
//! 3. **Configuration:** Scheme descriptions and the default evaluation catalog.
//! 4. **Simulation:** Trace reading and a driver that fans one event stream out to many predictors.
//! 5. **Statistics:** Per-predictor accuracy, hardware cost, and text/CSV/JSON reports.

/// Common types (branch outcome, constants, error types).
pub mod common;
/// Simulator configuration (defaults, enums, scheme catalog).
pub mod config;
/// Branch predictors (automata, pattern table, history tables, two-level composition, baselines).
pub mod predictor;
/// Trace reader and the trace-driven simulator.
pub mod sim;
/// Prediction statistics, reports and CSV aggregation.
pub mod stats;

/// Branch outcome passed to `update` once the ground truth is known.
pub use crate::common::Outcome;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::{Config, SchemeConfig};
/// Two-level adaptive training predictor; construct with `TwoLevelPredictor::new`.
pub use crate::predictor::TwoLevelPredictor;
/// Trace-driven simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
