//! Trace-driven simulation.
//!
//! Provides the branch trace reader and the simulator that replays one event
//! stream through every configured predictor.

/// Text branch trace reader.
pub mod trace;

/// Multi-predictor simulation driver.
pub mod simulator;

pub use simulator::Simulator;
pub use trace::{BranchEvent, TraceReader};
