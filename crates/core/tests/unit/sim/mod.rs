//! # Simulation Tests

/// Multi-predictor driver.
pub mod simulator;
