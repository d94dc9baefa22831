//! Simulator Tests.
//!
//! Verifies predictor ordering, per-predictor scoring, event limits and error
//! propagation of the trace-driven driver.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use atsim_core::common::TraceError;
use atsim_core::config::{AutomatonKind, BaselineConfig, Config, LimitConfig};
use atsim_core::predictor::{BranchPredictor, PredictorClass};
use atsim_core::sim::{BranchEvent, Simulator, TraceReader};

use crate::common::{events, hashed, ideal, temp_file};

fn config_with(schemes: Vec<atsim_core::SchemeConfig>) -> Config {
    Config {
        schemes,
        ..Config::default()
    }
}

/// Alternating outcomes on one branch.
fn alternating_events(len: usize) -> Vec<Result<BranchEvent, TraceError>> {
    let pairs: Vec<(u64, bool)> = (0..len).map(|i| (0x400, i % 2 == 0)).collect();
    events(&pairs)
}

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[test]
fn predictors_follow_config_order_then_baselines() {
    let sim = Simulator::new(&config_with(vec![hashed(256, 12), ideal(8, AutomatonKind::LastTime)]));
    let names: Vec<&str> = sim.results().map(|(p, _)| p.name()).collect();
    assert_eq!(
        names,
        vec!["AT_HHRT_256_12_A2", "AT_IHRT_8_LT", "AlwaysTaken", "Bimodal2Bit"]
    );
}

#[test]
fn default_config_builds_catalog_and_baselines() {
    let sim = Simulator::new(&Config::default());
    assert_eq!(sim.results().count(), 13);
    let baselines = sim
        .results()
        .filter(|(p, _)| p.class() == PredictorClass::Baseline)
        .count();
    assert_eq!(baselines, 2);
}

#[test]
fn baselines_can_be_disabled() {
    let config = Config {
        schemes: vec![hashed(256, 12)],
        baselines: BaselineConfig::none(),
        ..Config::default()
    };
    let sim = Simulator::new(&config);
    assert_eq!(sim.results().count(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Scoring
// ══════════════════════════════════════════════════════════

#[test]
fn every_predictor_sees_every_event() {
    let mut sim = Simulator::new(&config_with(vec![ideal(2, AutomatonKind::A2)]));
    let simulated = sim.run(alternating_events(100)).unwrap();
    assert_eq!(simulated, 100);
    assert_eq!(sim.events(), 100);
    for (p, stats) in sim.results() {
        assert_eq!(stats.total, 100, "{} missed events", p.name());
    }
}

#[test]
fn scores_match_predictor_behaviour() {
    let mut sim = Simulator::new(&config_with(vec![ideal(2, AutomatonKind::A2)]));
    let _ = sim.run(alternating_events(100)).unwrap();
    let correct: Vec<u64> = sim.results().map(|(_, s)| s.correct).collect();
    // Two-level misses three times while warming up; both baselines only catch the taken half.
    assert_eq!(correct, vec![97, 50, 50]);
}

#[test]
fn step_scores_before_training() {
    let mut sim = Simulator::new(&config_with(vec![ideal(2, AutomatonKind::A2)]));
    sim.step(BranchEvent::new(0x10, false.into()));
    for (p, stats) in sim.results() {
        assert_eq!(stats.correct, 0, "{} starts out predicting taken", p.name());
        assert_eq!(stats.total, 1);
    }
}

#[test]
fn consecutive_runs_accumulate() {
    let mut sim = Simulator::new(&config_with(vec![hashed(16, 2)]));
    assert_eq!(sim.run(alternating_events(10)).unwrap(), 10);
    assert_eq!(sim.run(alternating_events(6)).unwrap(), 6);
    assert_eq!(sim.events(), 16);
}

// ══════════════════════════════════════════════════════════
// 3. Limits and errors
// ══════════════════════════════════════════════════════════

#[test]
fn max_events_stops_early() {
    let config = Config {
        schemes: vec![hashed(16, 2)],
        limits: LimitConfig {
            max_events: Some(3),
        },
        ..Config::default()
    };
    let mut sim = Simulator::new(&config);
    assert_eq!(sim.run(alternating_events(10)).unwrap(), 3);
    assert!(sim.results().all(|(_, s)| s.total == 3));
}

#[test]
fn limit_applies_before_a_later_error() {
    let config = Config {
        schemes: vec![hashed(16, 2)],
        limits: LimitConfig {
            max_events: Some(2),
        },
        ..Config::default()
    };
    let mut sim = Simulator::new(&config);
    let text = "0x10 1\n0x10 0\nbroken\n";
    assert_eq!(sim.run(TraceReader::new(Cursor::new(text))).unwrap(), 2);
}

#[test]
fn first_error_stops_the_run() {
    let mut sim = Simulator::new(&config_with(vec![hashed(16, 2)]));
    let text = "0x10 1\n0x14 0\nnot-a-line\n0x18 1\n";
    let err = sim.run(TraceReader::new(Cursor::new(text))).unwrap_err();
    assert!(matches!(err, TraceError::Parse { line: 3, .. }), "got {err:?}");
    assert_eq!(sim.events(), 2, "events before the error stay recorded");
}

#[test]
fn runs_trace_file_end_to_end() {
    let file = temp_file("# loop branch\n0x400 1\n0x400 1\n0x400 0\n0x404 1\n");
    let mut sim = Simulator::new(&config_with(vec![ideal(4, AutomatonKind::A2)]));
    let reader = TraceReader::open(file.path()).unwrap();
    assert_eq!(sim.run(reader).unwrap(), 4);

    let report = sim.report("loop.trace", "loop");
    assert_eq!(report.trace, "loop.trace");
    assert_eq!(report.benchmark, "loop");
    assert_eq!(report.results.len(), 3);
    let at = &report.results[0];
    assert_eq!((at.total, at.correct), (4, 3));
    assert!((at.accuracy_pct - 75.0).abs() < 1e-9);
    assert_eq!(at.hw_bits, 2 * 4 + 16 * 2, "two branches seen, 16-entry pattern table");
}
