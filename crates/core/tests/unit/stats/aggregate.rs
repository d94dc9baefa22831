//! CSV Aggregation Tests.
//!
//! Checks block detection in run logs and merging across files.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use atsim_core::predictor::PredictorClass;
use atsim_core::stats::aggregate::{aggregate_logs, extract_rows, write_rows};
use atsim_core::stats::{SchemeResult, SimReport};

use crate::common::temp_file;

fn rows(log: &str) -> Vec<String> {
    extract_rows(Cursor::new(log)).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Block detection
// ══════════════════════════════════════════════════════════

#[test]
fn extracts_rows_from_rendered_report() {
    let report = SimReport {
        trace: "t".to_owned(),
        benchmark: "li".to_owned(),
        results: vec![SchemeResult {
            scheme: "AT_HHRT_256_12_A2".to_owned(),
            class: PredictorClass::TwoLevel,
            total: 4,
            correct: 3,
            accuracy_pct: 75.0,
            hw_bits: 11264,
        }],
    };
    let mut log = Vec::new();
    report.write_text(&mut log).unwrap();
    let log = String::from_utf8(log).unwrap();

    assert_eq!(rows(&log), vec!["li,AT_HHRT_256_12_A2,4,3,75.00,11264"]);
}

#[test]
fn ignores_rows_outside_a_block() {
    let log = "gcc,AlwaysTaken,1,1,100.00,0\n=== CSV\ngcc,Bimodal2Bit,1,1,100.00,0\n";
    assert_eq!(rows(log), vec!["gcc,Bimodal2Bit,1,1,100.00,0"]);
}

#[test]
fn blank_line_ends_block() {
    let log = "=== CSV\na,b,1,1,100.00,0\n\na,c,1,1,100.00,0\n";
    assert_eq!(rows(log), vec!["a,b,1,1,100.00,0"]);
}

#[test]
fn header_lines_are_skipped() {
    let log = "=== CSV\nbenchmark,scheme,total,correct,accuracy,hw_bits\na,b,1,1,100.00,0\n";
    assert_eq!(rows(log), vec!["a,b,1,1,100.00,0"]);
}

#[test]
fn run_header_ends_block() {
    let log = "=== CSV\na,b,1,1,100.00,0\nTrace file: next\nx,y,1,1,100.00,0\n\
               === CSV\nc,d,1,0,0.00,0\nBenchmark:  other\n";
    assert_eq!(rows(log), vec!["a,b,1,1,100.00,0", "c,d,1,0,0.00,0"]);
}

#[test]
fn wrong_field_count_ends_block() {
    let log = "=== CSV\na,b,1,1,100.00,0\nnot,a,row\na,c,1,1,100.00,0\n";
    assert_eq!(rows(log), vec!["a,b,1,1,100.00,0"]);
}

#[test]
fn multiple_blocks_in_one_log() {
    let log = "=== CSV\na,b,1,1,100.00,0\n\nnoise\n=== CSV\nc,d,2,1,50.00,8\n";
    assert_eq!(rows(log), vec!["a,b,1,1,100.00,0", "c,d,2,1,50.00,8"]);
}

// ══════════════════════════════════════════════════════════
// 2. Merging files
// ══════════════════════════════════════════════════════════

#[test]
fn merges_logs_in_order_and_skips_missing() {
    let first = temp_file("=== CSV\ngcc,AlwaysTaken,2,1,50.00,0\n");
    let second = temp_file("=== CSV\nli,AlwaysTaken,4,4,100.00,0\n");
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        first.path().to_path_buf(),
        dir.path().join("missing.log"),
        second.path().to_path_buf(),
    ];

    let merged = aggregate_logs(&paths).unwrap();
    assert_eq!(
        merged,
        vec!["gcc,AlwaysTaken,2,1,50.00,0", "li,AlwaysTaken,4,4,100.00,0"]
    );

    let mut out = Vec::new();
    write_rows(&merged, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "benchmark,scheme,total,correct,accuracy,hw_bits\n\
         gcc,AlwaysTaken,2,1,50.00,0\n\
         li,AlwaysTaken,4,4,100.00,0\n"
    );
}

#[test]
fn no_rows_still_writes_header() {
    let mut out = Vec::new();
    write_rows(&[], &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "benchmark,scheme,total,correct,accuracy,hw_bits\n");
}
