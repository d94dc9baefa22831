//! Configuration Tests.
//!
//! Verifies JSON defaults and aliases, the default scheme catalog, canonical
//! naming and every validation rule.

use pretty_assertions::assert_eq;
use rstest::rstest;

use atsim_core::common::ConfigError;
use atsim_core::config::{AutomatonKind, BaselineConfig, Config, HrtKind, SchemeConfig};

use crate::common::temp_file;

// ══════════════════════════════════════════════════════════
// 1. Catalog and naming
// ══════════════════════════════════════════════════════════

#[test]
fn default_catalog_names_in_order() {
    let names: Vec<String> = Config::default().schemes.into_iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            "AT_AHRT_256_12_A2",
            "AT_AHRT_512_12_A2",
            "AT_HHRT_256_12_A2",
            "AT_HHRT_512_12_A2",
            "AT_IHRT_12_A2",
            "AT_AHRT_512_12_LT",
            "AT_AHRT_512_12_A3",
            "AT_AHRT_512_12_A4",
            "AT_AHRT_512_10_A2",
            "AT_AHRT_512_8_A2",
            "AT_AHRT_512_6_A2",
        ]
    );
}

#[test]
fn default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert!(config.baselines.always_taken);
    assert!(config.baselines.bimodal);
    assert_eq!(config.limits.max_events, None);
}

#[test]
fn catalog_associative_schemes_are_four_way() {
    for scheme in SchemeConfig::catalog() {
        if scheme.hrt_kind == HrtKind::Associative {
            assert_eq!(scheme.hrt_ways, 4, "{} should be 4-way", scheme.name);
            assert_eq!(scheme.sets(), scheme.hrt_entries / 4);
        }
    }
}

// ══════════════════════════════════════════════════════════
// 2. JSON parsing
// ══════════════════════════════════════════════════════════

#[test]
fn empty_object_yields_default_config() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn scheme_fields_take_defaults() {
    let config = Config::from_json_str(r#"{ "schemes": [ { "name": "s" } ] }"#).unwrap();
    let scheme = &config.schemes[0];
    assert_eq!(scheme.hrt_kind, HrtKind::Associative);
    assert_eq!(scheme.hrt_entries, 512);
    assert_eq!(scheme.hrt_ways, 4);
    assert_eq!(scheme.history_bits, 12);
    assert_eq!(scheme.automaton, AutomatonKind::A2);
}

#[rstest]
#[case("Ideal", HrtKind::Ideal)]
#[case("IHRT", HrtKind::Ideal)]
#[case("Hashed", HrtKind::Hashed)]
#[case("HHRT", HrtKind::Hashed)]
#[case("Associative", HrtKind::Associative)]
#[case("AHRT", HrtKind::Associative)]
fn hrt_kind_names_and_aliases(#[case] label: &str, #[case] expected: HrtKind) {
    let json = format!(r#"{{ "name": "s", "hrt_kind": "{label}" }}"#);
    let scheme: SchemeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(scheme.hrt_kind, expected);
}

#[rstest]
#[case("LastTime", AutomatonKind::LastTime)]
#[case("LT", AutomatonKind::LastTime)]
#[case("A2", AutomatonKind::A2)]
#[case("A3", AutomatonKind::A3)]
#[case("A4", AutomatonKind::A4)]
fn automaton_names_and_aliases(#[case] label: &str, #[case] expected: AutomatonKind) {
    let json = format!(r#"{{ "name": "s", "automaton": "{label}" }}"#);
    let scheme: SchemeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(scheme.automaton, expected);
}

#[test]
fn malformed_json_is_rejected() {
    let err = Config::from_json_str("{ \"schemes\": [").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)), "got {err:?}");
}

#[test]
fn unknown_hrt_kind_is_rejected() {
    let err = Config::from_json_str(r#"{ "schemes": [ { "name": "s", "hrt_kind": "Tagless" } ] }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn from_file_reads_and_validates() {
    let file = temp_file(
        r#"{ "schemes": [ { "name": "tiny", "hrt_kind": "HHRT", "hrt_entries": 16, "history_bits": 4 } ],
             "limits": { "max_events": 1000 } }"#,
    );
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.schemes.len(), 1);
    assert_eq!(config.schemes[0].hrt_entries, 16);
    assert_eq!(config.limits.max_events, Some(1000));
}

#[test]
fn from_file_missing_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "got {err:?}");
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0)]
#[case(17)]
#[case(32)]
fn history_width_out_of_range(#[case] bits: u32) {
    let scheme = SchemeConfig::new(HrtKind::Hashed, 256, 1, bits, AutomatonKind::A2);
    assert!(matches!(
        scheme.validate(),
        Err(ConfigError::HistoryBits { bits: b, .. }) if b == bits
    ));
}

#[rstest]
#[case(1)]
#[case(12)]
#[case(16)]
fn history_width_in_range(#[case] bits: u32) {
    let scheme = SchemeConfig::new(HrtKind::Hashed, 256, 1, bits, AutomatonKind::A2);
    assert!(scheme.validate().is_ok());
}

#[rstest]
#[case(HrtKind::Hashed, 0)]
#[case(HrtKind::Hashed, 100)]
#[case(HrtKind::Associative, 0)]
#[case(HrtKind::Associative, 384)]
fn entries_must_be_power_of_two(#[case] kind: HrtKind, #[case] entries: usize) {
    let scheme = SchemeConfig::new(kind, entries, 4, 12, AutomatonKind::A2);
    assert!(matches!(
        scheme.validate(),
        Err(ConfigError::EntriesNotPowerOfTwo { .. })
    ));
}

#[test]
fn ideal_table_ignores_geometry() {
    let scheme = SchemeConfig::new(HrtKind::Ideal, 0, 0, 12, AutomatonKind::A2);
    assert!(scheme.validate().is_ok());
}

#[test]
fn hashed_table_ignores_ways() {
    let scheme = SchemeConfig::new(HrtKind::Hashed, 256, 3, 12, AutomatonKind::A2);
    assert!(scheme.validate().is_ok());
}

#[rstest]
#[case(0, 256)]
#[case(3, 256)]
#[case(8, 4)]
fn associativity_must_partition_table(#[case] ways: usize, #[case] entries: usize) {
    let scheme = SchemeConfig::new(HrtKind::Associative, entries, ways, 12, AutomatonKind::A2);
    assert!(matches!(scheme.validate(), Err(ConfigError::WaysInvalid { .. })));
}

#[test]
fn fully_associative_table_is_valid() {
    let scheme = SchemeConfig::new(HrtKind::Associative, 8, 8, 4, AutomatonKind::A2);
    assert!(scheme.validate().is_ok());
    assert_eq!(scheme.sets(), 1);
}

#[test]
fn blank_name_is_rejected() {
    let mut scheme = SchemeConfig::new(HrtKind::Hashed, 256, 1, 12, AutomatonKind::A2);
    scheme.name = "  ".to_owned();
    assert!(matches!(scheme.validate(), Err(ConfigError::EmptyName)));
}

#[test]
fn duplicate_scheme_names_are_rejected() {
    let scheme = SchemeConfig::new(HrtKind::Hashed, 256, 1, 12, AutomatonKind::A2);
    let config = Config {
        schemes: vec![scheme.clone(), scheme],
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::DuplicateName(name)) if name == "AT_HHRT_256_12_A2"
    ));
}

#[test]
fn scheme_may_not_shadow_enabled_baseline() {
    let mut scheme = SchemeConfig::new(HrtKind::Hashed, 256, 1, 12, AutomatonKind::A2);
    scheme.name = "Bimodal2Bit".to_owned();
    let mut config = Config {
        schemes: vec![scheme],
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::DuplicateName(_))));

    config.baselines.bimodal = false;
    assert!(config.validate().is_ok(), "name is free once the baseline is off");
}

#[test]
fn empty_configuration_is_rejected() {
    let config = Config {
        schemes: Vec::new(),
        baselines: BaselineConfig::none(),
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NoPredictors)));
}

#[test]
fn baselines_alone_are_enough() {
    let config = Config::from_json_str(r#"{ "schemes": [] }"#).unwrap();
    assert!(config.schemes.is_empty());
}

#[test]
fn invalid_scheme_fails_json_load() {
    let err = Config::from_json_str(
        r#"{ "schemes": [ { "name": "bad", "hrt_kind": "AHRT", "hrt_entries": 96 } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::EntriesNotPowerOfTwo { entries: 96, .. }));
}

#[test]
fn error_messages_name_the_scheme() {
    let scheme = SchemeConfig::new(HrtKind::Associative, 256, 3, 12, AutomatonKind::A2);
    let msg = scheme.validate().unwrap_err().to_string();
    assert!(msg.contains("AT_AHRT_256_12_A2"), "message was: {msg}");
}

// ══════════════════════════════════════════════════════════
// 4. Loading before overrides
// ══════════════════════════════════════════════════════════

const SHADOWING_CONFIG: &str =
    r#"{ "schemes": [ { "name": "AlwaysTaken", "hrt_kind": "HHRT", "hrt_entries": 64 } ] }"#;

#[test]
fn parse_json_defers_validation() {
    assert!(matches!(
        Config::from_json_str(SHADOWING_CONFIG),
        Err(ConfigError::DuplicateName(_))
    ));

    let mut config = Config::parse_json(SHADOWING_CONFIG).unwrap();
    config.baselines = BaselineConfig::none();
    assert!(config.validate().is_ok(), "override makes the name legal");
}

#[test]
fn read_file_defers_validation() {
    let file = temp_file(SHADOWING_CONFIG);
    assert!(Config::from_file(file.path()).is_err());

    let mut config = Config::read_file(file.path()).unwrap();
    config.baselines.always_taken = false;
    assert!(config.validate().is_ok());
}

#[test]
fn parse_json_still_rejects_malformed_input() {
    assert!(matches!(Config::parse_json("[1, 2"), Err(ConfigError::Json(_))));
}
