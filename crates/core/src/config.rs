//! Configuration system for the branch prediction simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a simulation run. It provides:
//! 1. **Defaults:** Baseline history table geometry and history width.
//! 2. **Structures:** Per-scheme configuration, baseline selection, and run limits.
//! 3. **Enums:** History register table kinds and pattern table automata.
//! 4. **Catalog:** The default set of schemes, covering HRT implementation, automaton,
//!    and history length sweeps.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or via `Config::default()`.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{ConfigError, HISTORY_MAX_BITS};

/// Default configuration constants for the simulator.
///
/// These values are used when a scheme omits a field in its JSON description.
mod defaults {
    /// Default number of history register table entries.
    pub const HRT_ENTRIES: usize = 512;

    /// Default associativity of the associative history register table.
    pub const HRT_WAYS: usize = 4;

    /// Default history register width in bits (`k`).
    pub const HISTORY_BITS: u32 = 12;
}

/// History register table implementation.
///
/// Selects the first-level structure holding per-branch history registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HrtKind {
    /// Ideal table: one register per static branch, unbounded, no interference.
    #[serde(alias = "IHRT")]
    Ideal,
    /// Hashed table: direct-mapped and untagged; colliding branches share a register.
    #[serde(alias = "HHRT")]
    Hashed,
    /// Associative table: tagged, set-associative, round-robin replacement.
    #[default]
    #[serde(alias = "AHRT")]
    Associative,
}

impl HrtKind {
    /// Short label used in scheme names (`IHRT`, `HHRT`, `AHRT`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ideal => "IHRT",
            Self::Hashed => "HHRT",
            Self::Associative => "AHRT",
        }
    }
}

impl fmt::Display for HrtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pattern table automaton.
///
/// `A3` and `A4` are kept as distinct labels but behave exactly like `A2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AutomatonKind {
    /// Remembers only the last outcome.
    #[serde(alias = "LT")]
    LastTime,
    /// 2-bit saturating up/down counter.
    #[default]
    A2,
    /// Same transitions as `A2`.
    A3,
    /// Same transitions as `A2`.
    A4,
}

impl AutomatonKind {
    /// Short label used in scheme names (`LT`, `A2`, `A3`, `A4`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::LastTime => "LT",
            Self::A2 => "A2",
            Self::A3 => "A3",
            Self::A4 => "A4",
        }
    }
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One two-level adaptive training scheme: `AT(HRT(entries, kSR), PT(2^k, automaton))`.
///
/// # Examples
///
/// ```
/// use atsim_core::config::{AutomatonKind, HrtKind, SchemeConfig};
///
/// let json = r#"{ "name": "small", "hrt_kind": "AHRT", "hrt_entries": 64, "history_bits": 6 }"#;
/// let scheme: SchemeConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(scheme.hrt_kind, HrtKind::Associative);
/// assert_eq!(scheme.hrt_ways, 4);
/// assert_eq!(scheme.automaton, AutomatonKind::A2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeConfig {
    /// Label printed in reports.
    pub name: String,

    /// History register table implementation.
    #[serde(default)]
    pub hrt_kind: HrtKind,

    /// History register table entries (ignored for the ideal table).
    #[serde(default = "SchemeConfig::default_entries")]
    pub hrt_entries: usize,

    /// Associativity (only used by the associative table).
    #[serde(default = "SchemeConfig::default_ways")]
    pub hrt_ways: usize,

    /// History register width `k`; the pattern table has `2^k` entries.
    #[serde(default = "SchemeConfig::default_history_bits")]
    pub history_bits: u32,

    /// Pattern table automaton.
    #[serde(default)]
    pub automaton: AutomatonKind,
}

impl SchemeConfig {
    /// Creates a scheme labelled with its canonical name.
    ///
    /// # Arguments
    ///
    /// * `hrt_kind` - History register table implementation.
    /// * `hrt_entries` - Table entries (ignored for [`HrtKind::Ideal`]).
    /// * `hrt_ways` - Associativity (only used by [`HrtKind::Associative`]).
    /// * `history_bits` - History register width `k`.
    /// * `automaton` - Pattern table automaton.
    pub fn new(
        hrt_kind: HrtKind,
        hrt_entries: usize,
        hrt_ways: usize,
        history_bits: u32,
        automaton: AutomatonKind,
    ) -> Self {
        let mut scheme = Self {
            name: String::new(),
            hrt_kind,
            hrt_entries,
            hrt_ways,
            history_bits,
            automaton,
        };
        scheme.name = scheme.canonical_name();
        scheme
    }

    /// Returns `AT_<HRT>_<entries>_<k>_<automaton>`; ideal tables omit the entry count.
    pub fn canonical_name(&self) -> String {
        match self.hrt_kind {
            HrtKind::Ideal => format!("AT_IHRT_{}_{}", self.history_bits, self.automaton),
            kind => format!(
                "AT_{}_{}_{}_{}",
                kind, self.hrt_entries, self.history_bits, self.automaton
            ),
        }
    }

    /// Number of sets of the associative table (`entries / ways`).
    pub const fn sets(&self) -> usize {
        if self.hrt_ways == 0 {
            0
        } else {
            self.hrt_entries / self.hrt_ways
        }
    }

    /// Checks that the predictor core can model this scheme.
    ///
    /// The core assumes power-of-two tables and a history that fits in
    /// [`History`](crate::common::History); it does not re-check either.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.history_bits == 0 || self.history_bits > HISTORY_MAX_BITS {
            return Err(ConfigError::HistoryBits {
                scheme: self.name.clone(),
                bits: self.history_bits,
            });
        }
        if self.hrt_kind == HrtKind::Ideal {
            return Ok(());
        }
        if !self.hrt_entries.is_power_of_two() {
            return Err(ConfigError::EntriesNotPowerOfTwo {
                scheme: self.name.clone(),
                entries: self.hrt_entries,
            });
        }
        if self.hrt_kind == HrtKind::Associative
            && (!self.hrt_ways.is_power_of_two() || self.hrt_ways > self.hrt_entries)
        {
            return Err(ConfigError::WaysInvalid {
                scheme: self.name.clone(),
                ways: self.hrt_ways,
                entries: self.hrt_entries,
            });
        }
        Ok(())
    }

    /// Returns the default history register table size.
    fn default_entries() -> usize {
        defaults::HRT_ENTRIES
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::HRT_WAYS
    }

    /// Returns the default history width.
    fn default_history_bits() -> u32 {
        defaults::HISTORY_BITS
    }

    /// Returns the default evaluation catalog.
    ///
    /// Three sweeps around `AHRT(512, 12SR)` with `A2`:
    /// 1. HRT implementation and size (AHRT/HHRT 256 and 512, IHRT).
    /// 2. Automaton (LT, A3, A4).
    /// 3. History length (10, 8, 6 bits).
    pub fn catalog() -> Vec<Self> {
        use AutomatonKind::{A2, A3, A4, LastTime};
        use HrtKind::{Associative, Hashed, Ideal};

        let ways = defaults::HRT_WAYS;
        vec![
            Self::new(Associative, 256, ways, 12, A2),
            Self::new(Associative, 512, ways, 12, A2),
            Self::new(Hashed, 256, 1, 12, A2),
            Self::new(Hashed, 512, 1, 12, A2),
            Self::new(Ideal, 0, 0, 12, A2),
            Self::new(Associative, 512, ways, 12, LastTime),
            Self::new(Associative, 512, ways, 12, A3),
            Self::new(Associative, 512, ways, 12, A4),
            Self::new(Associative, 512, ways, 10, A2),
            Self::new(Associative, 512, ways, 8, A2),
            Self::new(Associative, 512, ways, 6, A2),
        ]
    }
}

/// Baseline predictors evaluated next to the two-level schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Evaluate the static always-taken predictor.
    #[serde(default = "BaselineConfig::enabled")]
    pub always_taken: bool,

    /// Evaluate the per-branch 2-bit counter predictor.
    #[serde(default = "BaselineConfig::enabled")]
    pub bimodal: bool,
}

impl BaselineConfig {
    /// Baselines are on unless switched off.
    fn enabled() -> bool {
        true
    }

    /// Returns a configuration with every baseline disabled.
    pub const fn none() -> Self {
        Self {
            always_taken: false,
            bimodal: false,
        }
    }
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            always_taken: true,
            bimodal: true,
        }
    }
}

/// Limits applied to a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Stop after this many events (the whole trace when unset).
    #[serde(default)]
    pub max_events: Option<u64>,
}

/// Root configuration for a simulation run.
///
/// # Examples
///
/// ```
/// use atsim_core::config::{Config, HrtKind};
///
/// let json = r#"{
///     "schemes": [
///         { "name": "AT_HHRT_256_12_A2", "hrt_kind": "Hashed", "hrt_entries": 256, "history_bits": 12 },
///         { "name": "AT_IHRT_8_LT", "hrt_kind": "IHRT", "history_bits": 8, "automaton": "LT" }
///     ],
///     "baselines": { "bimodal": false }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.schemes.len(), 2);
/// assert_eq!(config.schemes[1].hrt_kind, HrtKind::Ideal);
/// assert!(config.baselines.always_taken);
/// assert!(!config.baselines.bimodal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Two-level schemes, evaluated and reported in this order.
    #[serde(default = "SchemeConfig::catalog")]
    pub schemes: Vec<SchemeConfig>,

    /// Baseline predictors.
    #[serde(default)]
    pub baselines: BaselineConfig,

    /// Run limits.
    #[serde(default)]
    pub limits: LimitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schemes: SchemeConfig::catalog(),
            baselines: BaselineConfig::default(),
            limits: LimitConfig::default(),
        }
    }
}

impl Config {
    /// Parses a JSON configuration without validating it.
    ///
    /// Use this when overrides are applied before [`Config::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input.
    pub fn parse_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::parse_json`].
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_json(&json)
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or the first validation error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_json(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// As [`Config::read_file`], or the first validation error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every scheme and checks that report labels are unique.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schemes.is_empty() && !self.baselines.always_taken && !self.baselines.bimodal {
            return Err(ConfigError::NoPredictors);
        }

        let mut names = HashSet::new();
        for name in self.baseline_names() {
            let _ = names.insert(name);
        }
        for scheme in &self.schemes {
            scheme.validate()?;
            if !names.insert(scheme.name.as_str()) {
                return Err(ConfigError::DuplicateName(scheme.name.clone()));
            }
        }
        Ok(())
    }

    /// Names of the enabled baselines, in report order.
    fn baseline_names(&self) -> impl Iterator<Item = &'static str> {
        use crate::predictor::{AlwaysTakenPredictor, BimodalPredictor};

        let always = self.baselines.always_taken.then_some(AlwaysTakenPredictor::NAME);
        let bimodal = self.baselines.bimodal.then_some(BimodalPredictor::NAME);
        always.into_iter().chain(bimodal)
    }
}
