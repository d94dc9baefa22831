//! Trace-Driven Simulator.
//!
//! Replays one branch event stream through every configured predictor. For each
//! event and each predictor, in order:
//! 1. **Predict:** Query the predictor with the branch address.
//! 2. **Score:** Compare with the resolved outcome and record the hit or miss.
//! 3. **Train:** Update the predictor with the outcome.
//!
//! Predictors never share state, so their relative order does not affect results.

use tracing::{debug, trace};

use super::trace::BranchEvent;
use crate::common::TraceError;
use crate::config::Config;
use crate::predictor::{BranchPredictor, PredictorWrapper};
use crate::stats::{PredictorStats, SchemeResult, SimReport};

/// A predictor together with its running score.
#[derive(Clone, Debug)]
struct Entry {
    predictor: PredictorWrapper,
    stats: PredictorStats,
}

/// Drives a set of predictors over a branch trace.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// Predictors in report order.
    entries: Vec<Entry>,
    /// Stop after this many events, if set.
    max_events: Option<u64>,
    /// Events simulated so far.
    events: u64,
}

impl Simulator {
    /// Builds every predictor named by `config`.
    ///
    /// The configuration is assumed valid; see [`Config::validate`].
    pub fn new(config: &Config) -> Self {
        let entries: Vec<Entry> = PredictorWrapper::from_config(config)
            .into_iter()
            .map(|predictor| Entry {
                predictor,
                stats: PredictorStats::default(),
            })
            .collect();
        debug!(
            predictors = entries.len(),
            max_events = ?config.limits.max_events,
            "simulator ready"
        );
        Self {
            entries,
            max_events: config.limits.max_events,
            events: 0,
        }
    }

    /// Feeds one event to every predictor.
    pub fn step(&mut self, event: BranchEvent) {
        let BranchEvent { pc, outcome } = event;
        for entry in &mut self.entries {
            let hit = outcome.matches(entry.predictor.predict(pc));
            entry.stats.record(hit);
            trace!(pc, %outcome, predictor = entry.predictor.name(), hit);
            entry.predictor.update(pc, outcome);
        }
        self.events += 1;
    }

    /// Simulates a stream of events.
    ///
    /// Stops early once the configured event limit is reached.
    ///
    /// # Arguments
    ///
    /// * `events` - Event source, typically a [`TraceReader`](super::TraceReader).
    ///
    /// # Returns
    ///
    /// The number of events simulated by this call.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by `events`; events before it stay recorded.
    pub fn run<I>(&mut self, events: I) -> Result<u64, TraceError>
    where
        I: IntoIterator<Item = Result<BranchEvent, TraceError>>,
    {
        let start = self.events;
        for event in events {
            if self.limit_reached() {
                debug!(limit = ?self.max_events, "event limit reached");
                break;
            }
            self.step(event?);
        }
        let simulated = self.events - start;
        debug!(events = simulated, total = self.events, "run finished");
        Ok(simulated)
    }

    fn limit_reached(&self) -> bool {
        self.max_events.is_some_and(|max| self.events >= max)
    }

    /// Total events simulated.
    pub const fn events(&self) -> u64 {
        self.events
    }

    /// Predictors and their statistics, in report order.
    pub fn results(&self) -> impl Iterator<Item = (&PredictorWrapper, &PredictorStats)> {
        self.entries.iter().map(|e| (&e.predictor, &e.stats))
    }

    /// Snapshot of the current results.
    ///
    /// # Arguments
    ///
    /// * `trace` - Trace file name shown in the report header.
    /// * `benchmark` - Benchmark label written into every CSV row.
    pub fn report(&self, trace: &str, benchmark: &str) -> SimReport {
        let results = self
            .results()
            .map(|(predictor, stats)| SchemeResult::new(predictor, stats))
            .collect();
        SimReport {
            trace: trace.to_owned(),
            benchmark: benchmark.to_owned(),
            results,
        }
    }
}
