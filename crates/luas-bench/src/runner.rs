// SPDX-License-Identifier: MIT OR Apache-2.0
//! State machine driving runs and retention
//!
//! A [`Runner`] owns exactly one active benchmark definition, its bounded
//! history, and the most recent report. Per benchmark id the state machine
//! is `Idle -> Running -> (Idle | Failed)`: a run while already `Running`
//! is a no-op rather than a queued overlap, a failed run clears the
//! current report but never touches the history already recorded, and
//! selecting a different benchmark resets both report and history.
//!
//! All work is synchronous on the caller's thread. Auto-repeat is a
//! cooperative fixed-cadence loop: a slow run skips the ticks it missed
//! instead of queueing them, and stopping the loop is the only
//! cancellation; in-flight runs are never interrupted.

use crate::clock::{Clock, SystemClock};
use crate::definition::{BenchReport, Benchmark, RunOptions};
use crate::history::{History, HistoryPoint};
use crate::registry;
use luas_core::{LuasError, Result};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Run lifecycle per benchmark id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run in flight; the last run (if any) succeeded.
    Idle,
    /// A run is in flight; further runs are rejected.
    Running,
    /// The last run failed; the current report has been cleared.
    Failed,
}

/// Drives one benchmark definition through timed runs and maintains its
/// historical series.
#[derive(Debug)]
pub struct Runner<C: Clock = SystemClock> {
    benchmark: Box<dyn Benchmark>,
    history: History,
    report: Option<BenchReport>,
    state: RunState,
    max_history: usize,
    clock: C,
}

impl Runner<SystemClock> {
    /// Build a runner for benchmark `id` with wall-clock history labels.
    ///
    /// # Errors
    ///
    /// [`LuasError::UnknownBenchmark`] when `id` is not registered.
    pub fn new(id: &str, max_history: usize) -> Result<Self> {
        Self::with_clock(id, max_history, SystemClock)
    }
}

impl<C: Clock> Runner<C> {
    /// Build a runner with an explicit clock (tests pin labels this way).
    ///
    /// # Errors
    ///
    /// [`LuasError::UnknownBenchmark`] when `id` is not registered.
    pub fn with_clock(id: &str, max_history: usize, clock: C) -> Result<Self> {
        let benchmark = registry::get(id).ok_or_else(|| LuasError::UnknownBenchmark {
            id: id.to_string(),
        })?;
        Ok(Self::with_benchmark(benchmark, max_history, clock))
    }

    /// Build a runner around a caller-supplied definition, bypassing the
    /// registry. Custom experiments plug in here.
    pub fn with_benchmark(benchmark: Box<dyn Benchmark>, max_history: usize, clock: C) -> Self {
        Self {
            benchmark,
            history: History::new(max_history),
            report: None,
            state: RunState::Idle,
            max_history,
            clock,
        }
    }

    /// Switch the active benchmark. Clears the current report and installs
    /// a fresh history for the new id; state returns to `Idle`.
    ///
    /// # Errors
    ///
    /// [`LuasError::UnknownBenchmark`] when `id` is not registered; the
    /// runner is left unchanged.
    pub fn select(&mut self, id: &str) -> Result<()> {
        let benchmark = registry::get(id).ok_or_else(|| LuasError::UnknownBenchmark {
            id: id.to_string(),
        })?;
        tracing::debug!(id, "benchmark selected");
        self.benchmark = benchmark;
        self.history = History::new(self.max_history);
        self.report = None;
        self.state = RunState::Idle;
        Ok(())
    }

    /// Id of the active benchmark.
    #[must_use]
    pub fn benchmark_id(&self) -> &'static str {
        self.benchmark.id()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Most recent successful report, if any.
    #[must_use]
    pub fn report(&self) -> Option<&BenchReport> {
        self.report.as_ref()
    }

    /// The historical series for the active benchmark.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Replace the history with externally persisted points, truncated to
    /// the retention bound. The persistence boundary: where the points
    /// come from is the caller's concern.
    pub fn install_history(&mut self, points: Vec<HistoryPoint>) {
        self.history = History::from_points(points, self.max_history);
    }

    /// Run the active benchmark once.
    ///
    /// Returns `Ok(None)` without doing anything when a run is already in
    /// flight. On success the report is stored, one historical point (each
    /// implementation's p99, labeled by the clock) is appended, and the
    /// stored report is returned. On failure the current report is cleared
    /// so stale success data cannot be shown, the history is left exactly
    /// as it was, and the failure is surfaced.
    ///
    /// # Errors
    ///
    /// [`LuasError::ExecutionFailed`] wrapping the definition's error.
    pub fn run(&mut self, options: &RunOptions) -> Result<Option<&BenchReport>> {
        if self.state == RunState::Running {
            tracing::debug!(id = self.benchmark.id(), "run skipped, already running");
            return Ok(None);
        }
        self.state = RunState::Running;
        match self.benchmark.run(options) {
            Ok(report) => {
                self.record_historical_point(&report);
                tracing::info!(
                    id = self.benchmark.id(),
                    items = report.items_processed,
                    "run complete"
                );
                self.report = Some(report);
                self.state = RunState::Idle;
                Ok(self.report.as_ref())
            }
            Err(source) => {
                self.report = None;
                self.state = RunState::Failed;
                Err(LuasError::ExecutionFailed {
                    id: self.benchmark.id().to_string(),
                    source: Box::new(source),
                })
            }
        }
    }

    /// Run repeatedly on a fixed cadence, `rounds` times in total.
    ///
    /// Ticks are derived from the schedule, not from run completion: when
    /// a run overruns the interval, the missed ticks are skipped and the
    /// next run fires on the next future tick. Failures are logged and the
    /// cadence continues (the failing run has already cleared the report
    /// and preserved the history).
    pub fn run_repeating(&mut self, options: &RunOptions, interval: Duration, rounds: usize) {
        let mut next = Instant::now() + interval;
        for round in 0..rounds {
            if let Err(error) = self.run(options) {
                tracing::error!(id = self.benchmark.id(), %error, round, "run failed");
            }
            if round + 1 == rounds {
                break;
            }
            let now = Instant::now();
            let mut target = next;
            // A slow run skips the ticks it missed rather than queueing them.
            while target <= now {
                target += interval;
            }
            std::thread::sleep(target - now);
            next = target + interval;
        }
    }

    /// Force the lifecycle state, so tests can observe the in-flight
    /// guard that single-threaded callers never see.
    #[cfg(test)]
    fn set_state(&mut self, state: RunState) {
        self.state = state;
    }

    fn record_historical_point(&mut self, report: &BenchReport) {
        let p99: BTreeMap<String, f64> = report
            .implementations
            .iter()
            .map(|run| (run.name.to_string(), run.stats.p99))
            .collect();
        self.history.push(HistoryPoint {
            time: self.clock.timestamp_label(),
            p99,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::BenchConfig;

    struct FixedClock;

    impl Clock for FixedClock {
        fn timestamp_label(&self) -> String {
            "12:00:00".to_string()
        }
    }

    fn loops_options() -> RunOptions {
        RunOptions {
            iterations: 2,
            config: BenchConfig::Loops { array_len: 64 },
        }
    }

    #[test]
    fn unknown_benchmark_is_an_error() {
        let err = Runner::new("nope", 10).unwrap_err();
        assert!(matches!(err, LuasError::UnknownBenchmark { id } if id == "nope"));
    }

    #[test]
    fn successful_run_stores_report_and_appends_history() {
        let mut runner = Runner::with_clock("loops", 10, FixedClock).unwrap();
        assert_eq!(runner.state(), RunState::Idle);
        let report = runner.run(&loops_options()).unwrap().cloned().unwrap();
        assert_eq!(report.items_processed, 64);
        assert_eq!(runner.state(), RunState::Idle);
        assert_eq!(runner.history().len(), 1);

        let point = runner.history().points().next().unwrap();
        assert_eq!(point.time, "12:00:00");
        for run in &report.implementations {
            assert_eq!(point.p99.get(run.name), Some(&run.stats.p99));
        }
    }

    #[test]
    fn in_flight_run_is_rejected_as_a_no_op() {
        let mut runner = Runner::with_clock("loops", 10, FixedClock).unwrap();
        runner.set_state(RunState::Running);

        // At most one concurrent run per id: the tick is skipped, nothing
        // is timed or recorded, and the state is left alone.
        let outcome = runner.run(&loops_options()).unwrap();
        assert!(outcome.is_none());
        assert_eq!(runner.state(), RunState::Running);
        assert!(runner.report().is_none());
        assert!(runner.history().is_empty());

        runner.set_state(RunState::Idle);
        assert!(runner.run(&loops_options()).unwrap().is_some());
        assert_eq!(runner.history().len(), 1);
    }

    #[test]
    fn history_respects_retention_bound() {
        let mut runner = Runner::with_clock("loops", 3, FixedClock).unwrap();
        for _ in 0..5 {
            let _ = runner.run(&loops_options()).unwrap();
        }
        assert_eq!(runner.history().len(), 3);
    }

    #[test]
    fn select_resets_report_and_history() {
        let mut runner = Runner::with_clock("loops", 10, FixedClock).unwrap();
        let _ = runner.run(&loops_options()).unwrap();
        assert!(runner.report().is_some());

        runner.select("bytes").unwrap();
        assert_eq!(runner.benchmark_id(), "bytes");
        assert!(runner.report().is_none());
        assert!(runner.history().is_empty());
        assert_eq!(runner.state(), RunState::Idle);
    }

    #[test]
    fn select_unknown_leaves_runner_unchanged() {
        let mut runner = Runner::with_clock("loops", 10, FixedClock).unwrap();
        let _ = runner.run(&loops_options()).unwrap();
        assert!(runner.select("nope").is_err());
        assert_eq!(runner.benchmark_id(), "loops");
        assert!(runner.report().is_some());
        assert_eq!(runner.history().len(), 1);
    }

    #[test]
    fn install_history_truncates_to_bound() {
        let mut runner = Runner::with_clock("loops", 2, FixedClock).unwrap();
        let points: Vec<HistoryPoint> = (0..5)
            .map(|i| HistoryPoint {
                time: format!("t{i}"),
                p99: BTreeMap::new(),
            })
            .collect();
        runner.install_history(points);
        let labels: Vec<&str> = runner.history().points().map(|p| p.time.as_str()).collect();
        assert_eq!(labels, vec!["t3", "t4"]);
    }

    #[derive(Debug)]
    struct FlakyBenchmark {
        fail: bool,
    }

    impl Benchmark for FlakyBenchmark {
        fn id(&self) -> &'static str {
            "flaky"
        }
        fn label(&self) -> &'static str {
            "Flaky"
        }
        fn description(&self) -> &'static str {
            "Fails on demand"
        }
        fn default_config(&self) -> BenchConfig {
            BenchConfig::Default
        }
        fn run(&mut self, _options: &RunOptions) -> luas_core::Result<BenchReport> {
            if self.fail {
                Err(luas_core::DecodeError::Truncated { offset: 0 }.into())
            } else {
                Ok(BenchReport {
                    implementations: vec![],
                    items_processed: 1,
                })
            }
        }
    }

    #[test]
    fn failure_clears_report_and_preserves_history() {
        let bench = Box::new(FlakyBenchmark { fail: false });
        let mut runner = Runner::with_benchmark(bench, 10, FixedClock);
        let _ = runner.run(&RunOptions::new(1)).unwrap();
        assert!(runner.report().is_some());
        assert_eq!(runner.history().len(), 1);

        // Flip the definition into failing mode through a fresh runner
        // sharing the recorded history.
        let snapshot = runner.history().snapshot();
        let mut runner =
            Runner::with_benchmark(Box::new(FlakyBenchmark { fail: true }), 10, FixedClock);
        runner.install_history(snapshot);

        let err = runner.run(&RunOptions::new(1)).unwrap_err();
        assert!(matches!(err, LuasError::ExecutionFailed { ref id, .. } if id == "flaky"));
        assert_eq!(runner.state(), RunState::Failed);
        assert!(runner.report().is_none());
        // The series already recorded is untouched by the failed tick.
        assert_eq!(runner.history().len(), 1);
    }

    #[test]
    fn failed_runner_can_run_again() {
        let mut runner =
            Runner::with_benchmark(Box::new(FlakyBenchmark { fail: true }), 10, FixedClock);
        assert!(runner.run(&RunOptions::new(1)).is_err());
        assert_eq!(runner.state(), RunState::Failed);
        // Failed is not Running; the next tick may proceed.
        assert!(runner.run(&RunOptions::new(1)).is_err());
    }

    #[test]
    fn repeating_runs_every_round() {
        let mut runner = Runner::with_clock("loops", 10, FixedClock).unwrap();
        runner.run_repeating(&loops_options(), Duration::from_millis(1), 3);
        assert_eq!(runner.history().len(), 3);
        assert_eq!(runner.state(), RunState::Idle);
    }
}
