// SPDX-License-Identifier: MIT OR Apache-2.0
//! Benchmark trait, run options, and typed configuration
//!
//! A benchmark definition is the static description of one comparable
//! experiment: its competing implementations, its data generator, and its
//! tunable knobs. New experiments implement [`Benchmark`] and register in
//! [`crate::registry`]; the runner never changes.

use luas_core::{Result, Summary};
use serde::{Deserialize, Serialize};

/// Per-benchmark tunable knobs, one variant per definition.
///
/// Each definition validates its own variant. A mismatched variant or an
/// out-of-range value is replaced by the definition's documented default
/// (logged at `warn`), never rejected; `Default` always means "use the
/// defaults".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchConfig {
    /// Use the definition's default configuration.
    #[default]
    Default,
    /// Knobs for the tagged-vs-columnar decode benchmark.
    Decode {
        /// Messages generated and decoded per iteration.
        num_messages: usize,
    },
    /// Knobs for the loop-strategy benchmark.
    Loops {
        /// Length of the summed array.
        array_len: usize,
    },
    /// Knobs for the byte-slice-vs-string matching benchmark.
    ByteCompare {
        /// Comparisons performed inside one timed pass.
        internal_iterations: usize,
    },
}

/// Options for one benchmark run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Timed iterations per implementation. Values below 1 are clamped to 1.
    pub iterations: usize,
    /// Benchmark-specific configuration.
    pub config: BenchConfig,
}

impl RunOptions {
    /// Options with `iterations` timed passes and default config.
    #[must_use]
    pub const fn new(iterations: usize) -> Self {
        Self {
            iterations,
            config: BenchConfig::Default,
        }
    }

    /// Iteration count with the ≥ 1 floor applied.
    #[must_use]
    pub const fn effective_iterations(&self) -> usize {
        if self.iterations == 0 { 1 } else { self.iterations }
    }
}

/// One implementation's reduced timings within a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementationRun {
    /// Stable machine name, also the history column key.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Reduced timing samples, in milliseconds.
    pub stats: Summary,
}

/// Snapshot of one full benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    /// One entry per competing implementation, in registration order.
    pub implementations: Vec<ImplementationRun>,
    /// Units of work per iteration (messages, elements, or inner
    /// comparisons depending on the benchmark); callers derive throughput
    /// from this.
    pub items_processed: u64,
}

/// One comparable experiment: data generator plus competing
/// implementations plus config schema.
pub trait Benchmark: std::fmt::Debug {
    /// Stable identifier used for registry lookup and history keys.
    fn id(&self) -> &'static str;
    /// Human-readable label.
    fn label(&self) -> &'static str;
    /// One-line description of what is compared.
    fn description(&self) -> &'static str;
    /// The documented default configuration.
    fn default_config(&self) -> BenchConfig;
    /// Run the experiment: regenerate fresh input for every iteration,
    /// time each competing implementation over that identical input, and
    /// reduce the samples per implementation.
    ///
    /// # Errors
    ///
    /// Any decode failure inside a timed pass, propagated for the runner
    /// to wrap as an execution failure.
    fn run(&mut self, options: &RunOptions) -> Result<BenchReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterations_floor_at_one() {
        assert_eq!(RunOptions::new(0).effective_iterations(), 1);
        assert_eq!(RunOptions::new(7).effective_iterations(), 7);
    }

    #[test]
    fn config_json_shape() {
        let json = serde_json::to_string(&BenchConfig::Decode { num_messages: 5000 }).unwrap();
        assert_eq!(json, r#"{"decode":{"num_messages":5000}}"#);
        let parsed: BenchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, BenchConfig::Decode { num_messages: 5000 });
        let parsed: BenchConfig = serde_json::from_str(r#""default""#).unwrap();
        assert_eq!(parsed, BenchConfig::Default);
    }
}
