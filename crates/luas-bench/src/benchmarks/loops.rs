// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loop strategy comparison
//!
//! Sums the same freshly-generated array with three loop shapes: an
//! indexed `for`, an iterator `for`, and `Iterator::fold`. The array is
//! regenerated per iteration so no strategy benefits from warmed state.

use crate::definition::{BenchConfig, BenchReport, Benchmark, ImplementationRun, RunOptions};
use crate::sampler::time_pass;
use luas_core::{Result, stats};

/// Array length when none is configured.
pub const DEFAULT_ARRAY_LEN: usize = 10_000;

/// The loop-strategy benchmark definition.
#[derive(Debug, Default)]
pub struct LoopsBenchmark;

impl LoopsBenchmark {
    /// Build the definition.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

// The indexed form is itself a strategy under test.
#[allow(clippy::needless_range_loop)]
fn sum_indexed(xs: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..xs.len() {
        sum += xs[i];
    }
    sum
}

fn sum_iterator(xs: &[f64]) -> f64 {
    let mut sum = 0.0;
    for &x in xs {
        sum += x;
    }
    sum
}

fn sum_fold(xs: &[f64]) -> f64 {
    xs.iter().fold(0.0, |acc, &x| acc + x)
}

fn resolve_array_len(config: BenchConfig) -> usize {
    match config {
        BenchConfig::Loops { array_len } if array_len > 0 => array_len,
        BenchConfig::Default => DEFAULT_ARRAY_LEN,
        other => {
            tracing::warn!(
                config = ?other,
                default = DEFAULT_ARRAY_LEN,
                "invalid loops config, using default"
            );
            DEFAULT_ARRAY_LEN
        }
    }
}

impl Benchmark for LoopsBenchmark {
    fn id(&self) -> &'static str {
        "loops"
    }

    fn label(&self) -> &'static str {
        "Loop Strategy Comparison"
    }

    fn description(&self) -> &'static str {
        "Compares indexed, iterator, and fold loops summing an array."
    }

    fn default_config(&self) -> BenchConfig {
        BenchConfig::Loops {
            array_len: DEFAULT_ARRAY_LEN,
        }
    }

    fn run(&mut self, options: &RunOptions) -> Result<BenchReport> {
        let array_len = resolve_array_len(options.config);
        let iterations = options.effective_iterations();
        tracing::debug!(array_len, iterations, "starting loops benchmark");

        let mut indexed_samples = Vec::with_capacity(iterations);
        let mut iterator_samples = Vec::with_capacity(iterations);
        let mut fold_samples = Vec::with_capacity(iterations);

        for _ in 0..iterations {
            let xs: Vec<f64> = (1..=array_len).map(|i| i as f64).collect();

            let (ms, _) = time_pass(|| sum_indexed(&xs));
            indexed_samples.push(ms);
            let (ms, _) = time_pass(|| sum_iterator(&xs));
            iterator_samples.push(ms);
            let (ms, _) = time_pass(|| sum_fold(&xs));
            fold_samples.push(ms);
        }

        Ok(BenchReport {
            implementations: vec![
                ImplementationRun {
                    name: "indexed",
                    label: "Indexed for loop",
                    stats: stats::compute(&indexed_samples),
                },
                ImplementationRun {
                    name: "iterator",
                    label: "Iterator for loop",
                    stats: stats::compute(&iterator_samples),
                },
                ImplementationRun {
                    name: "fold",
                    label: "Iterator fold",
                    stats: stats::compute(&fold_samples),
                },
            ],
            items_processed: array_len as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_agree() {
        let xs: Vec<f64> = (1..=100).map(f64::from).collect();
        let expected = 5050.0;
        assert!((sum_indexed(&xs) - expected).abs() < 1e-9);
        assert!((sum_iterator(&xs) - expected).abs() < 1e-9);
        assert!((sum_fold(&xs) - expected).abs() < 1e-9);
    }

    #[test]
    fn run_produces_three_implementations() {
        let mut bench = LoopsBenchmark::new();
        let options = RunOptions {
            iterations: 2,
            config: BenchConfig::Loops { array_len: 256 },
        };
        let report = bench.run(&options).unwrap();
        assert_eq!(report.items_processed, 256);
        let names: Vec<&str> = report.implementations.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["indexed", "iterator", "fold"]);
    }

    #[test]
    fn invalid_config_falls_back_to_default() {
        assert_eq!(
            resolve_array_len(BenchConfig::Loops { array_len: 0 }),
            DEFAULT_ARRAY_LEN
        );
        assert_eq!(
            resolve_array_len(BenchConfig::ByteCompare {
                internal_iterations: 9
            }),
            DEFAULT_ARRAY_LEN
        );
        assert_eq!(resolve_array_len(BenchConfig::Loops { array_len: 33 }), 33);
    }
}
