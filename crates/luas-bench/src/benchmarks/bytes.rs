// SPDX-License-Identifier: MIT OR Apache-2.0
//! Byte-slice vs string matching
//!
//! Matches a small binary token against a reference four ways: a manual
//! indexed byte loop, an iterator zip, UTF-8 decoding on the fly before a
//! string compare, and a pre-decoded string compare. Each timed pass
//! repeats the comparison `internal_iterations` times so the work is large
//! enough to measure.

use crate::definition::{BenchConfig, BenchReport, Benchmark, ImplementationRun, RunOptions};
use crate::sampler::time_pass;
use luas_core::{Result, stats};
use std::hint::black_box;

/// Inner comparisons per timed pass when none are configured.
pub const DEFAULT_INTERNAL_ITERATIONS: usize = 10_000;

const CALL: &[u8] = b"CALL";
const PUT: &[u8] = b"PUT";
const CALL_TEXT: &str = "CALL";

/// The byte-vs-string matching benchmark definition.
#[derive(Debug, Default)]
pub struct ByteCompareBenchmark;

impl ByteCompareBenchmark {
    /// Build the definition.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

// The indexed form is itself a strategy under test.
#[allow(clippy::needless_range_loop)]
fn eq_byte_loop(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for i in 0..a.len() {
        if a[i] != b[i] {
            return false;
        }
    }
    true
}

fn eq_byte_zip(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

fn eq_decode_on_the_fly(binary: &[u8], reference: &str) -> bool {
    std::str::from_utf8(binary).is_ok_and(|decoded| decoded == reference)
}

fn eq_pre_decoded(decoded: &str, reference: &str) -> bool {
    decoded == reference
}

fn resolve_internal_iterations(config: BenchConfig) -> usize {
    match config {
        BenchConfig::ByteCompare {
            internal_iterations,
        } if internal_iterations > 0 => internal_iterations,
        BenchConfig::Default => DEFAULT_INTERNAL_ITERATIONS,
        other => {
            tracing::warn!(
                config = ?other,
                default = DEFAULT_INTERNAL_ITERATIONS,
                "invalid byte-compare config, using default"
            );
            DEFAULT_INTERNAL_ITERATIONS
        }
    }
}

impl Benchmark for ByteCompareBenchmark {
    fn id(&self) -> &'static str {
        "bytes"
    }

    fn label(&self) -> &'static str {
        "Byte-Slice vs String Matching"
    }

    fn description(&self) -> &'static str {
        "Compares byte-slice matching against string matching with and without UTF-8 decoding."
    }

    fn default_config(&self) -> BenchConfig {
        BenchConfig::ByteCompare {
            internal_iterations: DEFAULT_INTERNAL_ITERATIONS,
        }
    }

    fn run(&mut self, options: &RunOptions) -> Result<BenchReport> {
        let internal_iterations = resolve_internal_iterations(options.config);
        let iterations = options.effective_iterations();
        tracing::debug!(
            internal_iterations,
            iterations,
            "starting byte-compare benchmark"
        );

        // Decoded once up front, the counterpart to decoding on the fly.
        let pre_decoded = std::str::from_utf8(CALL).unwrap_or_default();

        let mut loop_samples = Vec::with_capacity(iterations);
        let mut zip_samples = Vec::with_capacity(iterations);
        let mut on_the_fly_samples = Vec::with_capacity(iterations);
        let mut pre_decoded_samples = Vec::with_capacity(iterations);

        for _ in 0..iterations {
            let (ms, _) = time_pass(|| {
                for _ in 0..internal_iterations {
                    black_box(eq_byte_loop(black_box(CALL), black_box(PUT)));
                }
            });
            loop_samples.push(ms);

            let (ms, _) = time_pass(|| {
                for _ in 0..internal_iterations {
                    black_box(eq_byte_zip(black_box(CALL), black_box(PUT)));
                }
            });
            zip_samples.push(ms);

            let (ms, _) = time_pass(|| {
                for _ in 0..internal_iterations {
                    black_box(eq_decode_on_the_fly(black_box(CALL), black_box(CALL_TEXT)));
                }
            });
            on_the_fly_samples.push(ms);

            let (ms, _) = time_pass(|| {
                for _ in 0..internal_iterations {
                    black_box(eq_pre_decoded(black_box(pre_decoded), black_box(CALL_TEXT)));
                }
            });
            pre_decoded_samples.push(ms);
        }

        Ok(BenchReport {
            implementations: vec![
                ImplementationRun {
                    name: "byte_loop",
                    label: "Byte compare - indexed loop",
                    stats: stats::compute(&loop_samples),
                },
                ImplementationRun {
                    name: "byte_zip",
                    label: "Byte compare - iterator zip",
                    stats: stats::compute(&zip_samples),
                },
                ImplementationRun {
                    name: "decode_compare",
                    label: "String compare - decode on the fly",
                    stats: stats::compute(&on_the_fly_samples),
                },
                ImplementationRun {
                    name: "pre_decoded",
                    label: "String compare - pre-decoded",
                    stats: stats::compute(&pre_decoded_samples),
                },
            ],
            items_processed: internal_iterations as u64,
        })
    }
}
