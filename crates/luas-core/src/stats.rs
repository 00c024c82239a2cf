// SPDX-License-Identifier: MIT OR Apache-2.0
//! Summary statistics over timing samples
//!
//! [`compute`] is a pure reduction from a sample set to a [`Summary`].
//! Samples are wall-clock elapsed times in fractional milliseconds, but
//! nothing here assumes a unit.

use serde::{Deserialize, Serialize};

/// Derived, immutable summary over one sample set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Even/odd split-average median.
    pub median: f64,
    /// Nearest-rank 99th percentile, see [`compute`].
    pub p99: f64,
    /// Sum of all samples.
    pub sum: f64,
}

/// Reduce a sample set into a [`Summary`].
///
/// The input is never mutated; a sorted copy is taken internally, so the
/// result is invariant to input order. An empty input yields an all-zero
/// summary rather than an error, letting callers treat "no data yet"
/// uniformly.
///
/// The p99 index is `floor(n * 0.99)` clamped to `[0, n - 1]`. For small
/// `n` this is biased toward the high tail (n = 10 selects the maximum).
/// That is the documented nearest-rank estimator downstream comparisons
/// depend on, not an interpolated percentile.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn compute(samples: &[f64]) -> Summary {
    if samples.is_empty() {
        return Summary::default();
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let sum: f64 = sorted.iter().sum();
    let mean = sum / n as f64;
    let median = if n % 2 == 0 {
        f64::midpoint(sorted[n / 2 - 1], sorted[n / 2])
    } else {
        sorted[n / 2]
    };
    let p99_index = ((n as f64 * 0.99) as usize).min(n - 1);
    Summary {
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median,
        p99: sorted[p99_index],
        sum,
    }
}
