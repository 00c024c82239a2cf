// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wall-clock timing of one benchmark pass
//!
//! Timing is synchronous and blocking for its duration; a pass is
//! intentionally not preemptible, since preemption would corrupt the
//! elapsed-time measurement.

use std::hint::black_box;
use std::time::Instant;

/// Time one full pass of a closure, returning elapsed fractional
/// milliseconds alongside the closure's output.
///
/// The output is routed through [`black_box`] so the measured work cannot
/// be optimized away before the clock is read.
pub fn time_pass<T>(f: impl FnOnce() -> T) -> (f64, T) {
    let start = Instant::now();
    let out = black_box(f());
    let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;
    (elapsed_ms, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_closure_output() {
        let (elapsed_ms, out) = time_pass(|| 21 * 2);
        assert_eq!(out, 42);
        assert!(elapsed_ms >= 0.0);
    }

    #[test]
    fn five_iterations_yield_five_samples_and_a_consistent_sum() {
        let mut samples = Vec::new();
        for _ in 0..5 {
            let (elapsed_ms, ()) = time_pass(|| {
                std::thread::sleep(std::time::Duration::from_micros(200));
            });
            samples.push(elapsed_ms);
        }
        assert_eq!(samples.len(), 5);
        let summary = luas_core::stats::compute(&samples);
        let direct: f64 = samples.iter().sum();
        assert!((summary.sum - direct).abs() < 1e-9);
    }
}
