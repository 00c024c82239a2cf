// SPDX-License-Identifier: MIT OR Apache-2.0
//! Benchmark harness for luas
//!
//! Drives competing decode implementations over identical synthetic input
//! and reduces the raw timings into summaries:
//!
//! - [`definition`] - the `Benchmark` trait, run options, typed config
//! - [`benchmarks`] - the built-in benchmark definitions
//! - [`registry`] - ordered static table of definitions
//! - [`sampler`] - wall-clock timing of one pass
//! - [`history`] - bounded, FIFO-evicting p99 time series
//! - [`runner`] - state machine driving runs and retention
//! - [`clock`] - timestamp-label seam for the history

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Built-in benchmark definitions
pub mod benchmarks;
/// Timestamp labels for historical points
pub mod clock;
/// Benchmark trait, run options, and typed configuration
pub mod definition;
/// Bounded historical series of p99 values
pub mod history;
/// Static benchmark registry
pub mod registry;
/// State machine driving runs and retention
pub mod runner;
/// Wall-clock timing of one benchmark pass
pub mod sampler;

/// Re-export main types for convenience
pub use clock::{Clock, SystemClock};
pub use definition::{BenchConfig, BenchReport, Benchmark, ImplementationRun, RunOptions};
pub use history::{History, HistoryPoint};
pub use runner::{RunState, Runner};
pub use sampler::time_pass;
