// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static benchmark registry
//!
//! Ordered table of the built-in definitions. This is configuration, not
//! orchestration: registration happens here once, lookup is by id, and the
//! runner never needs changing when a benchmark is added. Construction
//! hands out owned definitions so each carries its own state (the decode
//! definition owns its columnar store) without ambient globals.

use crate::benchmarks::{ByteCompareBenchmark, DecodeBenchmark, LoopsBenchmark};
use crate::definition::Benchmark;

/// All registered definitions, in registration order.
#[must_use]
pub fn definitions() -> Vec<Box<dyn Benchmark>> {
    vec![
        Box::new(DecodeBenchmark::new()),
        Box::new(LoopsBenchmark::new()),
        Box::new(ByteCompareBenchmark::new()),
    ]
}

/// Look up a definition by id.
#[must_use]
pub fn get(id: &str) -> Option<Box<dyn Benchmark>> {
    definitions().into_iter().find(|def| def.id() == id)
}
