// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in benchmark definitions
//!
//! Each submodule is one experiment implementing
//! [`crate::definition::Benchmark`]:
//!
//! - [`decode`] - tagged reference decode vs columnar structure-of-arrays
//! - [`loops`] - array-summing loop strategies
//! - [`bytes`] - byte-slice matching vs string matching

/// Byte-slice vs string matching
pub mod bytes;
/// Tagged vs columnar decode
pub mod decode;
/// Loop strategy comparison
pub mod loops;

pub use bytes::ByteCompareBenchmark;
pub use decode::DecodeBenchmark;
pub use loops::LoopsBenchmark;
