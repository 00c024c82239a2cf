// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and foundational types for luas
//!
//! This crate provides the foundational types used across the luas ecosystem:
//!
//! - [`error`] - Error types and Result alias
//! - [`record`] - The fixed benchmark record schema
//! - [`stats`] - Timing sample reduction into summary statistics

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Error types for luas operations
pub mod error;
/// The fixed record schema under benchmark
pub mod record;
/// Summary statistics over timing samples
pub mod stats;
// Re-exports for convenience
pub use error::{DecodeError, LuasError, Result};
pub use record::Record;
pub use stats::{Summary, compute};
