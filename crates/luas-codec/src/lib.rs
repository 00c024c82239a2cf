// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wire codec and columnar decoder for luas
//!
//! Two decode strategies over the same fixed-schema binary messages:
//!
//! - [`wire`] - the general-purpose tag-driven reference codec
//! - [`column`] - the schema-specialized structure-of-arrays decoder
//!
//! Both read the identical wire bytes; the benchmark harness times one
//! against the other.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Arena-backed structure-of-arrays decoder
pub mod column;
/// Tag-driven reference wire codec
pub mod wire;
// Re-exports for convenience
pub use column::{ColumnStore, DecodedBatch};
pub use wire::{ID_OFFSET, RECORD_SIZE, VALUE_OFFSET, decode_batch, decode_record, encode_record};
