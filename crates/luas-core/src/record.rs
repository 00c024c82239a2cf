// SPDX-License-Identifier: MIT OR Apache-2.0
//! The fixed record schema under benchmark
//!
//! One logical record per wire message. The schema is fixed and known at
//! compile time; this is deliberately not a general schema system.

use serde::{Deserialize, Serialize};

/// One logical unit of data, before encoding and after decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier.
    pub id: u32,
    /// Record payload value.
    pub value: f64,
}

impl Record {
    /// Create a record.
    #[must_use]
    pub const fn new(id: u32, value: f64) -> Self {
        Self { id, value }
    }
}
