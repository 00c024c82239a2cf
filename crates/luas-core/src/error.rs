// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for luas operations
//!
//! Decoder-level failures ([`DecodeError`]) indicate a structural mismatch
//! between generator and decoder and are never retried; the benchmark runner
//! wraps them (and any other definition failure) in
//! [`LuasError::ExecutionFailed`]. Configuration problems are not errors:
//! each definition substitutes its documented default instead.

use thiserror::Error;

/// Result alias used across the luas crates.
pub type Result<T, E = LuasError> = std::result::Result<T, E>;

/// Errors raised while decoding the fixed-schema wire format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The batch would overflow the pre-allocated arena. The arena keeps
    /// its prior contents; nothing is copied before this check passes.
    #[error("batch needs {needed} bytes but the arena holds {capacity}")]
    CapacityExceeded {
        /// Total byte length of the rejected batch.
        needed: usize,
        /// Arena capacity in bytes.
        capacity: usize,
    },
    /// Concatenated length is not a whole number of fixed-size records,
    /// which means the generator and decoder disagree on the schema.
    #[error("buffer length {len} is not a multiple of record size {record_size}")]
    MisalignedBuffer {
        /// Total byte length of the offending buffer.
        len: usize,
        /// Fixed record size the decoder expects.
        record_size: usize,
    },
    /// A tagged message ended before the field announced by its tag.
    #[error("message truncated at byte {offset}")]
    Truncated {
        /// Byte offset at which the reader ran out of input.
        offset: usize,
    },
    /// The tagged decoder met a wire type it cannot skip.
    #[error("unsupported wire type {wire_type} at byte {offset}")]
    UnknownWireType {
        /// The wire type extracted from the tag.
        wire_type: u8,
        /// Byte offset of the tag.
        offset: usize,
    },
}

/// Top-level error type for the luas crates.
#[derive(Debug, Error)]
pub enum LuasError {
    /// A decode failure, propagated unchanged from the codec layer.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A benchmark definition failed mid-run. Carries the benchmark id and
    /// the root cause; the runner clears current results but leaves the
    /// historical series untouched.
    #[error("benchmark `{id}` failed")]
    ExecutionFailed {
        /// Identifier of the failing benchmark.
        id: String,
        /// Underlying cause.
        #[source]
        source: Box<LuasError>,
    },
    /// Registry lookup miss.
    #[error("unknown benchmark `{id}`")]
    UnknownBenchmark {
        /// The identifier that was requested.
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let err = DecodeError::CapacityExceeded {
            needed: 28,
            capacity: 14,
        };
        assert_eq!(
            err.to_string(),
            "batch needs 28 bytes but the arena holds 14"
        );
        let err = DecodeError::MisalignedBuffer {
            len: 15,
            record_size: 14,
        };
        assert_eq!(
            err.to_string(),
            "buffer length 15 is not a multiple of record size 14"
        );
    }

    #[test]
    fn execution_failed_carries_cause() {
        let cause = LuasError::from(DecodeError::Truncated { offset: 5 });
        let err = LuasError::ExecutionFailed {
            id: "decode".to_string(),
            source: Box::new(cause),
        };
        assert_eq!(err.to_string(), "benchmark `decode` failed");
        let source = std::error::Error::source(&err).map(|cause| cause.to_string());
        assert_eq!(source.as_deref(), Some("message truncated at byte 5"));
    }
}
