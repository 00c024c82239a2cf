// SPDX-License-Identifier: MIT OR Apache-2.0
//! Arena-backed structure-of-arrays decoder
//!
//! [`ColumnStore`] owns a pre-allocated byte arena and two pre-allocated
//! output columns, all sized once from a byte budget and reused for every
//! decode call. A batch of fixed-size messages is copied contiguously into
//! the arena, then decoded with raw offset arithmetic straight into the
//! columns: no per-message heap allocation anywhere on the path.
//!
//! The store is a single shared mutable resource. Exclusive access is the
//! `&mut self` borrow on [`ColumnStore::decode_from_list`]; a multi-threaded
//! caller needs a lock or an arena per thread.

use crate::wire::{ID_OFFSET, RECORD_SIZE, VALUE_OFFSET};
use luas_core::DecodeError;

/// Borrowed view over one decoded batch.
///
/// The slices point into the store's pre-allocated columns and are only
/// `count` elements long; they are overwritten in place by the next decode
/// call, which the borrow checker enforces by tying them to the `&mut`
/// borrow of the store.
#[derive(Debug)]
pub struct DecodedBatch<'a> {
    /// Number of records decoded from the batch.
    pub count: usize,
    /// Decoded ids, in input order.
    pub ids: &'a [u32],
    /// Decoded values, in input order.
    pub values: &'a [f64],
}

/// Pre-allocated arena plus columnar output buffers.
#[derive(Debug)]
pub struct ColumnStore {
    arena: Vec<u8>,
    ids: Vec<u32>,
    values: Vec<f64>,
    max_messages: usize,
}

impl ColumnStore {
    /// Build a store with an `arena_bytes` byte budget (e.g. 20 MiB).
    ///
    /// Every buffer the decode path touches is allocated here, once.
    /// Multiple independent stores are fine; there is no ambient shared
    /// state.
    #[must_use]
    pub fn new(arena_bytes: usize) -> Self {
        let max_messages = arena_bytes / RECORD_SIZE;
        Self {
            arena: vec![0; arena_bytes],
            ids: vec![0; max_messages],
            values: vec![0.0; max_messages],
            max_messages,
        }
    }

    /// Maximum number of fixed-size messages one batch may hold.
    #[must_use]
    pub const fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Decode a batch of independently-allocated fixed-size messages.
    ///
    /// Copies each message into the next free arena offset in a single
    /// linear pass, then reads the id and value fields of every record at
    /// their schema-fixed offsets, skipping the tag bytes. Tags are not
    /// validated; the schema is fixed and assumed well-formed.
    ///
    /// # Errors
    ///
    /// [`DecodeError::CapacityExceeded`] when the batch would overflow the
    /// arena and [`DecodeError::MisalignedBuffer`] when the total length is
    /// not a whole number of records. Both are checked before any byte is
    /// copied, so the arena and columns keep their prior contents.
    pub fn decode_from_list<M: AsRef<[u8]>>(
        &mut self,
        messages: &[M],
    ) -> Result<DecodedBatch<'_>, DecodeError> {
        let total: usize = messages.iter().map(|m| m.as_ref().len()).sum();
        if total > self.arena.len() {
            return Err(DecodeError::CapacityExceeded {
                needed: total,
                capacity: self.arena.len(),
            });
        }
        if total % RECORD_SIZE != 0 {
            return Err(DecodeError::MisalignedBuffer {
                len: total,
                record_size: RECORD_SIZE,
            });
        }
        let mut offset = 0;
        for message in messages {
            let bytes = message.as_ref();
            self.arena[offset..offset + bytes.len()].copy_from_slice(bytes);
            offset += bytes.len();
        }
        let count = self.decode_arena(total);
        Ok(DecodedBatch {
            count,
            ids: &self.ids[..count],
            values: &self.values[..count],
        })
    }

    /// Decode the first `total` contiguous arena bytes into the columns.
    fn decode_arena(&mut self, total: usize) -> usize {
        let count = total / RECORD_SIZE;
        for i in 0..count {
            let base = i * RECORD_SIZE;
            self.ids[i] = u32::from_le_bytes([
                self.arena[base + ID_OFFSET],
                self.arena[base + ID_OFFSET + 1],
                self.arena[base + ID_OFFSET + 2],
                self.arena[base + ID_OFFSET + 3],
            ]);
            self.values[i] = f64::from_le_bytes([
                self.arena[base + VALUE_OFFSET],
                self.arena[base + VALUE_OFFSET + 1],
                self.arena[base + VALUE_OFFSET + 2],
                self.arena[base + VALUE_OFFSET + 3],
                self.arena[base + VALUE_OFFSET + 4],
                self.arena[base + VALUE_OFFSET + 5],
                self.arena[base + VALUE_OFFSET + 6],
                self.arena[base + VALUE_OFFSET + 7],
            ]);
        }
        count
    }
}
