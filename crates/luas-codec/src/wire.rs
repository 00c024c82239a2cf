// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tag-driven reference wire codec
//!
//! The general-purpose baseline the columnar decoder is measured against.
//! Messages are self-describing: each field is announced by a varint tag
//! carrying a field number and wire type, and unknown fields are skipped
//! by wire type. For the fixed schema under test a message is always
//! 14 bytes (tag + fixed32 id, tag + 64-bit value), but this decoder never
//! assumes that; the 14-byte framing is a property of the schema, not of
//! the format.

use luas_core::{DecodeError, Record};

/// Encoded size of one record under the fixed schema: two single-byte
/// tags, a 4-byte little-endian id, an 8-byte little-endian value.
pub const RECORD_SIZE: usize = 14;
/// Byte offset of the id field inside one encoded record.
pub const ID_OFFSET: usize = 1;
/// Byte offset of the value field inside one encoded record.
pub const VALUE_OFFSET: usize = 6;

// Field 1, wire type 5 (fixed32): (1 << 3) | 5.
const ID_TAG: u8 = 0x0d;
// Field 2, wire type 1 (fixed64): (2 << 3) | 1.
const VALUE_TAG: u8 = 0x11;

const ID_FIELD: u64 = 1;
const VALUE_FIELD: u64 = 2;

/// Encode one record into its fixed 14-byte wire form.
#[must_use]
pub fn encode_record(record: &Record) -> [u8; RECORD_SIZE] {
    let mut out = [0u8; RECORD_SIZE];
    out[0] = ID_TAG;
    out[ID_OFFSET..ID_OFFSET + 4].copy_from_slice(&record.id.to_le_bytes());
    out[VALUE_OFFSET - 1] = VALUE_TAG;
    out[VALUE_OFFSET..VALUE_OFFSET + 8].copy_from_slice(&record.value.to_le_bytes());
    out
}

/// Encode a batch of records into independently-allocated messages, the
/// shape a network or IPC boundary would hand the decoders.
#[must_use]
pub fn encode_batch(records: &[Record]) -> Vec<Vec<u8>> {
    records
        .iter()
        .map(|record| encode_record(record).to_vec())
        .collect()
}

/// Decode one tagged message into a [`Record`].
///
/// Walks the message tag by tag, dispatching on field number and skipping
/// anything it does not recognize.
///
/// # Errors
///
/// [`DecodeError::Truncated`] if the message ends inside a field, and
/// [`DecodeError::UnknownWireType`] for a tag that cannot be skipped.
#[allow(clippy::cast_possible_truncation)]
pub fn decode_record(buf: &[u8]) -> Result<Record, DecodeError> {
    let mut record = Record::default();
    let mut pos = 0;
    while pos < buf.len() {
        let tag_offset = pos;
        let tag = read_varint(buf, &mut pos)?;
        let field = tag >> 3;
        // A wire type is the low three bits of the tag.
        let wire_type = (tag & 0x7) as u8;
        match field {
            ID_FIELD => {
                record.id = u32::from_le_bytes(read_array(buf, &mut pos)?);
            }
            VALUE_FIELD => {
                record.value = f64::from_le_bytes(read_array(buf, &mut pos)?);
            }
            _ => skip_field(buf, &mut pos, wire_type, tag_offset)?,
        }
    }
    Ok(record)
}

/// Decode a batch of independently-allocated messages into owned records.
///
/// One `Vec` allocation for the output plus a full tag walk per message;
/// that cost is exactly what the benchmark compares against the columnar
/// path.
///
/// # Errors
///
/// Propagates the first per-message [`DecodeError`].
pub fn decode_batch<M: AsRef<[u8]>>(messages: &[M]) -> Result<Vec<Record>, DecodeError> {
    messages
        .iter()
        .map(|message| decode_record(message.as_ref()))
        .collect()
}

fn read_varint(buf: &[u8], pos: &mut usize) -> Result<u64, DecodeError> {
    let mut out = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = *buf
            .get(*pos)
            .ok_or(DecodeError::Truncated { offset: *pos })?;
        *pos += 1;
        out |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok(out);
        }
        shift += 7;
        if shift >= 64 {
            // Malformed varint; report it at the byte that overflowed.
            return Err(DecodeError::Truncated { offset: *pos });
        }
    }
}

fn read_array<const N: usize>(buf: &[u8], pos: &mut usize) -> Result<[u8; N], DecodeError> {
    let end = *pos + N;
    let bytes = buf
        .get(*pos..end)
        .ok_or(DecodeError::Truncated { offset: buf.len() })?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    *pos = end;
    Ok(out)
}

fn skip_field(
    buf: &[u8],
    pos: &mut usize,
    wire_type: u8,
    tag_offset: usize,
) -> Result<(), DecodeError> {
    match wire_type {
        0 => {
            let _ = read_varint(buf, pos)?;
        }
        1 => {
            let _: [u8; 8] = read_array(buf, pos)?;
        }
        2 => {
            let len = read_varint(buf, pos)?;
            let end = pos
                .checked_add(usize::try_from(len).unwrap_or(usize::MAX))
                .filter(|&end| end <= buf.len())
                .ok_or(DecodeError::Truncated { offset: buf.len() })?;
            *pos = end;
        }
        5 => {
            let _: [u8; 4] = read_array(buf, pos)?;
        }
        other => {
            return Err(DecodeError::UnknownWireType {
                wire_type: other,
                offset: tag_offset,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_matches_fixed_layout() {
        let bytes = encode_record(&Record::new(7, 2.5));
        assert_eq!(bytes.len(), RECORD_SIZE);
        assert_eq!(bytes[0], 0x0d);
        assert_eq!(&bytes[1..5], &7u32.to_le_bytes());
        assert_eq!(bytes[5], 0x11);
        assert_eq!(&bytes[6..14], &2.5f64.to_le_bytes());
    }

    #[test]
    fn decode_round_trip() {
        let record = Record::new(42, -3.75);
        let decoded = decode_record(&encode_record(&record)).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn unknown_fields_are_skipped() {
        // field 3, wire type 0 (varint), then the regular value field.
        let mut buf = vec![0x18, 0x96, 0x01];
        buf.push(0x11);
        buf.extend_from_slice(&1.5f64.to_le_bytes());
        let decoded = decode_record(&buf).unwrap();
        assert_eq!(decoded, Record::new(0, 1.5));
    }

    #[test]
    fn length_delimited_fields_are_skipped() {
        // field 3, wire type 2, length 3, payload, then the id field.
        let mut buf = vec![0x1a, 0x03, b'a', b'b', b'c'];
        buf.push(0x0d);
        buf.extend_from_slice(&9u32.to_le_bytes());
        let decoded = decode_record(&buf).unwrap();
        assert_eq!(decoded, Record::new(9, 0.0));
    }

    #[test]
    fn truncated_message_errors() {
        let bytes = encode_record(&Record::new(1, 1.0));
        let err = decode_record(&bytes[..RECORD_SIZE - 1]).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn unsupported_wire_type_errors() {
        // field 4, wire type 3 (deprecated group start): (4 << 3) | 3.
        let err = decode_record(&[0x23]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownWireType {
                wire_type: 3,
                offset: 0
            }
        );
    }

    #[test]
    fn batch_decode_preserves_order() {
        let records = vec![Record::new(0, 1.0), Record::new(1, 2.5)];
        let decoded = decode_batch(&encode_batch(&records)).unwrap();
        assert_eq!(decoded, records);
    }

    proptest! {
        #[test]
        fn round_trip_any_record(id in any::<u32>(), value in -1.0e12f64..1.0e12) {
            let record = Record::new(id, value);
            let decoded = decode_record(&encode_record(&record)).unwrap();
            prop_assert_eq!(decoded, record);
        }
    }
}
