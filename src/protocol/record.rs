//! Streamed data record decoding
//!
//! Record format (ASCII, fixed width, 54 bytes total):
//! - Header (3 bytes): station number and record status
//! - Seven 7-byte numeric fields: px, py, pz (Sxxx.xx, centimeters)
//!   followed by qx, qy, qz, qw (Sx.xxxx)
//! - Terminator (2 bytes): CR LF
//!
//! Fields are sliced at fixed byte offsets rather than scanned for
//! delimiters, so any byte-count drift fails the length check before a
//! single field is touched.

use crate::error::{Error, Result};

/// Total record length in bytes, terminator included
pub const RECORD_LEN: usize = 54;
/// Header bytes preceding the first numeric field
pub const HEADER_LEN: usize = 3;
/// Width of each numeric field in bytes
pub const FIELD_WIDTH: usize = 7;
/// Number of numeric fields in a record
pub const FIELD_COUNT: usize = 7;

/// Decode one streamed record into its seven numeric fields.
///
/// Returns the fields in record order: px, py, pz, qx, qy, qz, qw.
/// The input must be exactly [`RECORD_LEN`] bytes; an empty buffer (read
/// timeout) or any other length is rejected without a partial parse. A
/// single unparsable field rejects the whole record, so the caller either
/// applies all seven values or none.
pub fn decode_record(data: &[u8]) -> Result<[f64; FIELD_COUNT]> {
    if data.len() != RECORD_LEN {
        return Err(Error::InvalidRecord(format!(
            "expected {} bytes, got {}",
            RECORD_LEN,
            data.len()
        )));
    }

    let mut fields = [0.0; FIELD_COUNT];
    for (index, field) in fields.iter_mut().enumerate() {
        let start = HEADER_LEN + index * FIELD_WIDTH;
        let raw = &data[start..start + FIELD_WIDTH];
        let text = std::str::from_utf8(raw).map_err(|_| Error::MalformedField {
            index,
            text: format!("{:02X?}", raw),
        })?;
        *field = text.trim().parse().map_err(|_| Error::MalformedField {
            index,
            text: text.to_string(),
        })?;
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a well-formed 54-byte record: position fields at Sxxx.xx
    /// precision, quaternion fields at Sx.xxxx
    fn record(fields: [f64; FIELD_COUNT]) -> Vec<u8> {
        let mut data = b"01 ".to_vec();
        for (i, value) in fields.iter().enumerate() {
            let text = if i < 3 {
                format!("{:7.2}", value)
            } else {
                format!("{:7.4}", value)
            };
            data.extend_from_slice(text.as_bytes());
        }
        data.extend_from_slice(b"\r\n");
        assert_eq!(data.len(), RECORD_LEN);
        data
    }

    #[test]
    fn test_decode_well_formed_record() {
        let data = record([12.34, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        let fields = decode_record(&data).unwrap();
        assert_eq!(fields, [12.34, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_decode_negative_and_fractional_values() {
        let data = record([-123.45, 67.89, -0.01, -0.7071, 0.7071, -0.5, 0.5]);
        let fields = decode_record(&data).unwrap();
        assert_eq!(fields, [-123.45, 67.89, -0.01, -0.7071, 0.7071, -0.5, 0.5]);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let data = record([1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0]);

        assert!(decode_record(&[]).is_err()); // timeout: no data
        assert!(decode_record(&data[..40]).is_err()); // truncated
        assert!(decode_record(&data[..53]).is_err()); // off by one
        let mut long = data.clone();
        long.push(b' ');
        assert!(decode_record(&long).is_err());
    }

    #[test]
    fn test_decode_rejects_malformed_field() {
        let mut data = record([1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0]);
        // Corrupt the qx field (fourth field, offset 24..31)
        data[24..31].copy_from_slice(b"  abc  ");

        match decode_record(&data) {
            Err(Error::MalformedField { index, .. }) => assert_eq!(index, 3),
            other => panic!("expected MalformedField, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_non_utf8_field() {
        let mut data = record([1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0]);
        data[5] = 0xFF; // inside the px field
        assert!(decode_record(&data).is_err());
    }
}
