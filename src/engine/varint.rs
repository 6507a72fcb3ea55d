//! LEB128-style unsigned varints and the fixed-point time values built on them.
//!
//! Times (and bpm values, which share the encoding) are scaled by 10000 and rounded,
//! so a value survives the trip exactly up to the 4 decimal digits that rune equality cares about.

use crate::engine::{ByteCursor, read_u8};
use crate::error::RuneStringError;
use crate::util::TIME_SCALE;

pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

pub fn read_varint(cursor: &mut ByteCursor<'_>, section: &'static str) -> Result<u64, RuneStringError> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = read_u8(cursor, section)?;
        let payload = (byte & 0x7F) as u64;

        // the tenth byte may only contribute the top bit of a u64
        if shift > 63 || (shift == 63 && payload > 1) {
            return Err(RuneStringError::VarintOverflow { section });
        }

        value |= payload << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

/// Reads a varint item count.
pub fn read_count(cursor: &mut ByteCursor<'_>, section: &'static str) -> Result<usize, RuneStringError> {
    let count = read_varint(cursor, section)?;
    usize::try_from(count).map_err(|_| RuneStringError::Truncated { section })
}

/// Writes `value` as a varint of `round(value * 10000)`.
/// `field` names the value in the error raised for negative or non-finite input.
pub fn write_time(out: &mut Vec<u8>, value: f64, field: &'static str) -> Result<(), RuneStringError> {
    let scaled = (value * TIME_SCALE).round();

    if !scaled.is_finite() || scaled < 0.0 || scaled >= u64::MAX as f64 {
        return Err(RuneStringError::InvalidTime { field, value });
    }

    write_varint(out, scaled as u64);
    Ok(())
}

pub fn read_time(cursor: &mut ByteCursor<'_>, section: &'static str) -> Result<f64, RuneStringError> {
    Ok(read_varint(cursor, section)? as f64 / TIME_SCALE)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn time_bytes(value: f64) -> Vec<u8> {
        let mut out = Vec::new();
        write_time(&mut out, value, "rune time").unwrap();
        out
    }

    #[test]
    fn known_time_encodings() {
        assert_eq!(time_bytes(0.0), vec![0x00]);
        assert_eq!(time_bytes(0.25), vec![0xC4, 0x13]);
        assert_eq!(time_bytes(1.0 / 3.0), vec![0x85, 0x1A]);
        assert_eq!(time_bytes(1.0), vec![0x90, 0x4E]);
        assert_eq!(time_bytes(2.0), vec![0xA0, 0x9C, 0x01]);
        assert_eq!(time_bytes(120.0), vec![0x80, 0x9F, 0x49]);
        assert_eq!(time_bytes(74.28571428571429), vec![0xC9, 0xAB, 0x2D]);
    }

    #[test]
    fn read_back_time() {
        let data = [0xC9, 0xAB, 0x2D, 0x80, 0xB5, 0x18];
        let mut cursor = Cursor::new(&data[..]);

        assert_eq!(read_time(&mut cursor, "bpm changes").unwrap(), 74.2857);
        assert_eq!(read_time(&mut cursor, "bpm changes").unwrap(), 40.0);
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn varint_extremes() {
        let mut out = Vec::new();
        write_varint(&mut out, u64::MAX);
        assert_eq!(out.len(), 10);
        assert_eq!(out[9], 0x01);

        let mut cursor = Cursor::new(&out[..]);
        assert_eq!(read_varint(&mut cursor, "envelope").unwrap(), u64::MAX);

        let mut out = Vec::new();
        write_varint(&mut out, 127);
        write_varint(&mut out, 128);
        assert_eq!(out, vec![0x7F, 0x80, 0x01]);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        let mut out = Vec::new();

        for value in [-1.0, -0.001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                write_time(&mut out, value, "bpm"),
                Err(RuneStringError::InvalidTime { field: "bpm", .. })
            ));
        }
        assert!(out.is_empty());

        // rounds to zero, so it is not negative on the wire
        write_time(&mut out, -0.00001, "bpm").unwrap();
        assert_eq!(out, vec![0x00]);
    }

    #[test]
    fn truncated_and_overflowing_varints() {
        let data = [0x80, 0x80];
        let mut cursor = Cursor::new(&data[..]);
        assert!(matches!(
            read_varint(&mut cursor, "single runes"),
            Err(RuneStringError::Truncated { section: "single runes" })
        ));

        let data = [0xFF; 11];
        let mut cursor = Cursor::new(&data[..]);
        assert!(matches!(
            read_varint(&mut cursor, "multi runes"),
            Err(RuneStringError::VarintOverflow { section: "multi runes" })
        ));
    }
}
