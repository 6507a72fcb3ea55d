use crate::engine::grouping::RuneGroup;
use crate::engine::varint::{read_count, read_time, write_time, write_varint};
use crate::engine::{ByteCursor, Section, read_bytes};
use crate::error::RuneStringError;
use log::trace;

/// Every unordered pair of distinct columns in `0..=3`, indexed by combo value.
const COMBOS: [(u8, u8); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Pairs of runes sharing a time.
///
/// Layout: varint count, `count` varint times, then `3 * ceil(count / 8)` bytes.
/// Each pair's columns collapse into a 3-bit combo value, and eight combo values fill three bytes.
pub struct DoubleRunes;

impl Section for DoubleRunes {
    const NAME: &'static str = "double runes";

    type Item = RuneGroup;

    fn write(groups: &[RuneGroup], out: &mut Vec<u8>) -> Result<(), RuneStringError> {
        let combos = groups
            .iter()
            .map(|group| match group.columns[..] {
                [first, second] => combo_value(first, second).ok_or(RuneStringError::InvalidDoubleRune {
                    time: group.time,
                    first,
                    second,
                }),
                _ => Err(RuneStringError::GroupSizeMismatch {
                    time: group.time,
                    expected: 2,
                    found: group.len(),
                }),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        write_varint(out, groups.len() as u64);
        for group in groups {
            write_time(out, group.time, "rune time")?;
        }

        for chunk in combos.chunks(8) {
            let mut values = [0u8; 8];
            values[..chunk.len()].copy_from_slice(chunk);
            out.extend(pack_combos(values));
        }

        Ok(())
    }

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Vec<RuneGroup>, RuneStringError> {
        let count = read_count(cursor, Self::NAME)?;

        let times = (0..count)
            .map(|_| read_time(cursor, Self::NAME))
            .collect::<Result<Vec<f64>, _>>()?;

        let packed = read_bytes(cursor, 3 * count.div_ceil(8), Self::NAME)?;
        let combos = packed
            .chunks_exact(3)
            .flat_map(|triplet| unpack_combos([triplet[0], triplet[1], triplet[2]]));

        times
            .into_iter()
            .zip(combos)
            .map(|(time, combo)| {
                let (first, second) = combo_columns(combo).ok_or(RuneStringError::InvalidComboCode(combo))?;
                trace!("Double rune at {} -> ({}, {})..!", time, first, second);
                Ok(RuneGroup::new(time, vec![first, second]))
            })
            .collect()
    }
}

/// Maps an unordered pair of distinct columns in `0..=3` to its combo value `0..=5`.
pub fn combo_value(a: u8, b: u8) -> Option<u8> {
    let pair = if a <= b { (a, b) } else { (b, a) };
    COMBOS.iter().position(|&combo| combo == pair).map(|i| i as u8)
}

/// Expands a combo value back into its two columns, lowest first.
pub fn combo_columns(value: u8) -> Option<(u8, u8)> {
    COMBOS.get(value as usize).copied()
}

/// Packs eight 3-bit combo values big-endian into three bytes.
///
/// ```text
/// 000 111 22|2 333 444 5|55 666 777
/// ```
pub fn pack_combos(c: [u8; 8]) -> [u8; 3] {
    [
        c[0] << 5 | c[1] << 2 | c[2] >> 1,
        (c[2] & 1) << 7 | c[3] << 4 | c[4] << 1 | c[5] >> 2,
        (c[5] & 3) << 6 | c[6] << 3 | c[7],
    ]
}

pub fn unpack_combos(b: [u8; 3]) -> [u8; 8] {
    [
        b[0] >> 5,
        (b[0] >> 2) & 7,
        (b[0] & 3) << 1 | b[1] >> 7,
        (b[1] >> 4) & 7,
        (b[1] >> 1) & 7,
        (b[1] & 1) << 2 | b[2] >> 6,
        (b[2] >> 3) & 7,
        b[2] & 7,
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    #[test]
    fn combo_table() {
        assert_eq!(combo_value(0, 1), Some(0));
        assert_eq!(combo_value(2, 0), Some(1));
        assert_eq!(combo_value(3, 0), Some(2));
        assert_eq!(combo_value(1, 2), Some(3));
        assert_eq!(combo_value(3, 1), Some(4));
        assert_eq!(combo_value(2, 3), Some(5));

        assert_eq!(combo_value(1, 1), None);
        assert_eq!(combo_value(0, 4), None);
        assert_eq!(combo_columns(6), None);
        assert_eq!(combo_columns(7), None);
    }

    #[test]
    fn four_pairs_with_padding() {
        let groups = [
            RuneGroup::new(0.25, vec![0, 3]),
            RuneGroup::new(0.5, vec![1, 2]),
            RuneGroup::new(0.75, vec![0, 2]),
            RuneGroup::new(1.0, vec![1, 3]),
        ];

        let bytes = DoubleRunes::encode(&groups).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x04, 0xC4, 0x13, 0x88, 0x27, 0xCC, 0x3A, 0x90, 0x4E, 0x4C, 0xC0, 0x00
            ]
        );

        let mut cursor = Cursor::new(&bytes[..]);
        assert_eq!(DoubleRunes::read(&mut cursor).unwrap(), groups.to_vec());
    }

    #[test]
    fn nine_pairs_take_two_triplets() {
        let groups: Vec<RuneGroup> = (0..9)
            .map(|i| {
                let (a, b) = COMBOS[i % 6];
                RuneGroup::new(i as f64, vec![a, b])
            })
            .collect();

        let bytes = DoubleRunes::encode(&groups).unwrap();
        // count, then time 0 in one byte, 1.0 in two, 2.0 through 8.0 in three each
        let times_len: usize = 1 + 1 + 2 + 7 * 3;
        assert_eq!(bytes.len(), times_len + 6);

        let mut cursor = Cursor::new(&bytes[..]);
        assert_eq!(DoubleRunes::read(&mut cursor).unwrap(), groups);
    }

    #[test]
    fn rejects_invalid_pairs() {
        let same_column = [RuneGroup::new(0.5, vec![2, 2])];
        assert!(matches!(
            DoubleRunes::encode(&same_column),
            Err(RuneStringError::InvalidDoubleRune { first: 2, second: 2, .. })
        ));

        let wide_column = [RuneGroup::new(0.5, vec![1, 5])];
        assert!(matches!(
            DoubleRunes::encode(&wide_column),
            Err(RuneStringError::InvalidDoubleRune { first: 1, second: 5, .. })
        ));

        let triple = [RuneGroup::new(0.5, vec![0, 1, 2])];
        assert!(matches!(
            DoubleRunes::encode(&triple),
            Err(RuneStringError::GroupSizeMismatch { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn rejects_unknown_combo_value() {
        // one pair at time 0 whose combo slot holds 7
        let bytes = [0x01, 0x00, 0xE0, 0x00, 0x00];
        let mut cursor = Cursor::new(&bytes[..]);

        assert!(matches!(
            DoubleRunes::read(&mut cursor),
            Err(RuneStringError::InvalidComboCode(7))
        ));
    }

    proptest! {
        #[test]
        fn combo_is_symmetric(a in 0u8..4, b in 0u8..4) {
            prop_assume!(a != b);

            let value = combo_value(a, b);
            prop_assert_eq!(value, combo_value(b, a));
            prop_assert_eq!(value.and_then(combo_columns), Some((a.min(b), a.max(b))));
        }

        #[test]
        fn triplet_packing_is_lossless(values in proptest::array::uniform8(0u8..8)) {
            prop_assert_eq!(unpack_combos(pack_combos(values)), values);
        }
    }
}
