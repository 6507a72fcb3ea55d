use crate::engine::varint::{read_count, read_time, write_time, write_varint};
use crate::engine::{ByteCursor, Section, read_bytes};
use crate::error::RuneStringError;
use crate::model::chart::Rune;

/// Runes that are alone on their time.
///
/// Layout: varint count, `count` varint times, then `ceil(count / 4)` bytes of packed 2-bit columns.
/// Times and columns live in separate arrays so the columns can be packed four to a byte.
pub struct SingleRunes;

impl Section for SingleRunes {
    const NAME: &'static str = "single runes";

    type Item = Rune;

    fn write(runes: &[Rune], out: &mut Vec<u8>) -> Result<(), RuneStringError> {
        if let Some(rune) = runes.iter().find(|rune| rune.column > 3) {
            return Err(RuneStringError::InvalidSingleColumn {
                time: rune.time,
                column: rune.column,
            });
        }

        write_varint(out, runes.len() as u64);
        for rune in runes {
            write_time(out, rune.time, "rune time")?;
        }

        let columns: Vec<u8> = runes.iter().map(|rune| rune.column).collect();
        out.extend(pack_columns(&columns));

        Ok(())
    }

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Vec<Rune>, RuneStringError> {
        let count = read_count(cursor, Self::NAME)?;

        let times = (0..count)
            .map(|_| read_time(cursor, Self::NAME))
            .collect::<Result<Vec<f64>, _>>()?;

        let packed = read_bytes(cursor, count.div_ceil(4), Self::NAME)?;
        let columns = unpack_columns(&packed, count);

        Ok(times
            .into_iter()
            .zip(columns)
            .map(|(time, column)| Rune::new(time, column))
            .collect())
    }
}

/// Packs 2-bit columns four to a byte, first column in the high bits: `c0 c1 c2 c3`.
/// The last byte is zero padded.
pub fn pack_columns(columns: &[u8]) -> Vec<u8> {
    columns
        .chunks(4)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (slot, column)| byte | (column & 3) << (6 - 2 * slot))
        })
        .collect()
}

/// Inverse of [`pack_columns`], returning exactly `count` columns.
pub fn unpack_columns(packed: &[u8], count: usize) -> Vec<u8> {
    packed
        .iter()
        .flat_map(|byte| [byte >> 6, (byte >> 4) & 3, (byte >> 2) & 3, byte & 3])
        .take(count)
        .collect()
}
