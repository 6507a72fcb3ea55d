use crate::engine::grouping::RuneGroup;
use crate::engine::varint::{read_count, read_time, read_varint, write_time, write_varint};
use crate::engine::{ByteCursor, Section, read_u8};
use crate::error::RuneStringError;

/// Groups of three or more runes sharing a time.
///
/// These are rare, so they are stored uncompressed: per group a varint time, one count byte,
/// and one varint per column.
pub struct MultiRunes;

impl Section for MultiRunes {
    const NAME: &'static str = "multi runes";

    type Item = RuneGroup;

    fn write(groups: &[RuneGroup], out: &mut Vec<u8>) -> Result<(), RuneStringError> {
        write_varint(out, groups.len() as u64);

        for group in groups {
            let count = u8::try_from(group.len()).map_err(|_| RuneStringError::GroupTooLarge {
                time: group.time,
                count: group.len(),
            })?;

            write_time(out, group.time, "rune time")?;
            out.push(count);
            for &column in &group.columns {
                write_varint(out, column as u64);
            }
        }

        Ok(())
    }

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Vec<RuneGroup>, RuneStringError> {
        let count = read_count(cursor, Self::NAME)?;
        let mut groups = Vec::new();

        for _ in 0..count {
            let time = read_time(cursor, Self::NAME)?;
            let n = read_u8(cursor, Self::NAME)?;

            // values above 3 make no sense in game, but the format carries them anyway
            let columns = (0..n)
                .map(|_| {
                    let column = read_varint(cursor, Self::NAME)?;
                    u8::try_from(column).map_err(|_| RuneStringError::ColumnOverflow(column))
                })
                .collect::<Result<Vec<u8>, _>>()?;

            groups.push(RuneGroup::new(time, columns));
        }

        Ok(groups)
    }
}
