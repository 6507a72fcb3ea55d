use crate::engine::varint::{read_count, read_time, write_time, write_varint};
use crate::engine::{ByteCursor, Section};
use crate::error::RuneStringError;
use crate::model::chart::BpmChange;

/// Bpm changes in start time order: varint count, then a varint start time and a varint bpm per change.
/// Four decimal digits are plenty for bpm too, so both fields share the rune time encoding.
pub struct BpmChanges;

impl Section for BpmChanges {
    const NAME: &'static str = "bpm changes";

    type Item = BpmChange;

    fn write(changes: &[BpmChange], out: &mut Vec<u8>) -> Result<(), RuneStringError> {
        write_varint(out, changes.len() as u64);

        for change in changes {
            write_time(out, change.start_time, "bpm start time")?;
            write_time(out, change.bpm, "bpm")?;
        }

        Ok(())
    }

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Vec<BpmChange>, RuneStringError> {
        let count = read_count(cursor, Self::NAME)?;

        (0..count)
            .map(|_| {
                let start_time = read_time(cursor, Self::NAME)?;
                let bpm = read_time(cursor, Self::NAME)?;
                Ok(BpmChange::new(start_time, bpm))
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn three_tempo_changes() {
        let changes = [
            BpmChange::global(120.0),
            BpmChange::new(40.0, 140.0),
            BpmChange::new(74.28571428571429, 120.0),
        ];

        let bytes = BpmChanges::encode(&changes).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x03, 0x00, 0x80, 0x9F, 0x49, 0x80, 0xB5, 0x18, 0xC0, 0xB9, 0x55, 0xC9, 0xAB,
                0x2D, 0x80, 0x9F, 0x49
            ]
        );

        let mut cursor = Cursor::new(&bytes[..]);
        assert_eq!(BpmChanges::read(&mut cursor).unwrap(), changes.to_vec());
    }

    #[test]
    fn negative_bpm_is_rejected() {
        assert!(matches!(
            BpmChanges::encode(&[BpmChange::new(1.0, -120.0)]),
            Err(RuneStringError::InvalidTime { field: "bpm", .. })
        ));
        assert!(matches!(
            BpmChanges::encode(&[BpmChange::new(-1.0, 120.0)]),
            Err(RuneStringError::InvalidTime {
                field: "bpm start time",
                ..
            })
        ));
    }

    #[test]
    fn missing_bpm_is_truncation() {
        let bytes = [0x01, 0x00];
        let mut cursor = Cursor::new(&bytes[..]);

        assert!(matches!(
            BpmChanges::read(&mut cursor),
            Err(RuneStringError::Truncated { section: "bpm changes" })
        ));
    }
}
