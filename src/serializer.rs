use crate::engine::bpm::BpmChanges;
use crate::engine::double::DoubleRunes;
use crate::engine::grouping::{bucket_by_size, group_by_simultaneity};
use crate::engine::multi::MultiRunes;
use crate::engine::single::SingleRunes;
use crate::engine::{ByteCursor, Section, read_u8};
use crate::error::RuneStringError;
use crate::model::chart::{BpmChange, RuneStringData};
use crate::model::version::{Payload, Version};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::{debug, warn};
use std::io::Cursor;

/// First byte of every rune string.
pub const RUNE_STRING_RESERVED: u8 = 0;

const ENVELOPE: &str = "envelope";

/// Per-section counts of a decoded rune string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionStats {
    pub version: Version,
    pub byte_len: usize,
    pub single_runes: usize,
    pub double_runes: usize,
    pub multi_runes: usize,
    pub multi_rune_objects: usize,
    pub bpm_changes: usize,
    pub trailing_bytes: usize,
}

impl SectionStats {
    pub fn total_runes(&self) -> usize {
        self.single_runes + 2 * self.double_runes + self.multi_rune_objects
    }
}

/// Serializes a payload into a rune string, in the version the payload belongs to.
pub fn serialize(payload: &Payload) -> Result<String, RuneStringError> {
    Ok(STANDARD.encode(encode_bytes(payload)?))
}

/// Serializes a payload into a rune string of an explicitly requested format version.
/// Fails if the payload does not belong to that version.
pub fn serialize_with_version(payload: &Payload, version: u8) -> Result<String, RuneStringError> {
    if payload.version().to_byte() != version {
        return Err(RuneStringError::InvalidPayload(version));
    }

    serialize(payload)
}

pub fn encode_bytes(payload: &Payload) -> Result<Vec<u8>, RuneStringError> {
    let mut out = vec![RUNE_STRING_RESERVED, payload.version().to_byte()];

    match payload {
        Payload::V1(data) => write_v1(data, &mut out)?,
    }

    debug!("Encoded {:?} rune string of {} bytes..!", payload.version(), out.len());
    Ok(out)
}

/// Deserializes a rune string of any supported version.
pub fn deserialize(rune_string: &str) -> Result<Payload, RuneStringError> {
    decode_bytes(&STANDARD.decode(rune_string)?)
}

/// Deserializes a rune string that must be in version 1 of the format.
pub fn deserialize_v1(rune_string: &str) -> Result<RuneStringData, RuneStringError> {
    let bytes = STANDARD.decode(rune_string)?;
    let mut cursor = Cursor::new(&bytes[..]);

    match read_version_byte(&mut cursor)? {
        1 => {
            let data = read_v1(&mut cursor)?;
            check_trailing(&cursor);
            Ok(data)
        }
        other => Err(RuneStringError::NotVersion1(other)),
    }
}

pub fn decode_bytes(bytes: &[u8]) -> Result<Payload, RuneStringError> {
    let mut cursor = Cursor::new(bytes);

    let payload = match Version::try_from(read_version_byte(&mut cursor)?)? {
        Version::V1 => Payload::V1(read_v1(&mut cursor)?),
    };

    check_trailing(&cursor);
    Ok(payload)
}

/// Walks every section of a rune string and counts what it holds.
pub fn inspect(rune_string: &str) -> Result<SectionStats, RuneStringError> {
    let bytes = STANDARD.decode(rune_string)?;
    let mut cursor = Cursor::new(&bytes[..]);

    let version = Version::try_from(read_version_byte(&mut cursor)?)?;
    let mut stats = match version {
        Version::V1 => {
            let singles = SingleRunes::read(&mut cursor)?;
            let doubles = DoubleRunes::read(&mut cursor)?;
            let multis = MultiRunes::read(&mut cursor)?;
            let bpm_changes = BpmChanges::read(&mut cursor)?;

            SectionStats {
                version,
                single_runes: singles.len(),
                double_runes: doubles.len(),
                multi_runes: multis.len(),
                multi_rune_objects: multis.iter().map(|group| group.len()).sum(),
                bpm_changes: bpm_changes.len(),
                ..Default::default()
            }
        }
    };

    stats.byte_len = bytes.len();
    stats.trailing_bytes = bytes.len() - cursor.position() as usize;
    Ok(stats)
}

/// Reads the reserved byte and returns the raw version byte that follows it.
fn read_version_byte(cursor: &mut ByteCursor<'_>) -> Result<u8, RuneStringError> {
    let reserved = read_u8(cursor, ENVELOPE)?;
    if reserved != RUNE_STRING_RESERVED {
        return Err(RuneStringError::InvalidReserved(reserved));
    }

    read_u8(cursor, ENVELOPE)
}

fn check_trailing(cursor: &ByteCursor<'_>) {
    let trailing = cursor.get_ref().len() as u64 - cursor.position();
    if trailing > 0 {
        warn!("Ignoring {} trailing bytes after the rune string body..!", trailing);
    }
}

fn write_v1(data: &RuneStringData, out: &mut Vec<u8>) -> Result<(), RuneStringError> {
    let grouped = bucket_by_size(group_by_simultaneity(&data.runes));
    let bpm_changes: Vec<BpmChange> = data.bpm_changes.iter().copied().collect();

    SingleRunes::write_logged(&grouped.singles, out)?;
    DoubleRunes::write_logged(&grouped.doubles, out)?;
    MultiRunes::write_logged(&grouped.multis, out)?;
    BpmChanges::write_logged(&bpm_changes, out)?;

    Ok(())
}

fn read_v1(cursor: &mut ByteCursor<'_>) -> Result<RuneStringData, RuneStringError> {
    let singles = SingleRunes::read_logged(cursor)?;
    let doubles = DoubleRunes::read_logged(cursor)?;
    let multis = MultiRunes::read_logged(cursor)?;
    let bpm_changes = BpmChanges::read_logged(cursor)?;

    let runes = singles
        .into_iter()
        .chain(doubles.iter().flat_map(|group| group.runes()))
        .chain(multis.iter().flat_map(|group| group.runes()));

    Ok(RuneStringData::new(runes, bpm_changes))
}
