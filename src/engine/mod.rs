use crate::error::RuneStringError;
use log::debug;
use std::io::{Cursor, Read};

pub mod bpm;
pub mod double;
pub mod grouping;
pub mod multi;
pub mod single;
pub mod varint;

pub type ByteCursor<'a> = Cursor<&'a [u8]>;

/// One self-contained block of a rune string body, led by its own item count.
pub trait Section {
    /// Used in log lines and to name the failing stage in decode errors.
    const NAME: &'static str;

    type Item;

    /// Append the encoded section for `items` to `out`.
    fn write(items: &[Self::Item], out: &mut Vec<u8>) -> Result<(), RuneStringError>;

    /// Read one whole section starting at the cursor.
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Vec<Self::Item>, RuneStringError>;

    fn encode(items: &[Self::Item]) -> Result<Vec<u8>, RuneStringError> {
        let mut out = Vec::new();
        Self::write(items, &mut out)?;
        Ok(out)
    }

    fn write_logged(items: &[Self::Item], out: &mut Vec<u8>) -> Result<(), RuneStringError> {
        let start = out.len();
        Self::write(items, out)?;
        debug!(
            "Wrote {} {} in {} bytes..!",
            items.len(),
            Self::NAME,
            out.len() - start
        );
        Ok(())
    }

    fn read_logged(cursor: &mut ByteCursor<'_>) -> Result<Vec<Self::Item>, RuneStringError> {
        let start = cursor.position();
        let items = Self::read(cursor)?;
        debug!(
            "Read {} {} from {} bytes..!",
            items.len(),
            Self::NAME,
            cursor.position() - start
        );
        Ok(items)
    }
}

pub(crate) fn read_u8(cursor: &mut ByteCursor<'_>, section: &'static str) -> Result<u8, RuneStringError> {
    let mut byte = [0u8; 1];
    cursor
        .read_exact(&mut byte)
        .map_err(|_| RuneStringError::Truncated { section })?;
    Ok(byte[0])
}

pub(crate) fn read_bytes(
    cursor: &mut ByteCursor<'_>,
    len: usize,
    section: &'static str,
) -> Result<Vec<u8>, RuneStringError> {
    let remaining = (cursor.get_ref().len() as u64).saturating_sub(cursor.position());
    if (len as u64) > remaining {
        return Err(RuneStringError::Truncated { section });
    }

    let mut bytes = vec![0u8; len];
    cursor
        .read_exact(&mut bytes)
        .map_err(|_| RuneStringError::Truncated { section })?;
    Ok(bytes)
}
