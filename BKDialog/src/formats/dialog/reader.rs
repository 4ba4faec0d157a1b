//! Packed dialog blob reading
//!
//! Used for inspecting compiled output. Text comes back as the Latin-1 bytes
//! that were packed, not the original UTF-8.

use super::{BLOB_HEADER, BkString, Dialog, Section, swap_words};
use crate::error::{Error, Result};
use byteorder::ReadBytesExt;
use std::io::{Cursor, Read};

/// Decode a word-swapped dialog blob (trailing padding is ignored)
///
/// # Errors
///
/// Returns [`Error::InvalidBlobHeader`] if the blob does not begin with `01 03 00`.
/// Returns [`Error::ZeroLengthEntry`] or [`Error::MissingTerminator`] for malformed entries.
/// Returns [`Error::UnexpectedEof`] if the blob ends inside a section.
pub fn read_blob(blob: &[u8]) -> Result<Dialog> {
    let mut data = blob.to_vec();
    swap_words(&mut data);
    let mut cursor = Cursor::new(data.as_slice());

    let mut header = [0u8; 3];
    cursor.read_exact(&mut header).map_err(|_| Error::UnexpectedEof)?;
    if header != BLOB_HEADER {
        return Err(Error::InvalidBlobHeader(header));
    }

    let mut dialog = Dialog::new();
    for section in [Section::Bottom, Section::Top] {
        let count = next_u8(&mut cursor)?;
        let entries = dialog.section_mut(section);
        for _ in 0..count {
            entries.push(read_entry(&mut cursor)?);
        }
    }

    Ok(dialog)
}

fn read_entry(cursor: &mut Cursor<&[u8]>) -> Result<BkString> {
    let cmd = next_u8(cursor)?;

    let len_offset = cursor.position() as usize;
    let len = next_u8(cursor)?;
    if len == 0 {
        return Err(Error::ZeroLengthEntry { offset: len_offset });
    }

    // Length includes the terminator
    let mut text = vec![0u8; usize::from(len) - 1];
    cursor.read_exact(&mut text).map_err(|_| Error::UnexpectedEof)?;

    let terminator_offset = cursor.position() as usize;
    if next_u8(cursor)? != 0 {
        return Err(Error::MissingTerminator {
            offset: terminator_offset,
        });
    }

    Ok(BkString::new(cmd, text))
}

fn next_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8> {
    cursor.read_u8().map_err(|_| Error::UnexpectedEof)
}
