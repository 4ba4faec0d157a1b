//! Packed dialog blob writing
//!
//! Layout before the word swap:
//!
//! ```text
//! 01 03 00
//! N_bottom  { cmd, len + 1, latin1 bytes..., 00 } * N_bottom
//! N_top     { cmd, len + 1, latin1 bytes..., 00 } * N_top
//! zero padding to a multiple of 4
//! ```
//!
//! The guest reads the blob as big-endian words through a little-endian host
//! mapping, so every aligned 32-bit word is byte-reversed at the end.

use super::{BLOB_HEADER, BkString, Dialog, Section, WORD_SIZE};
use crate::text::utf8_to_latin1;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// A value that did not fit its 8-bit field and was truncated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobWarning {
    /// More than 255 lines in a section; the count byte wraps.
    SectionTooLong { section: Section, count: usize },
    /// A line's Latin-1 text plus terminator exceeds 255 bytes; the length byte wraps.
    EntryTooLong {
        section: Section,
        index: usize,
        len: usize,
    },
}

impl std::fmt::Display for BlobWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobWarning::SectionTooLong { section, count } => write!(
                f,
                "{} section has {count} lines, count byte truncated to {}",
                section.name(),
                *count as u8
            ),
            BlobWarning::EntryTooLong {
                section,
                index,
                len,
            } => write!(
                f,
                "{} line {index} is {len} bytes with terminator, length byte truncated to {}",
                section.name(),
                *len as u8
            ),
        }
    }
}

/// Serialize a dialog into its word-swapped blob form
pub fn serialize_dialog(dialog: &Dialog) -> Vec<u8> {
    serialize_dialog_with_warnings(dialog).0
}

/// Serialize a dialog and report every 8-bit field that had to be truncated
pub fn serialize_dialog_with_warnings(dialog: &Dialog) -> (Vec<u8>, Vec<BlobWarning>) {
    let mut out = BLOB_HEADER.to_vec();
    let mut warnings = Vec::new();

    for section in [Section::Bottom, Section::Top] {
        write_section(&mut out, section, dialog.section(section), &mut warnings);
    }

    // Pad to 4-byte alignment for the endianness swap
    let padded_len = out.len().next_multiple_of(WORD_SIZE);
    out.resize(padded_len, 0);

    swap_words(&mut out);

    (out, warnings)
}

fn write_section(
    out: &mut Vec<u8>,
    section: Section,
    entries: &[BkString],
    warnings: &mut Vec<BlobWarning>,
) {
    if entries.len() > usize::from(u8::MAX) {
        warnings.push(BlobWarning::SectionTooLong {
            section,
            count: entries.len(),
        });
    }
    out.push(entries.len() as u8);

    for (index, entry) in entries.iter().enumerate() {
        let text = utf8_to_latin1(&entry.bytes);
        let len = text.len() + 1; // +1 for null terminator
        if len > usize::from(u8::MAX) {
            warnings.push(BlobWarning::EntryTooLong {
                section,
                index,
                len,
            });
        }

        out.push(entry.cmd);
        out.push(len as u8);
        out.extend_from_slice(&text);
        out.push(0);
    }
}

/// Reverse the bytes of every aligned 32-bit word in place.
///
/// A trailing partial word is left untouched. The swap is its own inverse.
pub fn swap_words(buf: &mut [u8]) {
    for word in buf.chunks_exact_mut(WORD_SIZE) {
        let value = BigEndian::read_u32(word);
        LittleEndian::write_u32(word, value);
    }
}
