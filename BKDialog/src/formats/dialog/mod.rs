//! Banjo-Kazooie dialog format
//!
//! A dialog is two ordered lists of text lines: `bottom` (the textbox) and
//! `top` (the speaker/portrait header). Each line carries a leading command
//! byte that the game interprets (colour, portrait, terminator, ...); this
//! crate never looks inside it.
//!
//! - [`parser`] reads the `.dialog` authoring format
//! - [`writer`] packs a [`Dialog`] into the guest's word-swapped blob
//! - [`reader`] decodes such a blob back for inspection

mod parser;
mod reader;
mod writer;

pub use parser::{parse_dialog, read_dialog};
pub use reader::read_blob;
pub use writer::{BlobWarning, serialize_dialog, serialize_dialog_with_warnings, swap_words};

/// Every compiled blob begins with these three bytes (before the word swap).
pub const BLOB_HEADER: [u8; 3] = [0x01, 0x03, 0x00];

/// Compiled blobs are padded to this alignment before the word swap.
pub const WORD_SIZE: usize = 4;

/// File extension of dialog source files (without the dot).
pub const DIALOG_EXTENSION: &str = "dialog";

/// A single on-screen text line with its leading command byte
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BkString {
    /// Game-defined rendering directive, round-tripped verbatim
    pub cmd: u8,
    /// Raw text bytes (UTF-8 in source files, Latin-1 once decoded from a blob)
    pub bytes: Vec<u8>,
}

impl BkString {
    pub fn new(cmd: u8, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            cmd,
            bytes: bytes.into(),
        }
    }
}

/// Which list of a [`Dialog`] a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Bottom,
    Top,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Bottom => "bottom",
            Section::Top => "top",
        }
    }
}

/// A complete dialog: textbox lines plus header lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialog {
    pub bottom: Vec<BkString>,
    pub top: Vec<BkString>,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, section: Section) -> &[BkString] {
        match section {
            Section::Bottom => &self.bottom,
            Section::Top => &self.top,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<BkString> {
        match section {
            Section::Bottom => &mut self.bottom,
            Section::Top => &mut self.top,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bottom.is_empty() && self.top.is_empty()
    }
}
