//! Text table identifiers and their file names

use std::fmt;
use std::path::Path;

use crate::formats::dialog::DIALOG_EXTENSION;

/// Identifier of a dialog in the game's text table.
///
/// Displayed as at least four uppercase hex digits; negative values print as
/// their 32-bit two's complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextId(pub i32);

impl TextId {
    /// Canonical source file name, e.g. `0A2F.dialog`
    pub fn file_name(self) -> String {
        format!("{self}.{DIALOG_EXTENSION}")
    }

    /// Decode a file stem of 1 to 8 hex digits (either case)
    pub fn from_stem(stem: &str) -> Option<Self> {
        if stem.is_empty() || stem.len() > 8 || !stem.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(stem, 16)
            .ok()
            .map(|value| Self(value as i32))
    }

    /// Decode the id of a `.dialog` path from its stem
    pub fn from_path(path: &Path) -> Option<Self> {
        let is_dialog = path
            .extension()
            .is_some_and(|ext| ext == DIALOG_EXTENSION);
        if !is_dialog {
            return None;
        }
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(Self::from_stem)
    }
}

impl fmt::Display for TextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

impl From<i32> for TextId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_padding() {
        assert_eq!(TextId(1).file_name(), "0001.dialog");
        assert_eq!(TextId(0x0A2F).file_name(), "0A2F.dialog");
        assert_eq!(TextId(0x12345).file_name(), "12345.dialog");
        assert_eq!(TextId(-1).file_name(), "FFFFFFFF.dialog");
    }

    #[test]
    fn test_from_stem() {
        assert_eq!(TextId::from_stem("0a2f"), Some(TextId(0x0A2F)));
        assert_eq!(TextId::from_stem("0A2F"), Some(TextId(0x0A2F)));
        assert_eq!(TextId::from_stem("5"), Some(TextId(5)));
        assert_eq!(TextId::from_stem("FFFFFFFF"), Some(TextId(-1)));
        assert_eq!(TextId::from_stem(""), None);
        assert_eq!(TextId::from_stem("0x10"), None);
        assert_eq!(TextId::from_stem("notes"), None);
        assert_eq!(TextId::from_stem("123456789"), None);
        assert_eq!(TextId::from_stem("+12"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(TextId::from_path(Path::new("a/b/0C5E.dialog")), Some(TextId(0x0C5E)));
        assert_eq!(TextId::from_path(Path::new("0C5E.txt")), None);
        assert_eq!(TextId::from_path(Path::new("readme.dialog")), None);
    }
}
