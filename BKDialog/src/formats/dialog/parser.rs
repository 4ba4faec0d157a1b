//! `.dialog` authoring format parsing
//!
//! The format looks like YAML but only a flat, line-oriented subset is
//! accepted:
//!
//! ```text
//! type: Dialog
//! bottom:
//!   - { cmd: 0x83, string: "Hello, Banjo!" }
//! top:
//!   - { cmd: 0x80, string: 'Bottles' }
//! ```
//!
//! Each construct must sit on its own line; anything else is ignored.
//! Quoted strings end at the next matching quote character and are taken
//! byte-for-byte, so there are no escapes and no multi-line strings.

use super::{BkString, Dialog, Section};
use crate::error::{Error, Result};
use std::path::Path;

const TYPE_KEY: &[u8] = b"type:";
const TYPE_VALUE: &[u8] = b"Dialog";
const BOTTOM_KEY: &[u8] = b"bottom:";
const TOP_KEY: &[u8] = b"top:";
const ENTRY_MARKER: &[u8] = b"- {";
const CMD_KEY: &[u8] = b"cmd:";
const STRING_KEY: &[u8] = b"string:";

/// Read a `.dialog` file from disk
///
/// # Errors
///
/// Returns [`Error::DialogFileUnreadable`] if the file cannot be read.
/// Returns [`Error::ExpectedDialogType`] if the `type: Dialog` header is missing or wrong.
pub fn read_dialog<P: AsRef<Path>>(path: P) -> Result<Dialog> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| Error::DialogFileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dialog(&data)
}

/// Parse `.dialog` source bytes
///
/// # Errors
///
/// Returns [`Error::ExpectedDialogType`] if no `type:` line is present, or if
/// a `type:` line's value does not contain `Dialog`.
pub fn parse_dialog(data: &[u8]) -> Result<Dialog> {
    let mut dialog = Dialog::new();
    let mut current: Option<Section> = None;
    let mut saw_type = false;

    for raw_line in data.split(|&b| b == b'\n') {
        // Trim leading whitespace; blank lines carry nothing
        let Some(start) = raw_line
            .iter()
            .position(|b| !matches!(b, b' ' | b'\t' | b'\r'))
        else {
            continue;
        };
        let line = &raw_line[start..];

        if let Some(value) = line.strip_prefix(TYPE_KEY) {
            if find(value, TYPE_VALUE).is_none() {
                return Err(Error::ExpectedDialogType);
            }
            saw_type = true;
        } else if line.starts_with(BOTTOM_KEY) {
            current = Some(Section::Bottom);
        } else if line.starts_with(TOP_KEY) {
            current = Some(Section::Top);
        } else if find(line, ENTRY_MARKER).is_some() {
            // Entries before any section selector are dropped
            if let Some(section) = current {
                dialog.section_mut(section).push(parse_entry(line));
            }
        }
    }

    if !saw_type {
        return Err(Error::ExpectedDialogType);
    }

    Ok(dialog)
}

/// Parse an inline entry: `- { cmd: 0x83, string: "text" }`
fn parse_entry(line: &[u8]) -> BkString {
    let mut entry = BkString::default();

    if let Some(pos) = find(line, CMD_KEY) {
        let rest = &line[pos + CMD_KEY.len()..];
        let end = rest
            .iter()
            .position(|b| matches!(b, b',' | b'}'))
            .unwrap_or(rest.len());
        let value = trim(&rest[..end]);
        entry.cmd = parse_cmd(value).unwrap_or_else(|| {
            tracing::warn!(
                "Unparseable cmd value {:?}, using 0",
                String::from_utf8_lossy(value)
            );
            0
        });
    }

    if let Some(pos) = find(line, STRING_KEY) {
        let rest = &line[pos + STRING_KEY.len()..];
        if let Some(open) = rest.iter().position(|b| matches!(b, b'"' | b'\'')) {
            let quote = rest[open];
            let body = &rest[open + 1..];
            // Unclosed quote leaves the string empty
            if let Some(close) = body.iter().position(|&b| b == quote) {
                entry.bytes = body[..close].to_vec();
            }
        }
    }

    entry
}

/// Parse an integer with C-style base detection, truncated to 8 bits.
///
/// `0x`/`0X` selects hex, a leading `0` selects octal, anything else is
/// decimal. Parsing stops at the first character that is not a digit of the
/// selected base. Returns `None` when no digits were consumed at all.
fn parse_cmd(text: &[u8]) -> Option<u8> {
    let (negative, unsigned) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, text),
    };

    // A hex or octal prefix already consumed a valid leading zero
    let (radix, digits, had_zero) = if let Some(hex) = unsigned
        .strip_prefix(b"0x")
        .or_else(|| unsigned.strip_prefix(b"0X"))
    {
        (16, hex, true)
    } else if let Some(octal) = unsigned.strip_prefix(b"0") {
        (8, octal, true)
    } else {
        (10, unsigned, false)
    };

    let mut value: u64 = 0;
    let mut consumed = 0usize;
    for &b in digits {
        let Some(digit) = char::from(b).to_digit(radix) else {
            break;
        };
        value = value
            .wrapping_mul(u64::from(radix))
            .wrapping_add(u64::from(digit));
        consumed += 1;
    }

    if consumed == 0 && !had_zero {
        return None;
    }

    let value = if negative { value.wrapping_neg() } else { value };
    Some(value as u8)
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t'))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !matches!(b, b' ' | b'\t'))
        .map_or(start, |i| i + 1);
    &bytes[start..end.max(start)]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_dialog() {
        let dialog = parse_dialog(b"type: Dialog\nbottom:\ntop:\n").unwrap();
        assert!(dialog.is_empty());
    }

    #[test]
    fn test_parse_entries_in_sections() {
        let src = b"type: Dialog\n\
bottom:\n\
  - { cmd: 0x83, string: \"Hi\" }\n\
  - { cmd: 4, string: 'Guh-huh!' }\n\
top:\n\
  - { cmd: 0x80, string: \"Bottles\" }\n";
        let dialog = parse_dialog(src).unwrap();
        assert_eq!(
            dialog.bottom,
            vec![BkString::new(0x83, "Hi"), BkString::new(4, "Guh-huh!")]
        );
        assert_eq!(dialog.top, vec![BkString::new(0x80, "Bottles")]);
    }

    #[test]
    fn test_missing_type_is_error() {
        let err = parse_dialog(b"bottom:\n  - { cmd: 1, string: \"x\" }\n").unwrap_err();
        assert!(matches!(err, Error::ExpectedDialogType));
        assert_eq!(err.to_string(), "Expected Dialog type");
    }

    #[test]
    fn test_wrong_type_is_error() {
        let err = parse_dialog(b"type: QuizQuestion\nbottom:\n").unwrap_err();
        assert!(matches!(err, Error::ExpectedDialogType));
    }

    #[test]
    fn test_type_may_appear_anywhere() {
        let dialog = parse_dialog(b"bottom:\n - { cmd: 1, string: \"a\" }\ntype: Dialog\n").unwrap();
        assert_eq!(dialog.bottom.len(), 1);
    }

    #[test]
    fn test_entry_before_section_is_dropped() {
        let dialog =
            parse_dialog(b"type: Dialog\n- { cmd: 1, string: \"lost\" }\nbottom:\n").unwrap();
        assert!(dialog.is_empty());
    }

    #[test]
    fn test_cmd_radix_detection() {
        assert_eq!(parse_cmd(b"0x83"), Some(0x83));
        assert_eq!(parse_cmd(b"0XfF"), Some(0xFF));
        assert_eq!(parse_cmd(b"017"), Some(0o17));
        assert_eq!(parse_cmd(b"42"), Some(42));
        assert_eq!(parse_cmd(b"0"), Some(0));
        assert_eq!(parse_cmd(b"-1"), Some(0xFF));
        assert_eq!(parse_cmd(b"0x1FF"), Some(0xFF));
        assert_eq!(parse_cmd(b"12abc"), Some(12));
        assert_eq!(parse_cmd(b"0x"), Some(0));
        assert_eq!(parse_cmd(b"abc"), None);
        assert_eq!(parse_cmd(b""), None);
    }

    #[test]
    fn test_defaults_when_keys_absent() {
        let dialog = parse_dialog(b"type: Dialog\nbottom:\n - { string: \"x\" }\n - { cmd: 7 }\n").unwrap();
        assert_eq!(dialog.bottom, vec![BkString::new(0, "x"), BkString::new(7, "")]);
    }

    #[test]
    fn test_string_quoting_rules() {
        let src = b"type: Dialog\nbottom:\n\
 - { cmd: 1, string: 'say \"hi\"' }\n\
 - { cmd: 2, string: \"it's\" }\n\
 - { cmd: 3, string: \"unterminated }\n\
 - { cmd: 4, string: }\n";
        let dialog = parse_dialog(src).unwrap();
        assert_eq!(dialog.bottom[0].bytes, b"say \"hi\"");
        assert_eq!(dialog.bottom[1].bytes, b"it's");
        assert!(dialog.bottom[2].bytes.is_empty());
        assert!(dialog.bottom[3].bytes.is_empty());
        assert_eq!(dialog.bottom[3].cmd, 4);
    }

    #[test]
    fn test_raw_bytes_and_crlf() {
        let src = "type: Dialog\r\nbottom:\r\n\t- { cmd: 0x20, string: \"Gruntilda é\" }\r\n".as_bytes();
        let dialog = parse_dialog(src).unwrap();
        assert_eq!(dialog.bottom[0].cmd, 0x20);
        assert_eq!(dialog.bottom[0].bytes, "Gruntilda é".as_bytes());
    }

    #[test]
    fn test_unparseable_cmd_defaults_to_zero() {
        let dialog = parse_dialog(b"type: Dialog\ntop:\n - { cmd: speaker, string: \"x\" }\n").unwrap();
        assert_eq!(dialog.top[0].cmd, 0);
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim(b"  0x10\t"), b"0x10");
        assert_eq!(trim(b"   "), b"");
        assert_eq!(trim(b""), b"");
    }
}
