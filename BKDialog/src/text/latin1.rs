//! UTF-8 ↔ ISO-8859-1 conversion
//!
//! The game's font covers exactly the Latin-1 range, so every source string is
//! squeezed into one byte per character before it is packed.

/// Byte emitted for anything Latin-1 cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// Transcode UTF-8 bytes to Latin-1.
///
/// Scalars up to U+00FF map to their own byte value. Any other well-formed
/// sequence becomes a single [`REPLACEMENT`] and is consumed whole. A stray
/// continuation byte, an invalid lead byte or a truncated/ill-formed sequence
/// becomes a single [`REPLACEMENT`] and only one byte is consumed.
pub fn utf8_to_latin1(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let lead = input[pos];
        if lead < 0x80 {
            out.push(lead);
            pos += 1;
            continue;
        }

        match sequence_len(lead) {
            Some(len) if is_well_formed(&input[pos..], len) => {
                if len == 2 && matches!(lead, 0xC2 | 0xC3) {
                    out.push(((lead & 0x1F) << 6) | (input[pos + 1] & 0x3F));
                } else {
                    out.push(REPLACEMENT);
                }
                pos += len;
            }
            _ => {
                out.push(REPLACEMENT);
                pos += 1;
            }
        }
    }

    out
}

/// Widen Latin-1 bytes to a UTF-8 string (every byte is a valid scalar).
pub fn latin1_to_utf8(input: &[u8]) -> String {
    input.iter().map(|&b| char::from(b)).collect()
}

/// Expected length of a UTF-8 sequence from its lead byte
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        // Continuation bytes, overlong leads (C0/C1) and leads past U+10FFFF
        _ => None,
    }
}

/// Check that `bytes` starts with one complete, valid sequence of `len` bytes.
///
/// Rejects overlong encodings, surrogates and scalars above U+10FFFF.
fn is_well_formed(bytes: &[u8], len: usize) -> bool {
    bytes
        .get(..len)
        .is_some_and(|seq| std::str::from_utf8(seq).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(c: char) -> Vec<u8> {
        let mut buf = [0u8; 4];
        c.encode_utf8(&mut buf).as_bytes().to_vec()
    }

    #[test]
    fn test_ascii_is_identity() {
        let ascii: Vec<u8> = (0u8..0x80).collect();
        assert_eq!(utf8_to_latin1(&ascii), ascii);
    }

    #[test]
    fn test_latin1_range_round_trips() {
        for scalar in 0u32..=0xFF {
            let c = char::from_u32(scalar).unwrap();
            assert_eq!(utf8_to_latin1(&encode(c)), vec![scalar as u8], "U+{scalar:04X}");
        }
    }

    #[test]
    fn test_beyond_latin1_is_single_replacement() {
        let samples = ['Ā', 'Ő', '€', '—', '漢', '\u{FFFF}', '😀', '\u{10FFFF}'];
        for c in samples {
            assert_eq!(utf8_to_latin1(&encode(c)), vec![REPLACEMENT], "{c:?}");
        }
        // Sweep every 97th scalar above the Latin-1 range
        for scalar in (0x100u32..=0x10FFFF).step_by(97) {
            if let Some(c) = char::from_u32(scalar) {
                assert_eq!(utf8_to_latin1(&encode(c)), vec![REPLACEMENT]);
            }
        }
    }

    #[test]
    fn test_accented_text() {
        assert_eq!(utf8_to_latin1("é".as_bytes()), vec![0xE9]);
        assert_eq!(utf8_to_latin1("Grüße!".as_bytes()), b"Gr\xFC\xDFe!".to_vec());
        assert_eq!(utf8_to_latin1("漢".as_bytes()), vec![0x3F]);
    }

    #[test]
    fn test_malformed_input() {
        // Stray continuation byte
        assert_eq!(utf8_to_latin1(&[0xA9]), b"?".to_vec());
        // Truncated two-byte sequence at end of input
        assert_eq!(utf8_to_latin1(&[b'a', 0xC3]), b"a?".to_vec());
        // Truncated three-byte sequence: lead and continuation each fail alone
        assert_eq!(utf8_to_latin1(&[0xE6, 0xBC, b'x']), b"??x".to_vec());
        // Overlong encoding of '/'
        assert_eq!(utf8_to_latin1(&[0xC0, 0xAF]), b"??".to_vec());
        // Encoded surrogate U+D800
        assert_eq!(utf8_to_latin1(&[0xED, 0xA0, 0x80]), b"???".to_vec());
        // Lead byte beyond U+10FFFF
        assert_eq!(utf8_to_latin1(&[0xF5, b'a']), b"?a".to_vec());
        // Two-byte lead followed by ASCII instead of a continuation
        assert_eq!(utf8_to_latin1(&[0xC3, b'A']), b"?A".to_vec());
    }

    #[test]
    fn test_latin1_to_utf8() {
        assert_eq!(latin1_to_utf8(&[b'G', 0xFC, 0xDF]), "Güß");
        assert_eq!(latin1_to_utf8(&[]), "");
    }
}
