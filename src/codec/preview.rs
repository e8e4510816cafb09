//! Text preview decoding.
//!
//! The preview shows exactly one cell per byte. Multi-byte characters are
//! drawn at their first byte and the cells of their remaining bytes are
//! blank, so columns stay aligned with the code matrix.

use crate::model::TextEncoding;

/// Cell shown for bytes that do not decode to a printable character.
pub const UNPRINTABLE: char = '.';

/// Cell shown for trailing bytes of a multi-byte character.
pub const CONTINUATION: char = ' ';

/// Decode `count` preview cells from `data` into `target[..count]`.
///
/// `data` may extend past `count` so characters that start near the end of
/// the row can be completed from the following bytes. `start_offset` is the
/// document offset of `data[0]`; UTF-16 uses it to find code unit alignment.
pub fn decode_preview(
    data: &[u8],
    count: usize,
    start_offset: u64,
    encoding: TextEncoding,
    target: &mut [char],
) {
    let count = count.min(data.len()).min(target.len());
    match encoding {
        TextEncoding::Ascii => {
            for (slot, &byte) in target[..count].iter_mut().zip(data) {
                *slot = if byte.is_ascii() {
                    printable(byte as char)
                } else {
                    UNPRINTABLE
                };
            }
        }
        TextEncoding::Latin1 | TextEncoding::Other => {
            for (slot, &byte) in target[..count].iter_mut().zip(data) {
                *slot = printable(byte as char);
            }
        }
        TextEncoding::Utf8 => decode_utf8(data, count, target),
        TextEncoding::Utf16Le => decode_utf16le(data, count, start_offset, target),
    }
}

fn printable(character: char) -> char {
    if character.is_control() {
        UNPRINTABLE
    } else {
        character
    }
}

fn utf8_sequence_length(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn decode_utf8(data: &[u8], count: usize, target: &mut [char]) {
    let mut i = 0;
    while i < count {
        let decoded = utf8_sequence_length(data[i]).and_then(|length| {
            let bytes = data.get(i..i + length)?;
            let text = std::str::from_utf8(bytes).ok()?;
            text.chars().next().map(|character| (character, length))
        });

        match decoded {
            Some((character, length)) => {
                target[i] = printable(character);
                for slot in target.iter_mut().take(count).skip(i + 1).take(length - 1) {
                    *slot = CONTINUATION;
                }
                i += length;
            }
            None => {
                target[i] = UNPRINTABLE;
                i += 1;
            }
        }
    }
}

fn decode_utf16le(data: &[u8], count: usize, start_offset: u64, target: &mut [char]) {
    let unit_at = |index: usize| -> Option<u16> {
        let pair = data.get(index..index + 2)?;
        Some(u16::from_le_bytes([pair[0], pair[1]]))
    };

    let mut i = 0;
    if start_offset % 2 == 1 && count > 0 {
        // Second half of a code unit that began on the previous row.
        target[0] = CONTINUATION;
        i = 1;
    }

    while i < count {
        let decoded = unit_at(i).and_then(|unit| match unit {
            0xD800..=0xDBFF => {
                let low = unit_at(i + 2)?;
                char::decode_utf16([unit, low])
                    .next()?
                    .ok()
                    .map(|character| (character, 4))
            }
            0xDC00..=0xDFFF => None,
            _ => char::from_u32(unit as u32).map(|character| (character, 2)),
        });

        match decoded {
            Some((character, length)) => {
                target[i] = printable(character);
                for slot in target.iter_mut().take(count).skip(i + 1).take(length - 1) {
                    *slot = CONTINUATION;
                }
                i += length;
            }
            None => {
                target[i] = UNPRINTABLE;
                if i + 1 < count {
                    target[i + 1] = CONTINUATION;
                }
                i += 2;
            }
        }
    }
}
