//! Fixed-width digit codec.
//!
//! Every byte renders to exactly [`CodeType::max_digits_for_byte`] digits,
//! most significant first, so the code matrix stays column-aligned. Row
//! positions in the gutter use [`long_to_base_code`].

pub mod preview;

use crate::model::{CodeCharactersCase, CodeType};
use thiserror::Error;

pub use preview::decode_preview;

const UPPER_HEX_CODES: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];
const LOWER_HEX_CODES: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Digit alphabet for the given case.
pub fn hex_codes(case: CodeCharactersCase) -> &'static [char; 16] {
    match case {
        CodeCharactersCase::Upper => &UPPER_HEX_CODES,
        CodeCharactersCase::Lower => &LOWER_HEX_CODES,
    }
}

/// Errors parsing typed digits back into a byte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// More digits than a byte has in this code type.
    #[error("code '{code}' is longer than {max} digits")]
    TooLong {
        /// The rejected input.
        code: String,
        /// Digits allowed for the code type.
        max: usize,
    },

    /// A character outside the code type's digit alphabet.
    #[error("invalid character '{character}' for {code_type} code")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Code type being parsed.
        code_type: CodeType,
    },

    /// Digits are valid but the value exceeds 255.
    #[error("value {0} does not fit in a byte")]
    ValueTooBig(u32),
}

/// Write the digits of `value` into `target[..code_type.max_digits_for_byte()]`.
///
/// # Panics
/// Panics if `target` is shorter than the digit count.
///
/// # Examples
/// ```
/// use hexgrid::codec::byte_to_chars_code;
/// use hexgrid::model::{CodeCharactersCase, CodeType};
///
/// let mut digits = ['\0'; 2];
/// byte_to_chars_code(0xAB, CodeType::Hexadecimal, &mut digits, CodeCharactersCase::Upper);
/// assert_eq!(digits, ['A', 'B']);
/// ```
pub fn byte_to_chars_code(
    value: u8,
    code_type: CodeType,
    target: &mut [char],
    case: CodeCharactersCase,
) {
    let codes = hex_codes(case);
    let value = value as usize;
    match code_type {
        CodeType::Binary => {
            for (i, slot) in target[..8].iter_mut().enumerate() {
                *slot = codes[(value >> (7 - i)) & 1];
            }
        }
        CodeType::Octal => {
            target[0] = codes[value / 64];
            target[1] = codes[(value / 8) & 7];
            target[2] = codes[value & 7];
        }
        CodeType::Decimal => {
            target[0] = codes[value / 100];
            target[1] = codes[(value / 10) % 10];
            target[2] = codes[value % 10];
        }
        CodeType::Hexadecimal => {
            target[0] = codes[(value >> 4) & 15];
            target[1] = codes[value & 15];
        }
    }
}

/// Parse up to `max_digits_for_byte` digits back into a byte.
///
/// Shorter input is treated as having leading zeros. Hexadecimal digits are
/// accepted in either case.
pub fn string_code_to_byte(code: &str, code_type: CodeType) -> Result<u8, CodecError> {
    let max = code_type.max_digits_for_byte();
    if code.chars().count() > max {
        return Err(CodecError::TooLong {
            code: code.to_string(),
            max,
        });
    }

    let base = code_type.base();
    let mut value: u32 = 0;
    for character in code.chars() {
        let digit = character
            .to_digit(base)
            .ok_or(CodecError::InvalidCharacter {
                character,
                code_type,
            })?;
        value = value * base + digit;
    }

    u8::try_from(value).map_err(|_| CodecError::ValueTooBig(value))
}

/// Render `value` in `base` into `target[..length]`, right aligned.
///
/// With `fill_zeros` the leading positions are `'0'`; otherwise they are
/// spaces. Digits that do not fit in `length` are dropped from the left.
///
/// # Panics
/// Panics if `base` is not in `2..=16` or `target` is shorter than `length`.
pub fn long_to_base_code(
    target: &mut [char],
    value: u64,
    base: u32,
    length: usize,
    fill_zeros: bool,
    case: CodeCharactersCase,
) {
    assert!((2..=16).contains(&base), "unsupported base {base}");
    let codes = hex_codes(case);
    let base = base as u64;
    let mut remaining = value;
    for i in (0..length).rev() {
        if !fill_zeros && remaining == 0 && i + 1 < length {
            target[i] = ' ';
            continue;
        }
        target[i] = codes[(remaining % base) as usize];
        remaining /= base;
    }
}

/// Number of digits needed to print `value` in `base`, at least 1.
///
/// For base 16 this equals `ceil(log16(value + 1))`, which is the gutter
/// width needed for offsets up to the data size.
pub fn base_code_length(value: u64, base: u32) -> usize {
    let base = base.max(2) as u64;
    let mut length = 1;
    let mut remaining = value / base;
    while remaining > 0 {
        length += 1;
        remaining /= base;
    }
    length
}
