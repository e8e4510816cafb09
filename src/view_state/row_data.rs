//! Per-row characters handed to renderers.
//!
//! The engine decodes each visible row once; renderers only draw the
//! characters they receive.

use std::ops::Range;

use super::structure::Structure;
use crate::codec::{base_code_length, byte_to_chars_code, decode_preview, long_to_base_code};
use crate::model::error::InputError;
use crate::model::{CodeCharactersCase, TextEncoding};
use crate::source::DataProvider;

/// Base of row positions in the gutter and column numbers in the header.
pub const POSITION_BASE: u32 = 16;

/// Character settings for row rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFormat {
    /// Case of hexadecimal code digits.
    pub code_case: CodeCharactersCase,
    /// Case of hexadecimal row positions.
    pub row_position_case: CodeCharactersCase,
    /// Digits in the row-position gutter.
    pub row_position_length: usize,
    /// Preview text encoding.
    pub encoding: TextEncoding,
    /// Worst-case bytes per preview character, for lookahead past the row.
    pub max_bytes_per_char: usize,
}

impl Default for RowFormat {
    fn default() -> Self {
        Self {
            code_case: CodeCharactersCase::default(),
            row_position_case: CodeCharactersCase::default(),
            row_position_length: 8,
            encoding: TextEncoding::default(),
            max_bytes_per_char: 1,
        }
    }
}

/// Decoded characters of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowData {
    /// Row index.
    pub row: u64,
    /// Document offset of the row's first byte.
    pub data_offset: u64,
    /// Gutter digits.
    pub position_chars: Vec<char>,
    /// Code section, separators included; empty when hidden.
    pub code_chars: Vec<char>,
    /// Preview section, one cell per byte; empty when hidden.
    pub preview_chars: Vec<char>,
    /// Document bytes on this row (fewer than bytes per row on the last row).
    pub byte_count: usize,
}

impl RowData {
    /// The row as shown in the data view: code, separator, preview.
    pub fn line(&self) -> String {
        let mut line: String = self.code_chars.iter().collect();
        if !self.code_chars.is_empty() && !self.preview_chars.is_empty() {
            line.push(' ');
        }
        line.extend(self.preview_chars.iter());
        line
    }

    /// Gutter text.
    pub fn position(&self) -> String {
        self.position_chars.iter().collect()
    }
}

/// Gutter width for a document of `data_size` bytes, within `[min, max]`.
///
/// A `max` of 0 means no upper limit.
pub fn row_position_length(data_size: u64, min: usize, max: usize) -> usize {
    let length = base_code_length(data_size, POSITION_BASE).max(min).max(1);
    if max > 0 {
        length.min(max)
    } else {
        length
    }
}

/// Decode `row` from `provider`.
///
/// # Errors
///
/// Propagates read failures from the provider.
pub fn build_row(
    structure: &Structure,
    provider: &dyn DataProvider,
    row: u64,
    format: &RowFormat,
) -> Result<RowData, InputError> {
    let bytes_per_row = structure.bytes_per_row();
    let data_offset = structure.row_start(row);
    let byte_count = structure
        .data_size()
        .saturating_sub(data_offset)
        .min(bytes_per_row as u64) as usize;

    let lookahead = format.max_bytes_per_char.saturating_sub(1);
    let bytes = if byte_count > 0 {
        provider.read(data_offset, bytes_per_row + lookahead)?
    } else {
        Vec::new()
    };
    let byte_count = byte_count.min(bytes.len());

    let mut position_chars = vec![' '; format.row_position_length];
    long_to_base_code(
        &mut position_chars,
        data_offset,
        POSITION_BASE,
        format.row_position_length,
        true,
        format.row_position_case,
    );

    let mut code_chars = vec![' '; structure.characters_per_code_section()];
    if structure.view_mode().has_code() {
        let digits = structure.max_digits_for_byte();
        for (index, &byte) in bytes.iter().take(byte_count).enumerate() {
            let start = structure.first_code_char_pos(index);
            byte_to_chars_code(
                byte,
                structure.code_type(),
                &mut code_chars[start..start + digits],
                format.code_case,
            );
        }
    }

    let mut preview_chars = Vec::new();
    if structure.view_mode().has_preview() {
        preview_chars = vec![' '; bytes_per_row];
        decode_preview(
            &bytes,
            byte_count,
            data_offset,
            format.encoding,
            &mut preview_chars,
        );
    }

    Ok(RowData {
        row,
        data_offset,
        position_chars,
        code_chars,
        preview_chars,
        byte_count,
    })
}

/// Decode every row in `rows`.
///
/// # Errors
///
/// Propagates the first read failure.
pub fn build_rows(
    structure: &Structure,
    provider: &dyn DataProvider,
    rows: Range<u64>,
    format: &RowFormat,
) -> Result<Vec<RowData>, InputError> {
    rows.map(|row| build_row(structure, provider, row, format)).collect()
}

/// Column header: each byte's offset within the row in hexadecimal, right
/// aligned under its code digits and repeated (last digit only) over the
/// preview.
pub fn column_header(structure: &Structure, case: CodeCharactersCase) -> Vec<char> {
    let mut header = vec![' '; structure.characters_per_row()];
    let digits = structure.max_digits_for_byte();
    let mut number = [' '; 2];

    for byte in 0..structure.bytes_per_row() {
        if structure.view_mode().has_code() {
            let start = structure.first_code_char_pos(byte);
            let width = digits.min(2);
            long_to_base_code(&mut number, byte as u64, POSITION_BASE, width, true, case);
            let end = start + digits;
            header[end - width..end].copy_from_slice(&number[..width]);
        }
        if let Some(preview) = structure.preview_char_pos() {
            long_to_base_code(&mut number, byte as u64, POSITION_BASE, 1, true, case);
            header[preview + byte] = number[0];
        }
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeType, ViewMode};
    use crate::source::MemoryData;
    use crate::view_state::structure::StructureConfig;

    fn structure(view_mode: ViewMode, code_type: CodeType, bpr: usize, size: u64) -> Structure {
        let config = StructureConfig {
            view_mode,
            code_type,
            bytes_per_row: bpr,
            ..StructureConfig::default()
        };
        Structure::update_cache(&config, size, 0).unwrap()
    }

    #[test]
    fn full_row_in_dual_hex() {
        let data = MemoryData::new(b"Hex!\x00\xAB".to_vec());
        let structure = structure(ViewMode::Dual, CodeType::Hexadecimal, 4, data.size());
        let row = build_row(&structure, &data, 0, &RowFormat::default()).unwrap();
        assert_eq!(row.position(), "00000000");
        assert_eq!(row.line(), "48 65 78 21 Hex!");
        assert_eq!(row.byte_count, 4);
    }

    #[test]
    fn last_row_is_padded() {
        let data = MemoryData::new(b"Hex!\x00\xAB".to_vec());
        let structure = structure(ViewMode::Dual, CodeType::Hexadecimal, 4, data.size());
        let format = RowFormat {
            code_case: CodeCharactersCase::Lower,
            ..RowFormat::default()
        };
        let row = build_row(&structure, &data, 1, &format).unwrap();
        assert_eq!(row.position(), "00000004");
        assert_eq!(row.line(), "00 ab       .\u{ab}  ");
        assert_eq!(row.byte_count, 2);
    }

    #[test]
    fn caret_row_past_end_is_blank() {
        let data = MemoryData::new(vec![1u8; 8]);
        let structure = structure(ViewMode::CodeMatrix, CodeType::Binary, 4, data.size());
        let row = build_row(&structure, &data, 2, &RowFormat::default()).unwrap();
        assert_eq!(row.byte_count, 0);
        assert!(row.line().chars().all(|c| c == ' '));
        assert!(row.preview_chars.is_empty());
    }

    #[test]
    fn utf8_lookahead_completes_character_at_row_end() {
        let data = MemoryData::new("abc\u{e9}".as_bytes().to_vec());
        let structure = structure(ViewMode::TextPreview, CodeType::Hexadecimal, 4, data.size());
        let format = RowFormat {
            encoding: TextEncoding::Utf8,
            max_bytes_per_char: 4,
            ..RowFormat::default()
        };
        let row = build_row(&structure, &data, 0, &format).unwrap();
        assert_eq!(row.line(), "abc\u{e9}");
    }

    #[test]
    fn gutter_width_follows_data_size() {
        assert_eq!(row_position_length(0, 0, 0), 1);
        assert_eq!(row_position_length(0xFFFF, 0, 0), 4);
        assert_eq!(row_position_length(0x10000, 0, 0), 5);
        assert_eq!(row_position_length(0x10, 8, 0), 8);
        assert_eq!(row_position_length(u64::MAX, 0, 12), 12);
    }

    #[test]
    fn header_numbers_columns() {
        let structure = structure(ViewMode::Dual, CodeType::Hexadecimal, 4, 100);
        let header: String = column_header(&structure, CodeCharactersCase::Upper)
            .into_iter()
            .collect();
        assert_eq!(header, "00 01 02 03 0123");
    }

    #[test]
    fn header_pads_wide_codes() {
        let structure = structure(ViewMode::CodeMatrix, CodeType::Decimal, 2, 100);
        let header: String = column_header(&structure, CodeCharactersCase::Upper)
            .into_iter()
            .collect();
        assert_eq!(header, " 00  01");
    }
}
