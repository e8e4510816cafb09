//! Document shape: bytes per row and column positions within a row.
//!
//! A row is laid out as
//!
//! ```text
//! [code section: byte0 digits, sep, byte1 digits, sep, ...][sep][preview: one cell per byte]
//! ```
//!
//! Each byte in the code section takes `digits + 1` columns (its digits plus
//! one separator column), except that the separator after the last byte is
//! not part of the section.

use crate::model::{CodeType, LayoutError, RowWrapping, Section, ViewMode};

/// Bytes per row used when nothing else is configured.
pub const DEFAULT_BYTES_PER_ROW: usize = 16;

/// Largest accepted `bytes_per_row` and `max_bytes_per_row`.
///
/// Keeps every column index and row buffer small; a binary row at this
/// width is still under 40k columns.
pub const MAX_BYTES_PER_ROW: usize = 4096;

/// Host-issued settings that shape the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureConfig {
    /// Sections shown.
    pub view_mode: ViewMode,
    /// Numeric base of the code matrix.
    pub code_type: CodeType,
    /// Fixed or width-derived bytes per row.
    pub row_wrapping: RowWrapping,
    /// Bytes per row when not wrapping.
    pub bytes_per_row: usize,
    /// Upper bound on derived bytes per row when wrapping (0 = no bound).
    pub max_bytes_per_row: usize,
    /// Derived bytes per row is rounded down to a multiple of this (<=1 = no rounding).
    pub wrapping_bytes_group_size: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            code_type: CodeType::default(),
            row_wrapping: RowWrapping::default(),
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
            max_bytes_per_row: 0,
            wrapping_bytes_group_size: 0,
        }
    }
}

impl StructureConfig {
    /// Reject settings that would corrupt derived state.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.row_wrapping == RowWrapping::NoWrapping && self.bytes_per_row < 1 {
            return Err(LayoutError::invalid(
                "bytes_per_row",
                format!("must be at least 1, got {}", self.bytes_per_row),
            ));
        }
        if self.bytes_per_row > MAX_BYTES_PER_ROW {
            return Err(LayoutError::invalid(
                "bytes_per_row",
                format!("must be at most {MAX_BYTES_PER_ROW}, got {}", self.bytes_per_row),
            ));
        }
        if self.max_bytes_per_row > MAX_BYTES_PER_ROW {
            return Err(LayoutError::invalid(
                "max_bytes_per_row",
                format!(
                    "must be at most {MAX_BYTES_PER_ROW}, got {}",
                    self.max_bytes_per_row
                ),
            ));
        }
        Ok(())
    }
}

/// Derived document shape. Replaced wholesale on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Structure {
    data_size: u64,
    view_mode: ViewMode,
    code_type: CodeType,
    bytes_per_row: usize,
    rows_per_document: u64,
    characters_per_row: usize,
}

impl Default for Structure {
    fn default() -> Self {
        Self::from_parts(0, ViewMode::default(), CodeType::default(), DEFAULT_BYTES_PER_ROW)
    }
}

impl Structure {
    /// Recompute the structure for `data_size` bytes.
    ///
    /// `available_characters` is the number of whole character columns in
    /// the data view; it is only consulted when row wrapping is enabled.
    ///
    /// # Errors
    /// [`LayoutError::InvalidConfiguration`] when `bytes_per_row < 1` in
    /// non-wrapping mode.
    pub fn update_cache(
        config: &StructureConfig,
        data_size: u64,
        available_characters: usize,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        let bytes_per_row = match config.row_wrapping {
            RowWrapping::NoWrapping => config.bytes_per_row,
            RowWrapping::Wrapping => wrapped_bytes_per_row(config, available_characters),
        };
        Ok(Self::from_parts(
            data_size,
            config.view_mode,
            config.code_type,
            bytes_per_row,
        ))
    }

    fn from_parts(
        data_size: u64,
        view_mode: ViewMode,
        code_type: CodeType,
        bytes_per_row: usize,
    ) -> Self {
        let mut structure = Self {
            data_size,
            view_mode,
            code_type,
            bytes_per_row: bytes_per_row.max(1),
            rows_per_document: 0,
            characters_per_row: 0,
        };
        structure.rows_per_document =
            (data_size / structure.bytes_per_row as u64).saturating_add(1);
        structure.characters_per_row = structure.compute_characters_per_row();
        structure
    }

    fn compute_characters_per_row(&self) -> usize {
        let mut characters = 0;
        if self.view_mode.has_code() {
            characters += self.characters_per_code_section();
        }
        if self.view_mode.has_preview() {
            characters += self.bytes_per_row;
        }
        if self.view_mode == ViewMode::Dual {
            characters += 1;
        }
        characters
    }

    /// Document length in bytes.
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Sections shown.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Numeric code type.
    pub fn code_type(&self) -> CodeType {
        self.code_type
    }

    /// Bytes on each row (always >= 1).
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Number of rows, including the row that hosts the end-of-data caret.
    pub fn rows_per_document(&self) -> u64 {
        self.rows_per_document
    }

    /// Total character columns in a row across all shown sections.
    pub fn characters_per_row(&self) -> usize {
        self.characters_per_row
    }

    /// Digits per byte in the code matrix.
    pub fn max_digits_for_byte(&self) -> usize {
        self.code_type.max_digits_for_byte()
    }

    /// Columns in the code section (0 when not shown).
    pub fn characters_per_code_section(&self) -> usize {
        if !self.view_mode.has_code() {
            return 0;
        }
        self.code_last_char_pos(self.bytes_per_row - 1) + 1
    }

    /// First column of the digits for `byte_offset` within the row.
    pub fn first_code_char_pos(&self, byte_offset: usize) -> usize {
        byte_offset * (self.max_digits_for_byte() + 1)
    }

    /// Last column of the digits for `byte_offset` within the row.
    pub fn code_last_char_pos(&self, byte_offset: usize) -> usize {
        self.first_code_char_pos(byte_offset + 1) - 2
    }

    /// Byte on the row whose code digits cover `char_pos`, clamped to the row.
    ///
    /// A separator column belongs to the byte before it.
    pub fn position_byte(&self, char_pos: usize) -> usize {
        (char_pos / (self.max_digits_for_byte() + 1)).min(self.bytes_per_row - 1)
    }

    /// First column of the preview section, `None` when it is not shown.
    pub fn preview_char_pos(&self) -> Option<usize> {
        match self.view_mode {
            ViewMode::Dual => Some(self.characters_per_code_section() + 1),
            ViewMode::TextPreview => Some(0),
            ViewMode::CodeMatrix => None,
        }
    }

    /// Byte on the row under preview column `char_pos`, clamped to the row.
    ///
    /// `None` when the preview is hidden or `char_pos` lies before it.
    pub fn preview_byte_for_char(&self, char_pos: usize) -> Option<usize> {
        let start = self.preview_char_pos()?;
        let offset = char_pos.checked_sub(start)?;
        Some(offset.min(self.bytes_per_row - 1))
    }

    /// Row index holding `data_position`.
    pub fn row_of(&self, data_position: u64) -> u64 {
        data_position / self.bytes_per_row as u64
    }

    /// Offset of `data_position` within its row.
    pub fn byte_on_row(&self, data_position: u64) -> usize {
        (data_position % self.bytes_per_row as u64) as usize
    }

    /// Document offset of the first byte on `row`, saturating.
    pub fn row_start(&self, row: u64) -> u64 {
        row.saturating_mul(self.bytes_per_row as u64)
    }

    /// Column within the row for a caret on `byte_on_row`.
    ///
    /// Returns `None` when `section` is not shown.
    pub fn char_pos_for(&self, byte_on_row: usize, code_offset: usize, section: Section) -> Option<usize> {
        match section {
            Section::CodeMatrix if self.view_mode.has_code() => {
                Some(self.first_code_char_pos(byte_on_row) + code_offset)
            }
            Section::TextPreview => self.preview_char_pos().map(|start| start + byte_on_row),
            Section::CodeMatrix => None,
        }
    }
}

fn wrapped_bytes_per_row(config: &StructureConfig, available_characters: usize) -> usize {
    let mut characters_per_byte = 0;
    if config.view_mode.has_code() {
        characters_per_byte += config.code_type.max_digits_for_byte() + 1;
    }
    if config.view_mode.has_preview() {
        characters_per_byte += 1;
    }

    let mut bytes_per_row = (available_characters / characters_per_byte).min(MAX_BYTES_PER_ROW);
    if config.max_bytes_per_row > 0 {
        bytes_per_row = bytes_per_row.min(config.max_bytes_per_row);
    }
    let group = config.wrapping_bytes_group_size;
    if group > 1 && bytes_per_row >= group {
        bytes_per_row -= bytes_per_row % group;
    }
    bytes_per_row.max(1)
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
