//! Visible column ranges per section.
//!
//! A renderer may skip every column outside these ranges without any
//! visible difference.

use std::ops::Range;

use super::dimensions::Dimensions;
use super::metrics::Metrics;
use super::scroll::ScrollPosition;
use super::structure::Structure;

/// Columns and bytes of each section intersecting the data view.
///
/// Column ranges are relative to the start of their section; byte ranges
/// are offsets within a row. All ranges are half-open and empty when the
/// section is hidden, scrolled out of view, or metrics are uninitialized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Visibility {
    code_columns: Range<usize>,
    preview_columns: Range<usize>,
    code_bytes: Range<usize>,
    preview_bytes: Range<usize>,
}

impl Visibility {
    /// Compute visible ranges for the given scroll position.
    pub fn recompute(
        metrics: &Metrics,
        structure: &Structure,
        dimensions: &Dimensions,
        position: &ScrollPosition,
    ) -> Self {
        if !metrics.is_initialized() {
            return Self::default();
        }

        let character_width = metrics.character_width() as u128;
        let scrolled = position.horizontal_pixels(metrics.character_width());
        let view_end = scrolled + dimensions.data_view().width.max(0) as u128;
        let first = (scrolled / character_width).min(usize::MAX as u128) as usize;
        let end = view_end
            .div_ceil(character_width)
            .min(structure.characters_per_row() as u128) as usize;

        let mut visibility = Self::default();

        if structure.view_mode().has_code() {
            let section = structure.characters_per_code_section();
            let columns = clip(first, end, 0, section);
            if !columns.is_empty() {
                visibility.code_bytes = structure.position_byte(columns.start)
                    ..structure.position_byte(columns.end - 1) + 1;
            }
            visibility.code_columns = columns;
        }

        if let Some(preview_start) = structure.preview_char_pos() {
            let columns = clip(first, end, preview_start, structure.bytes_per_row());
            visibility.preview_bytes = columns.clone();
            visibility.preview_columns = columns;
        }

        visibility
    }

    /// Visible code-section columns.
    pub fn code_columns(&self) -> Range<usize> {
        self.code_columns.clone()
    }

    /// Visible preview-section columns.
    pub fn preview_columns(&self) -> Range<usize> {
        self.preview_columns.clone()
    }

    /// Bytes on a row with at least one visible code digit.
    pub fn code_bytes(&self) -> Range<usize> {
        self.code_bytes.clone()
    }

    /// Bytes on a row with a visible preview cell.
    pub fn preview_bytes(&self) -> Range<usize> {
        self.preview_bytes.clone()
    }

    /// Whether any code column is visible.
    pub fn is_code_visible(&self) -> bool {
        !self.code_columns.is_empty()
    }

    /// Whether any preview column is visible.
    pub fn is_preview_visible(&self) -> bool {
        !self.preview_columns.is_empty()
    }

    /// Union of the visible byte ranges of both sections.
    pub fn visible_bytes(&self) -> Range<usize> {
        match (self.code_bytes.is_empty(), self.preview_bytes.is_empty()) {
            (true, true) => 0..0,
            (false, true) => self.code_bytes(),
            (true, false) => self.preview_bytes(),
            (false, false) => {
                self.code_bytes.start.min(self.preview_bytes.start)
                    ..self.code_bytes.end.max(self.preview_bytes.end)
            }
        }
    }
}

/// Intersect row columns `[first, end)` with a section starting at
/// `section_start` that is `section_len` columns long, relative to the section.
fn clip(first: usize, end: usize, section_start: usize, section_len: usize) -> Range<usize> {
    let start = first.saturating_sub(section_start).min(section_len);
    let stop = end.saturating_sub(section_start).min(section_len);
    start..stop.max(start)
}
