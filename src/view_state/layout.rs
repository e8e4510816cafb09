//! Borrowed view over the derived layout for pixel queries.
//!
//! Rows and columns are converted to component pixels relative to the
//! current scroll position. Results that fall outside `i32` saturate; the
//! caller clips against the data view.

use std::ops::Range;

use super::caret::CaretPosition;
use super::dimensions::{Dimensions, PixelRect};
use super::metrics::Metrics;
use super::scroll::ScrollPosition;
use super::structure::Structure;
use crate::model::{EditOperation, Section};

/// Width of the insert-mode caret bar in pixels.
pub const INSERT_CARET_WIDTH: i32 = 2;

/// Snapshot of everything needed to map document cells to pixels.
#[derive(Debug, Clone, Copy)]
pub struct LayoutSnapshot<'a> {
    /// Cell geometry.
    pub metrics: &'a Metrics,
    /// Document shape.
    pub structure: &'a Structure,
    /// Component geometry.
    pub dimensions: &'a Dimensions,
    /// Current scroll position.
    pub scroll: ScrollPosition,
}

impl LayoutSnapshot<'_> {
    /// Rows intersecting the data view, clamped to the document.
    pub fn visible_rows(&self) -> Range<u64> {
        let row_height = self.metrics.row_height();
        if !self.metrics.is_initialized() || self.dimensions.data_view().is_empty() {
            return self.scroll.row_position..self.scroll.row_position;
        }
        let top = self.scroll.vertical_pixels(row_height);
        let bottom = top + self.dimensions.data_view().height as u128;
        let end = bottom
            .div_ceil(row_height as u128)
            .min(self.structure.rows_per_document() as u128) as u64;
        self.scroll.row_position..end.max(self.scroll.row_position)
    }

    /// Top edge of `row` in component pixels.
    pub fn row_top(&self, row: u64) -> i32 {
        let row_height = self.metrics.row_height() as i128;
        let scrolled = self.scroll.vertical_pixels(self.metrics.row_height()) as i128;
        let top = self.dimensions.data_view().y as i128;
        saturate(top + row as i128 * row_height - scrolled)
    }

    /// Left edge of row column `column` in component pixels.
    pub fn column_left(&self, column: usize) -> i32 {
        let character_width = self.metrics.character_width() as i128;
        let scrolled = self.scroll.horizontal_pixels(self.metrics.character_width()) as i128;
        let left = self.dimensions.data_view().x as i128;
        saturate(left + column as i128 * character_width - scrolled)
    }

    /// Rectangle covering `cells` columns starting at `column` on `row`.
    pub fn cell_rect(&self, row: u64, column: usize, cells: usize) -> PixelRect {
        let width = (cells as i64 * self.metrics.character_width() as i64).min(i32::MAX as i64);
        PixelRect::new(
            self.column_left(column),
            self.row_top(row),
            width as i32,
            self.metrics.row_height(),
        )
    }

    /// `rect` clipped to the data view, `None` when nothing remains.
    pub fn clip(&self, rect: PixelRect) -> Option<PixelRect> {
        let clipped = rect.intersect(&self.dimensions.data_view());
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Pixel rectangle of the caret, clipped to the data view.
    ///
    /// Insert mode draws a narrow bar at the left of the cell; overwrite
    /// mode covers the whole cell.
    pub fn caret_rect(
        &self,
        position: CaretPosition,
        edit_operation: EditOperation,
    ) -> Option<PixelRect> {
        if !self.metrics.is_initialized() {
            return None;
        }
        let structure = self.structure;
        let row = structure.row_of(position.data_position);
        let byte = structure.byte_on_row(position.data_position);
        let column = structure.char_pos_for(byte, position.code_offset, position.section)?;
        let mut rect = self.cell_rect(row, column, 1);
        if edit_operation == EditOperation::Insert {
            rect.width = INSERT_CARET_WIDTH.min(self.metrics.character_width());
        }
        self.clip(rect)
    }

    /// Outline of the byte under the caret in the other section, when both
    /// sections are shown.
    pub fn mirror_caret_rect(&self, position: CaretPosition) -> Option<PixelRect> {
        if !self.metrics.is_initialized() {
            return None;
        }
        let structure = self.structure;
        let other = position.section.toggled();
        if !structure.view_mode().shows(other) {
            return None;
        }
        let row = structure.row_of(position.data_position);
        let byte = structure.byte_on_row(position.data_position);
        let column = structure.char_pos_for(byte, 0, other)?;
        let cells = match other {
            Section::CodeMatrix => structure.max_digits_for_byte(),
            Section::TextPreview => 1,
        };
        self.clip(self.cell_rect(row, column, cells))
    }
}

fn saturate(value: i128) -> i32 {
    value.clamp(i32::MIN as i128, i32::MAX as i128) as i32
}
