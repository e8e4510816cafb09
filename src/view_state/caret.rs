//! Caret position, movement and blinking.

use tracing::trace;

use super::structure::Structure;
use crate::model::Section;

/// Blink period used when none is configured.
pub const DEFAULT_BLINK_RATE_MS: u64 = 450;

/// Where the caret is.
///
/// # Invariants (after [`CaretPosition::clamped`])
/// - `data_position` is in `[0, data_size]`.
/// - `code_offset` is in `[0, digits - 1]` in the code matrix and 0 in the
///   text preview or at end of data.
/// - `section` is shown by the current view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CaretPosition {
    /// Byte offset in the document.
    pub data_position: u64,
    /// Digit within the byte's code.
    pub code_offset: usize,
    /// Section the caret is in.
    pub section: Section,
}

impl CaretPosition {
    /// Create a position from its parts.
    pub fn new(data_position: u64, code_offset: usize, section: Section) -> Self {
        Self {
            data_position,
            code_offset,
            section,
        }
    }

    /// Clamp into the valid domain for `structure`.
    pub fn clamped(self, structure: &Structure) -> Self {
        let data_position = self.data_position.min(structure.data_size());
        let section = if structure.view_mode().shows(self.section) {
            self.section
        } else {
            structure.view_mode().default_section()
        };
        let code_offset =
            if section == Section::TextPreview || data_position == structure.data_size() {
                0
            } else {
                self.code_offset.min(structure.max_digits_for_byte() - 1)
            };
        Self {
            data_position,
            code_offset,
            section,
        }
    }
}

/// Caret movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementDirection {
    /// Previous digit, or previous byte.
    Left,
    /// Next digit, or next byte.
    Right,
    /// Same column, previous row.
    Up,
    /// Same column, next row.
    Down,
    /// First byte of the row.
    RowStart,
    /// Last byte of the row.
    RowEnd,
    /// One page up.
    PageUp,
    /// One page down.
    PageDown,
    /// Start of the document.
    DocStart,
    /// End of the document.
    DocEnd,
    /// Toggle between code matrix and text preview.
    SwitchSection,
}

/// What to do with a pointer position outside the data view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PositionOverflowMode {
    /// Clamp into the data view (drag selection past the edge).
    #[default]
    Overflow,
    /// Ignore positions outside the data view.
    NoOverflow,
}

/// Caret state: position plus blink phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caret {
    position: CaretPosition,
    blink_rate_ms: u64,
    visible: bool,
    phase_ms: u64,
}

impl Default for Caret {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_RATE_MS)
    }
}

impl Caret {
    /// Caret at the document start; `blink_rate_ms == 0` disables blinking.
    pub fn new(blink_rate_ms: u64) -> Self {
        Self {
            position: CaretPosition::default(),
            blink_rate_ms,
            visible: true,
            phase_ms: 0,
        }
    }

    /// Current position.
    pub fn position(&self) -> CaretPosition {
        self.position
    }

    /// Set the position, clamped, and restart the blink phase.
    pub fn set_position(&mut self, position: CaretPosition, structure: &Structure) {
        self.position = position.clamped(structure);
        self.reset_blink();
    }

    /// Re-clamp after the structure changed. Returns `true` when the
    /// position had to move.
    pub fn revalidate(&mut self, structure: &Structure) -> bool {
        let clamped = self.position.clamped(structure);
        if clamped == self.position {
            return false;
        }
        trace!(
            from = self.position.data_position,
            to = clamped.data_position,
            "caret clamped to document"
        );
        self.position = clamped;
        true
    }

    /// Position after moving in `direction`, clamped.
    pub fn compute_move_position(
        &self,
        direction: MovementDirection,
        structure: &Structure,
        rows_per_page: usize,
    ) -> CaretPosition {
        compute_move_position(self.position, direction, structure, rows_per_page)
    }

    /// Whether the caret is drawn in the current blink phase.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Blink period in milliseconds (0 = steady).
    pub fn blink_rate_ms(&self) -> u64 {
        self.blink_rate_ms
    }

    /// Change the blink period; 0 stops blinking with the caret shown.
    pub fn set_blink_rate(&mut self, blink_rate_ms: u64) {
        self.blink_rate_ms = blink_rate_ms;
        self.reset_blink();
    }

    /// Make the caret visible and restart the blink period.
    pub fn reset_blink(&mut self) {
        self.visible = true;
        self.phase_ms = 0;
    }

    /// Advance the blink clock. Returns `true` when visibility flipped.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        if self.blink_rate_ms == 0 {
            let changed = !self.visible;
            self.visible = true;
            return changed;
        }
        let total = self.phase_ms.saturating_add(elapsed_ms);
        let flips = total / self.blink_rate_ms;
        self.phase_ms = total % self.blink_rate_ms;
        if flips % 2 == 1 {
            self.visible = !self.visible;
            true
        } else {
            false
        }
    }
}

/// Apply one movement to `position` within `structure`.
pub fn compute_move_position(
    position: CaretPosition,
    direction: MovementDirection,
    structure: &Structure,
    rows_per_page: usize,
) -> CaretPosition {
    let position = position.clamped(structure);
    let data_size = structure.data_size();
    let bytes_per_row = structure.bytes_per_row() as u64;
    let last_digit = structure.max_digits_for_byte() - 1;
    let in_code = position.section == Section::CodeMatrix;
    let mut moved = position;

    match direction {
        MovementDirection::Left => {
            if in_code && position.code_offset > 0 {
                moved.code_offset -= 1;
            } else if position.data_position > 0 {
                moved.data_position -= 1;
                moved.code_offset = if in_code { last_digit } else { 0 };
            }
        }
        MovementDirection::Right => {
            if in_code && position.code_offset < last_digit && position.data_position < data_size
            {
                moved.code_offset += 1;
            } else if position.data_position < data_size {
                moved.data_position += 1;
                moved.code_offset = 0;
            }
        }
        MovementDirection::Up => {
            if position.data_position >= bytes_per_row {
                moved.data_position -= bytes_per_row;
            }
        }
        MovementDirection::Down => {
            moved.data_position = position
                .data_position
                .saturating_add(bytes_per_row)
                .min(data_size);
        }
        MovementDirection::RowStart => {
            moved.data_position = position.data_position - position.data_position % bytes_per_row;
            moved.code_offset = 0;
        }
        MovementDirection::RowEnd => {
            let row_start = position.data_position - position.data_position % bytes_per_row;
            moved.data_position = (row_start + bytes_per_row - 1).min(data_size);
            moved.code_offset = if in_code { last_digit } else { 0 };
        }
        MovementDirection::PageUp => {
            let step = page_step(bytes_per_row, rows_per_page);
            moved.data_position = if position.data_position < step {
                position.data_position % bytes_per_row
            } else {
                position.data_position - step
            };
        }
        MovementDirection::PageDown => {
            let step = page_step(bytes_per_row, rows_per_page);
            moved.data_position = position.data_position.saturating_add(step).min(data_size);
        }
        MovementDirection::DocStart => {
            moved.data_position = 0;
            moved.code_offset = 0;
        }
        MovementDirection::DocEnd => {
            moved.data_position = data_size;
            moved.code_offset = 0;
        }
        MovementDirection::SwitchSection => {
            if structure.view_mode().shows(position.section.toggled()) {
                moved.section = position.section.toggled();
                moved.code_offset = 0;
            }
        }
    }

    moved.clamped(structure)
}

fn page_step(bytes_per_row: u64, rows_per_page: usize) -> u64 {
    bytes_per_row.saturating_mul(rows_per_page.max(1) as u64)
}

#[cfg(test)]
#[path = "caret_tests.rs"]
mod tests;
