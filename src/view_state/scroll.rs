//! Scroll position, scrolling steps and scrollbar mapping.
//!
//! Positions are kept as a whole-cell part plus a sub-cell pixel offset so
//! that documents of up to 2^63 rows can be addressed. Arithmetic that
//! combines the two is done in `u128` pixels.
//!
//! Host scrollbars only hold values up to [`NATIVE_SCROLL_MAX`]. When the
//! document's pixel height fits, the vertical scrollbar maps pixels 1:1
//! ([`ScrollBarVerticalScale::Normal`]). Otherwise the scrollbar value is
//! scaled onto the rows before the last page
//! ([`ScrollBarVerticalScale::Scaled`]).

use tracing::debug;

use super::dimensions::Dimensions;
use super::metrics::Metrics;
use super::structure::Structure;
use crate::model::{HorizontalScrollUnit, VerticalScrollUnit};

/// Largest value a host scrollbar can represent.
pub const NATIVE_SCROLL_MAX: u64 = i32::MAX as u64;

/// Top-left corner of the viewport in document coordinates.
///
/// # Invariants
/// - `row_offset` is in `[0, row_height)`.
/// - `char_offset` is in `[0, character_width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollPosition {
    /// First (possibly partially hidden) row.
    pub row_position: u64,
    /// Pixels of `row_position` scrolled above the view.
    pub row_offset: i32,
    /// First (possibly partially hidden) character column.
    pub char_position: usize,
    /// Pixels of `char_position` scrolled left of the view.
    pub char_offset: i32,
}

impl ScrollPosition {
    /// Create a position from its parts.
    pub fn new(row_position: u64, row_offset: i32, char_position: usize, char_offset: i32) -> Self {
        Self {
            row_position,
            row_offset,
            char_position,
            char_offset,
        }
    }

    /// Vertical scroll distance in pixels.
    pub fn vertical_pixels(&self, row_height: i32) -> u128 {
        self.row_position as u128 * row_height.max(0) as u128 + self.row_offset.max(0) as u128
    }

    /// Horizontal scroll distance in pixels.
    pub fn horizontal_pixels(&self, character_width: i32) -> u128 {
        self.char_position as u128 * character_width.max(0) as u128
            + self.char_offset.max(0) as u128
    }

    fn with_vertical_pixels(self, pixels: u128, row_height: i32) -> Self {
        if row_height <= 0 {
            return Self {
                row_position: 0,
                row_offset: 0,
                ..self
            };
        }
        let row_height = row_height as u128;
        Self {
            row_position: u64::try_from(pixels / row_height).unwrap_or(u64::MAX),
            row_offset: (pixels % row_height) as i32,
            ..self
        }
    }

    fn with_horizontal_pixels(self, pixels: u128, character_width: i32) -> Self {
        if character_width <= 0 {
            return Self {
                char_position: 0,
                char_offset: 0,
                ..self
            };
        }
        let character_width = character_width as u128;
        Self {
            char_position: usize::try_from(pixels / character_width).unwrap_or(usize::MAX),
            char_offset: (pixels % character_width) as i32,
            ..self
        }
    }
}

/// Discrete scrolling steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollingDirection {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One character left.
    Left,
    /// One character right.
    Right,
    /// One page up.
    PageUp,
    /// One page down.
    PageDown,
}

/// Scrollbar axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Rows.
    Vertical,
    /// Character columns.
    Horizontal,
}

/// How the vertical scrollbar value relates to the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBarVerticalScale {
    /// Scrollbar value is the vertical pixel position.
    #[default]
    Normal,
    /// Scrollbar value is scaled onto the rows before the last page.
    Scaled,
}

/// What a host scrollbar should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollBarState {
    /// Largest position value (position is in `[0, range]`).
    pub range: i32,
    /// Visible extent, in the same units as `position`.
    pub page: i32,
    /// Current value.
    pub position: i32,
}

/// Everything scrolling needs to know about the current layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollGeometry {
    /// Rows in the document.
    pub rows_per_document: u64,
    /// Fully visible rows.
    pub rows_per_page: usize,
    /// At least partially visible rows.
    pub rows_per_rect: usize,
    /// Character columns in a row.
    pub characters_per_row: usize,
    /// Fully visible character columns.
    pub characters_per_page: usize,
    /// Pixels below the last full row.
    pub last_row_offset: i32,
    /// Pixels right of the last full column.
    pub last_char_offset: i32,
    /// Row height.
    pub row_height: i32,
    /// Character width.
    pub character_width: i32,
    /// Data view width.
    pub view_width: i32,
    /// Data view height.
    pub view_height: i32,
}

impl ScrollGeometry {
    /// Gather scrolling inputs from the derived layout.
    pub fn new(metrics: &Metrics, structure: &Structure, dimensions: &Dimensions) -> Self {
        let data_view = dimensions.data_view();
        Self {
            rows_per_document: structure.rows_per_document(),
            rows_per_page: dimensions.rows_per_page(),
            rows_per_rect: dimensions.rows_per_rect(),
            characters_per_row: structure.characters_per_row(),
            characters_per_page: dimensions.characters_per_page(),
            last_row_offset: dimensions.last_row_offset(),
            last_char_offset: dimensions.last_char_offset(),
            row_height: metrics.row_height(),
            character_width: metrics.character_width(),
            view_width: data_view.width,
            view_height: data_view.height,
        }
    }

    /// Rows the scaled scrollbar spans: everything before the last page.
    pub fn rows_to_last_page(&self) -> u64 {
        self.rows_per_document.saturating_sub(self.rows_per_rect as u64)
    }

    fn document_height(&self) -> u128 {
        self.rows_per_document as u128 * self.row_height.max(0) as u128
    }
}

/// Scroll state of one viewport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scrolling {
    position: ScrollPosition,
    max_position: ScrollPosition,
    vertical_unit: VerticalScrollUnit,
    horizontal_unit: HorizontalScrollUnit,
    vertical_scale: ScrollBarVerticalScale,
}

impl Scrolling {
    /// Scrolling at the origin with the given units.
    pub fn new(vertical_unit: VerticalScrollUnit, horizontal_unit: HorizontalScrollUnit) -> Self {
        Self {
            vertical_unit,
            horizontal_unit,
            ..Self::default()
        }
    }

    /// Current position.
    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    /// Largest valid position for the last computed geometry.
    pub fn max_position(&self) -> ScrollPosition {
        self.max_position
    }

    /// Vertical scrollbar mapping mode.
    pub fn vertical_scale(&self) -> ScrollBarVerticalScale {
        self.vertical_scale
    }

    /// Vertical scroll granularity.
    pub fn vertical_unit(&self) -> VerticalScrollUnit {
        self.vertical_unit
    }

    /// Horizontal scroll granularity.
    pub fn horizontal_unit(&self) -> HorizontalScrollUnit {
        self.horizontal_unit
    }

    /// Change scroll units, snapping the position to the new granularity.
    pub fn set_units(
        &mut self,
        vertical_unit: VerticalScrollUnit,
        horizontal_unit: HorizontalScrollUnit,
        geometry: &ScrollGeometry,
    ) {
        self.vertical_unit = vertical_unit;
        self.horizontal_unit = horizontal_unit;
        self.update_maximum_scroll_position(geometry);
    }

    /// Recompute the maximum position and re-clamp the current one.
    ///
    /// Returns `true` when the current position had to move.
    pub fn update_maximum_scroll_position(&mut self, geometry: &ScrollGeometry) -> bool {
        let (row_position, row_offset) = max_axis(
            geometry.rows_per_document,
            geometry.rows_per_page as u64,
            geometry.last_row_offset,
            geometry.row_height,
            self.vertical_unit == VerticalScrollUnit::Pixel,
        );
        let (char_position, char_offset) = max_axis(
            geometry.characters_per_row as u64,
            geometry.characters_per_page as u64,
            geometry.last_char_offset,
            geometry.character_width,
            self.horizontal_unit == HorizontalScrollUnit::Pixel,
        );
        self.max_position = ScrollPosition::new(
            row_position,
            row_offset,
            usize::try_from(char_position).unwrap_or(usize::MAX),
            char_offset,
        );

        let scale = if geometry.document_height() > NATIVE_SCROLL_MAX as u128 {
            ScrollBarVerticalScale::Scaled
        } else {
            ScrollBarVerticalScale::Normal
        };
        if scale != self.vertical_scale {
            debug!(?scale, rows = geometry.rows_per_document, "vertical scrollbar scale changed");
            self.vertical_scale = scale;
        }

        let clamped = self.clamp(self.position, geometry);
        let moved = clamped != self.position;
        self.position = clamped;
        moved
    }

    /// Clamp `position` into `[0, max]` and snap it to the scroll units.
    pub fn clamp(&self, position: ScrollPosition, geometry: &ScrollGeometry) -> ScrollPosition {
        let row_height = geometry.row_height;
        let character_width = geometry.character_width;
        let vertical = position
            .vertical_pixels(row_height)
            .min(self.max_position.vertical_pixels(row_height));
        let horizontal = position
            .horizontal_pixels(character_width)
            .min(self.max_position.horizontal_pixels(character_width));

        let mut clamped = position
            .with_vertical_pixels(vertical, row_height)
            .with_horizontal_pixels(horizontal, character_width);
        if self.vertical_unit == VerticalScrollUnit::Row {
            clamped.row_offset = 0;
        }
        if self.horizontal_unit == HorizontalScrollUnit::Character {
            clamped.char_offset = 0;
        }
        clamped
    }

    /// Set the position, clamped. Returns `true` when it changed.
    pub fn set_position(&mut self, position: ScrollPosition, geometry: &ScrollGeometry) -> bool {
        let clamped = self.clamp(position, geometry);
        let changed = clamped != self.position;
        self.position = clamped;
        changed
    }

    /// Position after one discrete step in `direction`.
    pub fn compute_scrolling(
        &self,
        direction: ScrollingDirection,
        geometry: &ScrollGeometry,
    ) -> ScrollPosition {
        let row_height = geometry.row_height.max(0) as u128;
        let character_width = geometry.character_width.max(0) as u128;
        let page = geometry.rows_per_page.max(1) as u128 * row_height;

        let mut vertical = self.position.vertical_pixels(geometry.row_height);
        let mut horizontal = self.position.horizontal_pixels(geometry.character_width);
        match direction {
            ScrollingDirection::Up => vertical = vertical.saturating_sub(row_height),
            ScrollingDirection::Down => vertical = vertical.saturating_add(row_height),
            ScrollingDirection::PageUp => vertical = vertical.saturating_sub(page),
            ScrollingDirection::PageDown => vertical = vertical.saturating_add(page),
            ScrollingDirection::Left => horizontal = horizontal.saturating_sub(character_width),
            ScrollingDirection::Right => horizontal = horizontal.saturating_add(character_width),
        }

        let moved = self
            .position
            .with_vertical_pixels(vertical, geometry.row_height)
            .with_horizontal_pixels(horizontal, geometry.character_width);
        self.clamp(moved, geometry)
    }

    /// Smallest adjustment that makes the cell at (`target_row`,
    /// `target_char`) fully visible.
    ///
    /// Axes where the cell is already inside the view are left alone.
    /// Returns `None` when nothing needs to change.
    pub fn compute_reveal_scroll_position(
        &self,
        target_row: u64,
        target_char: usize,
        geometry: &ScrollGeometry,
    ) -> Option<ScrollPosition> {
        let row_height = geometry.row_height;
        let character_width = geometry.character_width;
        if row_height <= 0 || character_width <= 0 {
            return None;
        }

        let mut revealed = self.position;
        if let Some(pixels) = reveal_axis(
            self.position.vertical_pixels(row_height),
            target_row as u128 * row_height as u128,
            row_height as u128,
            geometry.view_height.max(0) as u128,
        ) {
            let pixels = match self.vertical_unit {
                VerticalScrollUnit::Pixel => pixels,
                VerticalScrollUnit::Row => round_up_to(pixels, row_height as u128),
            };
            revealed = revealed.with_vertical_pixels(pixels, row_height);
        }
        if let Some(pixels) = reveal_axis(
            self.position.horizontal_pixels(character_width),
            target_char as u128 * character_width as u128,
            character_width as u128,
            geometry.view_width.max(0) as u128,
        ) {
            let pixels = match self.horizontal_unit {
                HorizontalScrollUnit::Pixel => pixels,
                HorizontalScrollUnit::Character => round_up_to(pixels, character_width as u128),
            };
            revealed = revealed.with_horizontal_pixels(pixels, character_width);
        }

        let revealed = self.clamp(revealed, geometry);
        (revealed != self.position).then_some(revealed)
    }

    /// Position that puts the cell at (`target_row`, `target_char`) in the
    /// middle of the view, clamped.
    pub fn compute_center_on_scroll_position(
        &self,
        target_row: u64,
        target_char: usize,
        geometry: &ScrollGeometry,
    ) -> ScrollPosition {
        let row_height = geometry.row_height.max(0) as i128;
        let character_width = geometry.character_width.max(0) as i128;

        let vertical = target_row as i128 * row_height + row_height / 2
            - geometry.view_height.max(0) as i128 / 2;
        let horizontal = target_char as i128 * character_width + character_width / 2
            - geometry.view_width.max(0) as i128 / 2;

        let centered = self
            .position
            .with_vertical_pixels(vertical.max(0) as u128, geometry.row_height)
            .with_horizontal_pixels(horizontal.max(0) as u128, geometry.character_width);
        self.clamp(centered, geometry)
    }

    /// State for the host's vertical scrollbar.
    pub fn vertical_scrollbar(&self, geometry: &ScrollGeometry) -> ScrollBarState {
        match self.vertical_scale {
            ScrollBarVerticalScale::Normal => ScrollBarState {
                range: to_native(self.max_position.vertical_pixels(geometry.row_height)),
                page: geometry.view_height.max(0),
                position: to_native(self.position.vertical_pixels(geometry.row_height)),
            },
            ScrollBarVerticalScale::Scaled => {
                let height = geometry.document_height().max(1);
                let view = geometry.view_height.max(0) as u128;
                let page = view * NATIVE_SCROLL_MAX as u128 / height;
                ScrollBarState {
                    range: NATIVE_SCROLL_MAX as i32,
                    page: to_native(page.max(1)),
                    position: to_native(row_to_scaled_native(
                        self.position.row_position,
                        geometry.rows_to_last_page(),
                    ) as u128),
                }
            }
        }
    }

    /// State for the host's horizontal scrollbar.
    pub fn horizontal_scrollbar(&self, geometry: &ScrollGeometry) -> ScrollBarState {
        ScrollBarState {
            range: to_native(self.max_position.horizontal_pixels(geometry.character_width)),
            page: geometry.view_width.max(0),
            position: to_native(self.position.horizontal_pixels(geometry.character_width)),
        }
    }

    /// Apply a value reported by a host scrollbar. Returns `true` when the
    /// position changed.
    pub fn set_from_native(
        &mut self,
        axis: ScrollAxis,
        value: i32,
        geometry: &ScrollGeometry,
    ) -> bool {
        let value = value.max(0);
        let target = match axis {
            ScrollAxis::Horizontal => self
                .position
                .with_horizontal_pixels(value as u128, geometry.character_width),
            ScrollAxis::Vertical => match self.vertical_scale {
                ScrollBarVerticalScale::Normal => self
                    .position
                    .with_vertical_pixels(value as u128, geometry.row_height),
                ScrollBarVerticalScale::Scaled => ScrollPosition {
                    row_position: scaled_native_to_row(value as u64, geometry.rows_to_last_page()),
                    row_offset: 0,
                    ..self.position
                },
            },
        };
        self.set_position(target, geometry)
    }
}

/// Map a scaled scrollbar value in `[0, NATIVE_SCROLL_MAX]` to a row in
/// `[0, rows_to_last_page]`.
///
/// Both endpoints map exactly and no intermediate product overflows `u64`.
pub fn scaled_native_to_row(value: u64, rows_to_last_page: u64) -> u64 {
    let value = value.min(NATIVE_SCROLL_MAX);
    if value > 0 && rows_to_last_page > NATIVE_SCROLL_MAX / value {
        value * (rows_to_last_page / NATIVE_SCROLL_MAX)
            + (value * (rows_to_last_page % NATIVE_SCROLL_MAX)) / NATIVE_SCROLL_MAX
    } else {
        (value * rows_to_last_page) / NATIVE_SCROLL_MAX
    }
}

/// Map a row to a scaled scrollbar value; the inverse of
/// [`scaled_native_to_row`] at both endpoints.
pub fn row_to_scaled_native(row: u64, rows_to_last_page: u64) -> u64 {
    if rows_to_last_page == 0 {
        return 0;
    }
    let row = row.min(rows_to_last_page) as u128;
    (row * NATIVE_SCROLL_MAX as u128 / rows_to_last_page as u128) as u64
}

/// Largest scroll along one axis as (cells, sub-cell pixels).
///
/// In pixel units this puts the last cell flush with the far edge of the
/// view; in cell units the last cell is the last fully visible one.
fn max_axis(
    cells: u64,
    page: u64,
    last_offset: i32,
    cell_size: i32,
    pixel_unit: bool,
) -> (u64, i32) {
    if cell_size <= 0 || cells <= page {
        return (0, 0);
    }
    if pixel_unit && last_offset > 0 {
        (cells - page - 1, cell_size - last_offset)
    } else {
        (cells - page, 0)
    }
}

fn reveal_axis(scroll: u128, start: u128, cell: u128, view: u128) -> Option<u128> {
    let end = start + cell;
    if start < scroll || cell > view {
        (start != scroll).then_some(start)
    } else if end > scroll + view {
        Some(end - view)
    } else {
        None
    }
}

fn round_up_to(pixels: u128, cell: u128) -> u128 {
    pixels.div_ceil(cell) * cell
}

fn to_native(value: u128) -> i32 {
    value.min(NATIVE_SCROLL_MAX as u128) as i32
}

#[cfg(test)]
#[path = "scroll_tests.rs"]
mod tests;
