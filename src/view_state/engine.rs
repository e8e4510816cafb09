//! The layout engine: single owner of all derived view state.
//!
//! Hosts push events in (resize, font change, scrollbar value, caret
//! movement, blink tick) and pull geometry out. Every recomputation runs in
//! the same order:
//!
//! 1. metrics (font and encoding)
//! 2. structure and dimensions together, because row wrapping and
//!    scrollbar visibility depend on each other
//! 3. scroll maximum, then caret and selection clamping
//! 4. visibility
//!
//! Configuration changes are validated and fully resolved before any field
//! is replaced, so a rejected change leaves the engine untouched.

use std::ops::Range;

use tracing::{debug, warn};

use super::caret::{
    Caret, CaretPosition, MovementDirection, PositionOverflowMode, DEFAULT_BLINK_RATE_MS,
};
use super::dimensions::{ComponentSize, Dimensions, PixelRect, Zone};
use super::hit_test::mouse_position_to_caret;
use super::layout::LayoutSnapshot;
use super::metrics::{FontMetrics, Metrics};
use super::row_data::{build_rows, column_header, row_position_length, RowData, RowFormat};
use super::scroll::{
    ScrollAxis, ScrollBarState, ScrollBarVerticalScale, ScrollGeometry, ScrollPosition, Scrolling,
    ScrollingDirection,
};
use super::selection::{selection_rects, Selection};
use super::structure::{Structure, StructureConfig};
use super::visibility::Visibility;
use crate::model::error::InputError;
use crate::model::{
    CodeCharactersCase, CodeType, EditOperation, HorizontalScrollUnit, LayoutError, RowWrapping,
    ScrollBarVisibility, TextEncoding, VerticalScrollUnit, ViewMode,
};
use crate::source::DataProvider;

/// Gutter digits used when nothing else is configured.
pub const DEFAULT_MIN_ROW_POSITION_LENGTH: usize = 8;

/// Hex digits of the largest `u64` offset; longer gutters are rejected.
pub const MAX_ROW_POSITION_LENGTH: usize = 16;

/// Host-issued settings for the whole engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Document shape settings.
    pub structure: StructureConfig,
    /// Case of code digits.
    pub code_case: CodeCharactersCase,
    /// Case of row positions in the gutter.
    pub row_position_case: CodeCharactersCase,
    /// Minimum gutter digits.
    pub min_row_position_length: usize,
    /// Maximum gutter digits (0 = no limit).
    pub max_row_position_length: usize,
    /// Preview encoding.
    pub encoding: TextEncoding,
    /// Caret blink period (0 = steady).
    pub blink_rate_ms: u64,
    /// Vertical scroll granularity.
    pub vertical_scroll_unit: VerticalScrollUnit,
    /// Horizontal scroll granularity.
    pub horizontal_scroll_unit: HorizontalScrollUnit,
    /// Vertical scrollbar policy.
    pub vertical_scrollbar: ScrollBarVisibility,
    /// Horizontal scrollbar policy.
    pub horizontal_scrollbar: ScrollBarVisibility,
    /// Width of the vertical scrollbar when shown, in pixels.
    pub vertical_scrollbar_size: i32,
    /// Height of the horizontal scrollbar when shown, in pixels.
    pub horizontal_scrollbar_size: i32,
    /// Caret shape.
    pub edit_operation: EditOperation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            structure: StructureConfig::default(),
            code_case: CodeCharactersCase::default(),
            row_position_case: CodeCharactersCase::default(),
            min_row_position_length: DEFAULT_MIN_ROW_POSITION_LENGTH,
            max_row_position_length: 0,
            encoding: TextEncoding::default(),
            blink_rate_ms: DEFAULT_BLINK_RATE_MS,
            vertical_scroll_unit: VerticalScrollUnit::default(),
            horizontal_scroll_unit: HorizontalScrollUnit::default(),
            vertical_scrollbar: ScrollBarVisibility::default(),
            horizontal_scrollbar: ScrollBarVisibility::default(),
            vertical_scrollbar_size: 1,
            horizontal_scrollbar_size: 1,
            edit_operation: EditOperation::default(),
        }
    }
}

impl EngineConfig {
    /// Reject settings that would corrupt derived state.
    ///
    /// # Errors
    /// [`LayoutError::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.structure.validate()?;
        if self.min_row_position_length > MAX_ROW_POSITION_LENGTH {
            return Err(LayoutError::invalid(
                "min_row_position_length",
                format!(
                    "must be at most {MAX_ROW_POSITION_LENGTH}, got {}",
                    self.min_row_position_length
                ),
            ));
        }
        if self.max_row_position_length > MAX_ROW_POSITION_LENGTH {
            return Err(LayoutError::invalid(
                "max_row_position_length",
                format!(
                    "must be at most {MAX_ROW_POSITION_LENGTH}, got {}",
                    self.max_row_position_length
                ),
            ));
        }
        if self.max_row_position_length > 0
            && self.min_row_position_length > self.max_row_position_length
        {
            return Err(LayoutError::invalid(
                "min_row_position_length",
                format!(
                    "{} exceeds max_row_position_length {}",
                    self.min_row_position_length, self.max_row_position_length
                ),
            ));
        }
        if self.vertical_scrollbar_size < 0 {
            return Err(LayoutError::invalid(
                "vertical_scrollbar_size",
                format!("must not be negative, got {}", self.vertical_scrollbar_size),
            ));
        }
        if self.horizontal_scrollbar_size < 0 {
            return Err(LayoutError::invalid(
                "horizontal_scrollbar_size",
                format!("must not be negative, got {}", self.horizontal_scrollbar_size),
            ));
        }
        Ok(())
    }
}

/// Owner of metrics, structure, dimensions, scrolling, visibility, caret and
/// selection for one viewport.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: EngineConfig,
    metrics: Metrics,
    width: i32,
    height: i32,
    data_size: u64,
    structure: Structure,
    dimensions: Dimensions,
    scrolling: Scrolling,
    visibility: Visibility,
    caret: Caret,
    selection: Selection,
}

impl LayoutEngine {
    /// Engine for an empty document in a zero-sized component with no font.
    ///
    /// # Errors
    /// [`LayoutError::InvalidConfiguration`] when `config` is invalid.
    pub fn new(config: EngineConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        let mut engine = Self {
            metrics: Metrics::recompute(None, config.encoding),
            width: 0,
            height: 0,
            data_size: 0,
            structure: Structure::default(),
            dimensions: Dimensions::default(),
            scrolling: Scrolling::new(config.vertical_scroll_unit, config.horizontal_scroll_unit),
            visibility: Visibility::default(),
            caret: Caret::new(config.blink_rate_ms),
            selection: Selection::default(),
            config,
        };
        engine.relayout()?;
        Ok(engine)
    }

    // ===== Events =====

    /// The document now holds `data_size` bytes.
    ///
    /// # Errors
    /// Only if the stored configuration became invalid, which setters prevent.
    pub fn recompute_layout(&mut self, data_size: u64) -> Result<(), LayoutError> {
        self.data_size = data_size;
        self.relayout()
    }

    /// The component is now `width` x `height` pixels.
    ///
    /// # Errors
    /// Only if the stored configuration became invalid, which setters prevent.
    pub fn on_resize(&mut self, width: i32, height: i32) -> Result<(), LayoutError> {
        self.width = width.max(0);
        self.height = height.max(0);
        self.relayout()
    }

    /// Remeasure with `font`; `None` makes all geometry empty.
    ///
    /// # Errors
    /// Only if the stored configuration became invalid, which setters prevent.
    pub fn on_font_changed(&mut self, font: Option<&dyn FontMetrics>) -> Result<(), LayoutError> {
        self.metrics = Metrics::recompute(font, self.config.encoding);
        self.relayout()
    }

    /// Use a known cell size instead of measuring a font.
    ///
    /// # Errors
    /// Only if the stored configuration became invalid, which setters prevent.
    pub fn set_metrics(&mut self, metrics: Metrics) -> Result<(), LayoutError> {
        self.metrics = metrics.with_encoding(self.config.encoding);
        self.relayout()
    }

    /// Apply a value reported by a host scrollbar. Returns `true` when the
    /// scroll position changed.
    pub fn on_scroll(&mut self, value: i32, axis: ScrollAxis) -> bool {
        let geometry = self.geometry();
        let changed = self.scrolling.set_from_native(axis, value, &geometry);
        if changed {
            self.update_visibility();
        }
        changed
    }

    /// Scroll one step without moving the caret.
    pub fn scroll(&mut self, direction: ScrollingDirection) -> bool {
        let geometry = self.geometry();
        let target = self.scrolling.compute_scrolling(direction, &geometry);
        self.set_scroll_position(target)
    }

    /// Scroll to `position`, clamped. Returns `true` when it changed.
    pub fn set_scroll_position(&mut self, position: ScrollPosition) -> bool {
        let geometry = self.geometry();
        let changed = self.scrolling.set_position(position, &geometry);
        if changed {
            self.update_visibility();
        }
        changed
    }

    /// Move the caret one step and keep it in view.
    ///
    /// With `extend_selection` the selection's active end follows the caret;
    /// otherwise the selection collapses onto the new position.
    pub fn move_caret(&mut self, direction: MovementDirection, extend_selection: bool) -> bool {
        let target = self.caret.compute_move_position(
            direction,
            &self.structure,
            self.dimensions.rows_per_page(),
        );
        self.set_caret_position(target, extend_selection)
    }

    /// Move the caret under the component pixel (`x`, `y`).
    pub fn move_caret_to_pixel(
        &mut self,
        x: i32,
        y: i32,
        extend_selection: bool,
        overflow: PositionOverflowMode,
    ) -> bool {
        let Some(target) = mouse_position_to_caret(&self.layout(), x, y, overflow) else {
            return false;
        };
        self.set_caret_position(target, extend_selection)
    }

    /// Place the caret at `position` (clamped) and keep it in view.
    pub fn set_caret_position(&mut self, position: CaretPosition, extend_selection: bool) -> bool {
        let previous = self.caret.position();
        self.caret.set_position(position, &self.structure);
        let current = self.caret.position().data_position;
        if extend_selection {
            self.selection.extend_to(current);
        } else {
            self.selection.clear(current);
        }
        self.reveal_caret();
        self.caret.position() != previous
    }

    /// Smallest scroll that shows the caret. Returns `true` when it scrolled.
    pub fn reveal_caret(&mut self) -> bool {
        let Some((row, column)) = self.caret_cell() else {
            return false;
        };
        let geometry = self.geometry();
        match self
            .scrolling
            .compute_reveal_scroll_position(row, column, &geometry)
        {
            Some(target) => self.set_scroll_position(target),
            None => false,
        }
    }

    /// Scroll so the caret sits in the middle of the view.
    pub fn center_on_caret(&mut self) -> bool {
        let Some((row, column)) = self.caret_cell() else {
            return false;
        };
        let geometry = self.geometry();
        let target = self
            .scrolling
            .compute_center_on_scroll_position(row, column, &geometry);
        self.set_scroll_position(target)
    }

    /// Select the whole document without moving the caret.
    pub fn select_all(&mut self) {
        self.selection.set_selection(0, self.data_size);
    }

    /// Advance the caret blink clock. Returns `true` when the caret needs
    /// repainting.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        self.caret.tick(elapsed_ms)
    }

    // ===== Configuration =====

    /// Replace the whole configuration.
    ///
    /// # Errors
    /// [`LayoutError::InvalidConfiguration`]; the engine is left unchanged.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), LayoutError> {
        let metrics = self.metrics.with_encoding(config.encoding);
        let resolved = config
            .validate()
            .and_then(|()| self.resolve(&config, &metrics));
        let (structure, dimensions) = match resolved {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(%err, "configuration rejected");
                return Err(err);
            }
        };

        let units_changed = config.vertical_scroll_unit != self.config.vertical_scroll_unit
            || config.horizontal_scroll_unit != self.config.horizontal_scroll_unit;
        if config.blink_rate_ms != self.caret.blink_rate_ms() {
            self.caret.set_blink_rate(config.blink_rate_ms);
        }
        self.config = config;
        self.metrics = metrics;
        self.commit(structure, dimensions);

        if units_changed {
            let geometry = self.geometry();
            self.scrolling.set_units(
                config.vertical_scroll_unit,
                config.horizontal_scroll_unit,
                &geometry,
            );
            self.update_visibility();
        }
        Ok(())
    }

    /// Show the code matrix, the text preview, or both.
    ///
    /// # Errors
    /// See [`set_config`](Self::set_config).
    pub fn set_view_mode(&mut self, view_mode: ViewMode) -> Result<(), LayoutError> {
        self.update_config(|config| config.structure.view_mode = view_mode)
    }

    /// Numeric base of the code matrix.
    ///
    /// # Errors
    /// See [`set_config`](Self::set_config).
    pub fn set_code_type(&mut self, code_type: CodeType) -> Result<(), LayoutError> {
        self.update_config(|config| config.structure.code_type = code_type)
    }

    /// Fixed bytes per row (used when not wrapping).
    ///
    /// # Errors
    /// [`LayoutError::InvalidConfiguration`] when `bytes_per_row < 1`.
    pub fn set_bytes_per_row(&mut self, bytes_per_row: usize) -> Result<(), LayoutError> {
        self.update_config(|config| config.structure.bytes_per_row = bytes_per_row)
    }

    /// Fixed or width-derived bytes per row.
    ///
    /// # Errors
    /// See [`set_config`](Self::set_config).
    pub fn set_row_wrapping(&mut self, row_wrapping: RowWrapping) -> Result<(), LayoutError> {
        self.update_config(|config| config.structure.row_wrapping = row_wrapping)
    }

    /// Case of code digits.
    ///
    /// # Errors
    /// See [`set_config`](Self::set_config).
    pub fn set_code_case(&mut self, code_case: CodeCharactersCase) -> Result<(), LayoutError> {
        self.update_config(|config| config.code_case = code_case)
    }

    /// Preview encoding.
    ///
    /// # Errors
    /// See [`set_config`](Self::set_config).
    pub fn set_encoding(&mut self, encoding: TextEncoding) -> Result<(), LayoutError> {
        self.update_config(|config| config.encoding = encoding)
    }

    /// Scroll granularity per axis.
    ///
    /// # Errors
    /// See [`set_config`](Self::set_config).
    pub fn set_scroll_units(
        &mut self,
        vertical: VerticalScrollUnit,
        horizontal: HorizontalScrollUnit,
    ) -> Result<(), LayoutError> {
        self.update_config(|config| {
            config.vertical_scroll_unit = vertical;
            config.horizontal_scroll_unit = horizontal;
        })
    }

    /// Scrollbar policy per axis.
    ///
    /// # Errors
    /// See [`set_config`](Self::set_config).
    pub fn set_scrollbar_visibility(
        &mut self,
        vertical: ScrollBarVisibility,
        horizontal: ScrollBarVisibility,
    ) -> Result<(), LayoutError> {
        self.update_config(|config| {
            config.vertical_scrollbar = vertical;
            config.horizontal_scrollbar = horizontal;
        })
    }

    /// Caret blink period; 0 keeps the caret steady.
    pub fn set_blink_rate(&mut self, blink_rate_ms: u64) {
        self.config.blink_rate_ms = blink_rate_ms;
        self.caret.set_blink_rate(blink_rate_ms);
    }

    /// Caret shape.
    pub fn set_edit_operation(&mut self, edit_operation: EditOperation) {
        self.config.edit_operation = edit_operation;
    }

    fn update_config(&mut self, change: impl FnOnce(&mut EngineConfig)) -> Result<(), LayoutError> {
        let mut config = self.config;
        change(&mut config);
        self.set_config(config)
    }

    // ===== Queries =====

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Document length in bytes.
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Cell geometry.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Document shape.
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Component geometry.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Visible column ranges.
    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Caret state.
    pub fn caret(&self) -> &Caret {
        &self.caret
    }

    /// Selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current scroll position.
    pub fn scroll_position(&self) -> ScrollPosition {
        self.scrolling.position()
    }

    /// Largest valid scroll position.
    pub fn max_scroll_position(&self) -> ScrollPosition {
        self.scrolling.max_position()
    }

    /// Vertical scrollbar mapping mode.
    pub fn vertical_scale(&self) -> ScrollBarVerticalScale {
        self.scrolling.vertical_scale()
    }

    /// Inputs for scroll computations.
    pub fn geometry(&self) -> ScrollGeometry {
        ScrollGeometry::new(&self.metrics, &self.structure, &self.dimensions)
    }

    /// Borrowed view for pixel queries.
    pub fn layout(&self) -> LayoutSnapshot<'_> {
        LayoutSnapshot {
            metrics: &self.metrics,
            structure: &self.structure,
            dimensions: &self.dimensions,
            scroll: self.scrolling.position(),
        }
    }

    /// Rows intersecting the data view.
    pub fn visible_rows(&self) -> Range<u64> {
        self.layout().visible_rows()
    }

    /// Caret rectangle in the caret's section.
    pub fn caret_rect(&self) -> Option<PixelRect> {
        self.layout()
            .caret_rect(self.caret.position(), self.config.edit_operation)
    }

    /// Outline of the caret byte in the other section.
    pub fn mirror_caret_rect(&self) -> Option<PixelRect> {
        self.layout().mirror_caret_rect(self.caret.position())
    }

    /// Rectangles covering the visible part of the selection.
    pub fn selection_rects(&self) -> Vec<PixelRect> {
        selection_rects(&self.selection, &self.layout(), &self.visibility)
    }

    /// Vertical scrollbar state, `None` when the scrollbar is hidden.
    pub fn vertical_scrollbar(&self) -> Option<ScrollBarState> {
        (self.dimensions.vertical_scrollbar_size() > 0)
            .then(|| self.scrolling.vertical_scrollbar(&self.geometry()))
    }

    /// Horizontal scrollbar state, `None` when the scrollbar is hidden.
    pub fn horizontal_scrollbar(&self) -> Option<ScrollBarState> {
        (self.dimensions.horizontal_scrollbar_size() > 0)
            .then(|| self.scrolling.horizontal_scrollbar(&self.geometry()))
    }

    /// Character settings for [`rows`](Self::rows).
    pub fn row_format(&self) -> RowFormat {
        RowFormat {
            code_case: self.config.code_case,
            row_position_case: self.config.row_position_case,
            row_position_length: self.row_position_digits(),
            encoding: self.config.encoding,
            max_bytes_per_char: self.metrics.max_bytes_per_char(),
        }
    }

    /// Decoded characters of every visible row.
    ///
    /// # Errors
    /// Propagates read failures from `provider`.
    pub fn rows(&self, provider: &dyn DataProvider) -> Result<Vec<RowData>, InputError> {
        build_rows(&self.structure, provider, self.visible_rows(), &self.row_format())
    }

    /// Column header characters for the whole row width.
    pub fn column_header(&self) -> Vec<char> {
        column_header(&self.structure, self.config.code_case)
    }

    /// Region under the component pixel (`x`, `y`).
    pub fn position_zone(&self, x: i32, y: i32) -> Zone {
        self.dimensions.position_zone(x, y)
    }

    // ===== Recomputation =====

    fn row_position_digits(&self) -> usize {
        row_position_length(
            self.data_size,
            self.config.min_row_position_length,
            self.config.max_row_position_length,
        )
    }

    /// Row and column of the caret cell, `None` when its section is hidden.
    fn caret_cell(&self) -> Option<(u64, usize)> {
        let position = self.caret.position();
        let row = self.structure.row_of(position.data_position);
        let byte = self.structure.byte_on_row(position.data_position);
        let column = self
            .structure
            .char_pos_for(byte, position.code_offset, position.section)?;
        Some((row, column))
    }

    /// Structure and dimensions for `config`, with scrollbars resolved.
    ///
    /// Showing one scrollbar shrinks the data view, which can make the
    /// other one necessary; flags only ever switch on, so this settles
    /// within three passes.
    fn resolve(
        &self,
        config: &EngineConfig,
        metrics: &Metrics,
    ) -> Result<(Structure, Dimensions), LayoutError> {
        let row_position_digits = row_position_length(
            self.data_size,
            config.min_row_position_length,
            config.max_row_position_length,
        );
        let mut vertical = config.vertical_scrollbar == ScrollBarVisibility::Always;
        let mut horizontal = config.horizontal_scrollbar == ScrollBarVisibility::Always;

        loop {
            let size = ComponentSize {
                width: self.width,
                height: self.height,
                row_position_digits,
                vertical_scrollbar_size: if vertical { config.vertical_scrollbar_size } else { 0 },
                horizontal_scrollbar_size: if horizontal {
                    config.horizontal_scrollbar_size
                } else {
                    0
                },
            };
            let dimensions = Dimensions::recompute(metrics, &size);
            let structure = Structure::update_cache(
                &config.structure,
                self.data_size,
                dimensions.characters_per_page(),
            )?;

            let view = dimensions.data_view();
            let needs_vertical = config.vertical_scrollbar == ScrollBarVisibility::IfNeeded
                && metrics.is_initialized()
                && structure.rows_per_document() as u128 * metrics.row_height() as u128
                    > view.height.max(0) as u128;
            let needs_horizontal = config.horizontal_scrollbar == ScrollBarVisibility::IfNeeded
                && metrics.is_initialized()
                && structure.characters_per_row() as u128 * metrics.character_width() as u128
                    > view.width.max(0) as u128;

            if (!needs_vertical || vertical) && (!needs_horizontal || horizontal) {
                return Ok((structure, dimensions));
            }
            vertical |= needs_vertical;
            horizontal |= needs_horizontal;
        }
    }

    fn relayout(&mut self) -> Result<(), LayoutError> {
        let (structure, dimensions) = self.resolve(&self.config, &self.metrics)?;
        self.commit(structure, dimensions);
        Ok(())
    }

    fn commit(&mut self, structure: Structure, dimensions: Dimensions) {
        self.structure = structure;
        self.dimensions = dimensions;

        let geometry = self.geometry();
        if self.scrolling.update_maximum_scroll_position(&geometry) {
            debug!(
                row = self.scrolling.position().row_position,
                "scroll position clamped"
            );
        }
        self.caret.revalidate(&self.structure);
        if self.selection.revalidate(self.data_size) {
            debug!(data_size = self.data_size, "selection clamped");
        }
        self.update_visibility();

        debug!(
            data_size = self.data_size,
            bytes_per_row = self.structure.bytes_per_row(),
            rows = self.structure.rows_per_document(),
            width = self.width,
            height = self.height,
            "layout recomputed"
        );
    }

    fn update_visibility(&mut self) {
        self.visibility = Visibility::recompute(
            &self.metrics,
            &self.structure,
            &self.dimensions,
            &self.scrolling.position(),
        );
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
