//! Pixel geometry of the component.
//!
//! ```text
//! +--------+-------------------------------+---+
//! | corner | header                            |
//! +--------+-------------------------------+---+
//! | row    | data view                     | v |
//! | posit. |                               | s |
//! |        |                               | b |
//! +--------+-------------------------------+---+
//! | corner | horizontal scrollbar          | c |
//! +--------+-------------------------------+---+
//! ```

use super::metrics::Metrics;

/// Axis-aligned rectangle in component pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width, never negative.
    pub width: i32,
    /// Height, never negative.
    pub height: i32,
}

impl PixelRect {
    /// Create a rectangle, flooring negative sizes at zero.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `(x, y)` lies inside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Intersection with `other`; empty when they do not overlap.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        PixelRect::new(left, top, right - left, bottom - top)
    }
}

/// Region of the component a pixel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Above the row-position gutter.
    TopLeftCorner,
    /// Column header.
    Header,
    /// Row-position gutter.
    RowPositions,
    /// Vertical scrollbar.
    VerticalScrollbar,
    /// Below the row-position gutter.
    BottomLeftCorner,
    /// Where both scrollbars meet.
    ScrollbarCorner,
    /// Horizontal scrollbar.
    HorizontalScrollbar,
    /// Data view.
    CodeArea,
}

/// Inputs that change independently of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentSize {
    /// Component width in pixels.
    pub width: i32,
    /// Component height in pixels.
    pub height: i32,
    /// Digits in the row-position gutter.
    pub row_position_digits: usize,
    /// Width reserved for the vertical scrollbar (0 when hidden).
    pub vertical_scrollbar_size: i32,
    /// Height reserved for the horizontal scrollbar (0 when hidden).
    pub horizontal_scrollbar_size: i32,
}

/// Derived pixel layout. Replaced wholesale on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    component: PixelRect,
    row_position_area_width: i32,
    header_area_height: i32,
    data_view: PixelRect,
    vertical_scrollbar_size: i32,
    horizontal_scrollbar_size: i32,
    rows_per_page: usize,
    rows_per_rect: usize,
    characters_per_page: usize,
    characters_per_rect: usize,
    last_row_offset: i32,
    last_char_offset: i32,
}

impl Dimensions {
    /// Compute the layout for `size` with the given cell metrics.
    ///
    /// Sizes that would go negative on a small component are floored at
    /// zero. Uninitialized metrics give zero-sized gutter, header and counts.
    pub fn recompute(metrics: &Metrics, size: &ComponentSize) -> Self {
        let component = PixelRect::new(0, 0, size.width, size.height);
        let character_width = metrics.character_width();
        let row_height = metrics.row_height();
        let font_height = metrics.font_height();

        let row_position_area_width =
            (character_width * (size.row_position_digits as i32 + 1)).min(component.width);
        let header_area_height = (font_height + font_height / 4).min(component.height);

        let scroll_panel_width = component.width - row_position_area_width;
        let scroll_panel_height = component.height - header_area_height;
        let vertical_scrollbar_size = size.vertical_scrollbar_size.clamp(0, scroll_panel_width);
        let horizontal_scrollbar_size =
            size.horizontal_scrollbar_size.clamp(0, scroll_panel_height);

        let data_view = PixelRect::new(
            row_position_area_width,
            header_area_height,
            scroll_panel_width - vertical_scrollbar_size,
            scroll_panel_height - horizontal_scrollbar_size,
        );

        let mut dimensions = Self {
            component,
            row_position_area_width,
            header_area_height,
            data_view,
            vertical_scrollbar_size,
            horizontal_scrollbar_size,
            ..Self::default()
        };

        if metrics.is_initialized() {
            dimensions.rows_per_page = (data_view.height / row_height) as usize;
            dimensions.rows_per_rect = ((data_view.height + row_height - 1) / row_height) as usize;
            dimensions.characters_per_page = (data_view.width / character_width) as usize;
            dimensions.characters_per_rect =
                ((data_view.width + character_width - 1) / character_width) as usize;
            dimensions.last_row_offset = data_view.height % row_height;
            dimensions.last_char_offset = data_view.width % character_width;
        }

        dimensions
    }

    /// Classify a pixel position.
    ///
    /// Corner zones are tested before the edges they touch.
    pub fn position_zone(&self, x: i32, y: i32) -> Zone {
        let data_right = self.data_view.x + self.data_view.width;
        let data_bottom = self.data_view.y + self.data_view.height;

        if y < self.data_view.y {
            return if x < self.row_position_area_width {
                Zone::TopLeftCorner
            } else {
                Zone::Header
            };
        }

        if x < self.row_position_area_width {
            return if y >= data_bottom {
                Zone::BottomLeftCorner
            } else {
                Zone::RowPositions
            };
        }

        if x >= data_right && y < data_bottom {
            return Zone::VerticalScrollbar;
        }

        if y >= data_bottom {
            return if x >= data_right {
                Zone::ScrollbarCorner
            } else {
                Zone::HorizontalScrollbar
            };
        }

        Zone::CodeArea
    }

    /// Whole component.
    pub fn component(&self) -> PixelRect {
        self.component
    }

    /// Width of the row-position gutter.
    pub fn row_position_area_width(&self) -> i32 {
        self.row_position_area_width
    }

    /// Height of the header.
    pub fn header_area_height(&self) -> i32 {
        self.header_area_height
    }

    /// Header strip above the data view.
    pub fn header_rect(&self) -> PixelRect {
        PixelRect::new(
            self.row_position_area_width,
            0,
            self.data_view.width,
            self.header_area_height,
        )
    }

    /// Row-position gutter beside the data view.
    pub fn row_positions_rect(&self) -> PixelRect {
        PixelRect::new(
            0,
            self.header_area_height,
            self.row_position_area_width,
            self.data_view.height,
        )
    }

    /// Data view rectangle.
    pub fn data_view(&self) -> PixelRect {
        self.data_view
    }

    /// Vertical scrollbar rectangle (empty when hidden).
    pub fn vertical_scrollbar_rect(&self) -> PixelRect {
        PixelRect::new(
            self.data_view.x + self.data_view.width,
            self.data_view.y,
            self.vertical_scrollbar_size,
            self.data_view.height,
        )
    }

    /// Horizontal scrollbar rectangle (empty when hidden).
    pub fn horizontal_scrollbar_rect(&self) -> PixelRect {
        PixelRect::new(
            self.data_view.x,
            self.data_view.y + self.data_view.height,
            self.data_view.width,
            self.horizontal_scrollbar_size,
        )
    }

    /// Width reserved for the vertical scrollbar.
    pub fn vertical_scrollbar_size(&self) -> i32 {
        self.vertical_scrollbar_size
    }

    /// Height reserved for the horizontal scrollbar.
    pub fn horizontal_scrollbar_size(&self) -> i32 {
        self.horizontal_scrollbar_size
    }

    /// Rows fully visible.
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Rows at least partially visible.
    pub fn rows_per_rect(&self) -> usize {
        self.rows_per_rect
    }

    /// Characters fully visible.
    pub fn characters_per_page(&self) -> usize {
        self.characters_per_page
    }

    /// Characters at least partially visible.
    pub fn characters_per_rect(&self) -> usize {
        self.characters_per_rect
    }

    /// Pixels left below the last full row.
    pub fn last_row_offset(&self) -> i32 {
        self.last_row_offset
    }

    /// Pixels left right of the last full character.
    pub fn last_char_offset(&self) -> i32 {
        self.last_char_offset
    }
}

#[cfg(test)]
#[path = "dimensions_tests.rs"]
mod tests;
