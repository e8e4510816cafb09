//! Frame composition for the hex component.
//!
//! The engine works in pixels; the terminal host runs it with 1x1 cells so
//! every pixel rectangle it reports is already a cell rectangle. This module
//! only copies characters and styles into the ratatui buffer.

use crate::view::constants::STATUS_BAR_HEIGHT;
use crate::view::styles::HexStyles;
use crate::view_state::{LayoutEngine, PixelRect, RowData};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
    Frame,
};

/// Everything one frame shows.
pub struct Screen<'a> {
    /// Layout state to draw.
    pub engine: &'a LayoutEngine,
    /// Decoded visible rows, as returned by [`LayoutEngine::rows`].
    pub rows: &'a [RowData],
    /// Status bar text.
    pub status: &'a str,
    /// Cell styles.
    pub styles: &'a HexStyles,
}

/// Split the terminal into the hex component and the status bar.
pub fn split_areas(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Render the component and the status bar.
pub fn render_layout(frame: &mut Frame, screen: &Screen<'_>) {
    let (component, status) = split_areas(frame.area());
    let buf = frame.buffer_mut();
    render_component(buf, component, screen);
    Paragraph::new(screen.status)
        .style(screen.styles.status)
        .render(status, buf);
}

/// Draw header, gutter, rows, highlights and scrollbars into `area`.
pub fn render_component(buf: &mut Buffer, area: Rect, screen: &Screen<'_>) {
    let engine = screen.engine;
    let styles = screen.styles;
    let layout = engine.layout();
    let dimensions = engine.dimensions();
    let view = dimensions.data_view();

    // Column header, scrolled horizontally with the data view
    let header = dimensions.header_rect();
    if !header.is_empty() {
        for (column, &ch) in engine.column_header().iter().enumerate() {
            let x = layout.column_left(column);
            if x >= view.x && x < view.x + view.width {
                put(buf, area, x, header.y, ch, styles.header);
            }
        }
    }

    let gutter = dimensions.row_positions_rect();
    let preview_start = engine.structure().preview_char_pos();
    for row in screen.rows {
        let y = layout.row_top(row.row);
        if y < view.y || y >= view.y + view.height {
            continue;
        }
        for (i, &ch) in row.position_chars.iter().enumerate() {
            put(buf, area, gutter.x + i as i32, y, ch, styles.gutter);
        }
        for (column, &ch) in row.code_chars.iter().enumerate() {
            put_clipped(buf, area, view, layout.column_left(column), y, ch, styles.code);
        }
        if let Some(start) = preview_start {
            for (i, &ch) in row.preview_chars.iter().enumerate() {
                let x = layout.column_left(start + i);
                put_clipped(buf, area, view, x, y, ch, styles.preview);
            }
        }
    }

    for rect in engine.selection_rects() {
        patch(buf, area, rect, styles.selection);
    }
    if let Some(rect) = engine.mirror_caret_rect() {
        patch(buf, area, rect, styles.mirror_caret);
    }
    if engine.caret().is_visible() {
        if let Some(rect) = engine.caret_rect() {
            patch(buf, area, rect, styles.caret);
        }
    }

    if let Some(state) = engine.vertical_scrollbar() {
        if let Some(rect) = to_rect(area, dimensions.vertical_scrollbar_rect()) {
            render_scrollbar(buf, rect, ScrollbarOrientation::VerticalRight, state, styles);
        }
    }
    if let Some(state) = engine.horizontal_scrollbar() {
        if let Some(rect) = to_rect(area, dimensions.horizontal_scrollbar_rect()) {
            render_scrollbar(buf, rect, ScrollbarOrientation::HorizontalBottom, state, styles);
        }
    }
}

fn render_scrollbar(
    buf: &mut Buffer,
    rect: Rect,
    orientation: ScrollbarOrientation,
    state: crate::view_state::ScrollBarState,
    styles: &HexStyles,
) {
    let mut scrollbar_state = ScrollbarState::new(state.range.max(0) as usize)
        .position(state.position.max(0) as usize)
        .viewport_content_length(state.page.max(0) as usize);
    Scrollbar::new(orientation)
        .begin_symbol(None)
        .end_symbol(None)
        .thumb_style(styles.scrollbar)
        .render(rect, buf, &mut scrollbar_state);
}

/// Component-relative pixel rectangle as a buffer rectangle inside `area`.
fn to_rect(area: Rect, rect: PixelRect) -> Option<Rect> {
    if rect.is_empty() || rect.x < 0 || rect.y < 0 {
        return None;
    }
    let x = area.x.saturating_add(u16::try_from(rect.x).ok()?);
    let y = area.y.saturating_add(u16::try_from(rect.y).ok()?);
    let width = u16::try_from(rect.width).ok()?;
    let height = u16::try_from(rect.height).ok()?;
    Some(Rect::new(x, y, width, height).intersection(area))
}

fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, ch: char, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if x >= area.width || y >= area.height {
        return;
    }
    if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
        cell.set_char(ch).set_style(style);
    }
}

fn put_clipped(buf: &mut Buffer, area: Rect, view: PixelRect, x: i32, y: i32, ch: char, style: Style) {
    if view.contains(x, y) {
        put(buf, area, x, y, ch, style);
    }
}

/// Overlay `style` on every cell of `rect`, keeping the characters.
fn patch(buf: &mut Buffer, area: Rect, rect: PixelRect, style: Style) {
    if let Some(rect) = to_rect(area, rect) {
        buf.set_style(rect, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_takes_last_line() {
        let (component, status) = split_areas(Rect::new(0, 0, 80, 24));
        assert_eq!(component, Rect::new(0, 0, 80, 23));
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn pixel_rect_is_offset_by_area() {
        let area = Rect::new(2, 3, 20, 10);
        assert_eq!(
            to_rect(area, PixelRect::new(1, 1, 4, 2)),
            Some(Rect::new(3, 4, 4, 2))
        );
    }

    #[test]
    fn pixel_rect_is_clipped_to_area() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(
            to_rect(area, PixelRect::new(8, 4, 6, 3)),
            Some(Rect::new(8, 4, 2, 1))
        );
        assert_eq!(to_rect(area, PixelRect::new(-1, 0, 3, 1)), None);
        assert_eq!(to_rect(area, PixelRect::new(0, 0, 0, 1)), None);
    }

    #[test]
    fn put_ignores_cells_outside_area() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        put(&mut buf, area, 4, 0, 'x', Style::default());
        put(&mut buf, area, -1, 0, 'x', Style::default());
        put(&mut buf, area, 3, 1, 'y', Style::default());
        assert_eq!(buf[(3, 1)].symbol(), "y");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
