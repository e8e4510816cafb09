//! Tests for scrolling.

use super::*;
use crate::model::{CodeType, ViewMode};
use crate::view_state::dimensions::{ComponentSize, Dimensions};
use crate::view_state::metrics::Metrics;
use crate::view_state::structure::{Structure, StructureConfig};

const CHARACTER_WIDTH: i32 = 7;
const ROW_HEIGHT: i32 = 14;
const GUTTER: i32 = CHARACTER_WIDTH * 9;
const HEADER: i32 = ROW_HEIGHT + ROW_HEIGHT / 4;

/// Dual hex view, 16 bytes per row (64 columns), 7x14 cells.
fn geometry(data_size: u64, view_width: i32, view_height: i32) -> ScrollGeometry {
    let metrics = Metrics::fixed(CHARACTER_WIDTH, ROW_HEIGHT, 1);
    let config = StructureConfig {
        view_mode: ViewMode::Dual,
        code_type: CodeType::Hexadecimal,
        ..StructureConfig::default()
    };
    let structure = Structure::update_cache(&config, data_size, 0).unwrap();
    let dimensions = Dimensions::recompute(
        &metrics,
        &ComponentSize {
            width: GUTTER + view_width,
            height: HEADER + view_height,
            row_position_digits: 8,
            vertical_scrollbar_size: 0,
            horizontal_scrollbar_size: 0,
        },
    );
    ScrollGeometry::new(&metrics, &structure, &dimensions)
}

/// 63 rows, 7 full rows plus 2 pixels, 20 full columns.
fn standard() -> ScrollGeometry {
    geometry(1000, 140, 100)
}

fn pixel_scrolling(geometry: &ScrollGeometry) -> Scrolling {
    let mut scrolling = Scrolling::new(VerticalScrollUnit::Pixel, HorizontalScrollUnit::Pixel);
    scrolling.update_maximum_scroll_position(geometry);
    scrolling
}

fn row_scrolling(geometry: &ScrollGeometry) -> Scrolling {
    let mut scrolling =
        Scrolling::new(VerticalScrollUnit::Row, HorizontalScrollUnit::Character);
    scrolling.update_maximum_scroll_position(geometry);
    scrolling
}

mod maximum {
    use super::*;

    #[test]
    fn pixel_unit_shows_last_row_flush_with_bottom() {
        let geometry = standard();
        assert_eq!(geometry.rows_per_document, 63);
        let scrolling = pixel_scrolling(&geometry);
        let max = scrolling.max_position();
        assert_eq!((max.row_position, max.row_offset), (55, 12));
        assert_eq!(max.vertical_pixels(ROW_HEIGHT), 63 * 14 - 100);
    }

    #[test]
    fn horizontal_maximum_without_partial_column() {
        let scrolling = pixel_scrolling(&standard());
        let max = scrolling.max_position();
        assert_eq!((max.char_position, max.char_offset), (44, 0));
    }

    #[test]
    fn row_unit_has_no_sub_row_offset() {
        let scrolling = row_scrolling(&standard());
        let max = scrolling.max_position();
        assert_eq!((max.row_position, max.row_offset), (56, 0));
    }

    #[test]
    fn short_document_cannot_scroll() {
        let scrolling = pixel_scrolling(&geometry(100, 140, 100));
        assert_eq!(scrolling.max_position().row_position, 0);
        assert_eq!(scrolling.max_position().row_offset, 0);
    }

    #[test]
    fn shrinking_document_reclamps_position() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        scrolling.set_position(ScrollPosition::new(55, 12, 10, 0), &geometry);

        let moved = scrolling.update_maximum_scroll_position(&super::geometry(100, 140, 100));
        assert!(moved);
        assert_eq!(scrolling.position().row_position, 0);
        assert_eq!(scrolling.position().row_offset, 0);
    }

    #[test]
    fn uninitialized_metrics_pin_to_origin() {
        let mut geometry = standard();
        geometry.row_height = 0;
        geometry.character_width = 0;
        let scrolling = pixel_scrolling(&geometry);
        assert_eq!(scrolling.max_position(), ScrollPosition::default());
    }
}

mod steps {
    use super::*;

    #[test]
    fn single_steps_move_one_cell() {
        let geometry = standard();
        let scrolling = pixel_scrolling(&geometry);
        let down = scrolling.compute_scrolling(ScrollingDirection::Down, &geometry);
        assert_eq!((down.row_position, down.row_offset), (1, 0));
        let right = scrolling.compute_scrolling(ScrollingDirection::Right, &geometry);
        assert_eq!((right.char_position, right.char_offset), (1, 0));
    }

    #[test]
    fn cannot_scroll_before_origin() {
        let geometry = standard();
        let scrolling = pixel_scrolling(&geometry);
        assert_eq!(
            scrolling.compute_scrolling(ScrollingDirection::Up, &geometry),
            ScrollPosition::default()
        );
        assert_eq!(
            scrolling.compute_scrolling(ScrollingDirection::Left, &geometry),
            ScrollPosition::default()
        );
    }

    #[test]
    fn page_down_moves_by_rows_per_page_then_clamps() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        let page = scrolling.compute_scrolling(ScrollingDirection::PageDown, &geometry);
        assert_eq!(page.row_position, 7);

        scrolling.set_position(ScrollPosition::new(50, 0, 0, 0), &geometry);
        let clamped = scrolling.compute_scrolling(ScrollingDirection::PageDown, &geometry);
        assert_eq!((clamped.row_position, clamped.row_offset), (55, 12));
    }

    #[test]
    fn up_from_partial_offset_keeps_offset() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        scrolling.set_position(ScrollPosition::new(5, 3, 0, 0), &geometry);
        let up = scrolling.compute_scrolling(ScrollingDirection::Up, &geometry);
        assert_eq!((up.row_position, up.row_offset), (4, 3));
    }
}

mod reveal {
    use super::*;

    #[test]
    fn visible_target_needs_no_change() {
        let geometry = standard();
        let scrolling = pixel_scrolling(&geometry);
        assert_eq!(scrolling.compute_reveal_scroll_position(3, 5, &geometry), None);
    }

    #[test]
    fn target_below_is_bottom_aligned() {
        let geometry = standard();
        let scrolling = pixel_scrolling(&geometry);
        let revealed = scrolling
            .compute_reveal_scroll_position(20, 0, &geometry)
            .unwrap();
        assert_eq!((revealed.row_position, revealed.row_offset), (13, 12));
    }

    #[test]
    fn revealing_twice_is_idempotent() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        let revealed = scrolling
            .compute_reveal_scroll_position(20, 30, &geometry)
            .unwrap();
        scrolling.set_position(revealed, &geometry);
        assert_eq!(scrolling.compute_reveal_scroll_position(20, 30, &geometry), None);
    }

    #[test]
    fn target_above_is_top_aligned() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        scrolling.set_position(ScrollPosition::new(13, 12, 0, 0), &geometry);
        let revealed = scrolling
            .compute_reveal_scroll_position(10, 0, &geometry)
            .unwrap();
        assert_eq!((revealed.row_position, revealed.row_offset), (10, 0));
    }

    #[test]
    fn only_the_hidden_axis_moves() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        scrolling.set_position(ScrollPosition::new(2, 5, 0, 0), &geometry);
        let revealed = scrolling
            .compute_reveal_scroll_position(4, 30, &geometry)
            .unwrap();
        assert_eq!((revealed.row_position, revealed.row_offset), (2, 5));
        assert_eq!((revealed.char_position, revealed.char_offset), (11, 0));
    }

    #[test]
    fn row_unit_rounds_to_whole_rows() {
        let geometry = standard();
        let scrolling = row_scrolling(&geometry);
        let revealed = scrolling
            .compute_reveal_scroll_position(7, 0, &geometry)
            .unwrap();
        assert_eq!((revealed.row_position, revealed.row_offset), (1, 0));
    }

    #[test]
    fn last_row_reveal_matches_maximum() {
        let geometry = standard();
        let scrolling = pixel_scrolling(&geometry);
        let revealed = scrolling
            .compute_reveal_scroll_position(62, 0, &geometry)
            .unwrap();
        let max = scrolling.max_position();
        assert_eq!(
            (revealed.row_position, revealed.row_offset),
            (max.row_position, max.row_offset)
        );
    }
}

mod center {
    use super::*;

    #[test]
    fn target_ends_up_mid_view() {
        let geometry = standard();
        let scrolling = pixel_scrolling(&geometry);
        let centered = scrolling.compute_center_on_scroll_position(30, 30, &geometry);
        assert_eq!((centered.row_position, centered.row_offset), (26, 13));
        assert_eq!((centered.char_position, centered.char_offset), (20, 3));
    }

    #[test]
    fn near_edges_clamps() {
        let geometry = standard();
        let scrolling = pixel_scrolling(&geometry);
        assert_eq!(
            scrolling.compute_center_on_scroll_position(0, 0, &geometry),
            ScrollPosition::default()
        );
        let end = scrolling.compute_center_on_scroll_position(62, 0, &geometry);
        assert_eq!(
            (end.row_position, end.row_offset),
            (scrolling.max_position().row_position, scrolling.max_position().row_offset)
        );
    }

    #[test]
    fn centers_even_when_already_visible() {
        let geometry = standard();
        let scrolling = pixel_scrolling(&geometry);
        let centered = scrolling.compute_center_on_scroll_position(5, 0, &geometry);
        assert_ne!(centered, scrolling.position());
    }
}

mod scrollbar {
    use super::*;

    #[test]
    fn normal_scale_maps_pixels() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        assert_eq!(scrolling.vertical_scale(), ScrollBarVerticalScale::Normal);
        scrolling.set_position(ScrollPosition::new(3, 4, 0, 0), &geometry);
        let state = scrolling.vertical_scrollbar(&geometry);
        assert_eq!(state.range, 782);
        assert_eq!(state.page, 100);
        assert_eq!(state.position, 46);
    }

    #[test]
    fn normal_native_value_sets_pixel_position() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        assert!(scrolling.set_from_native(ScrollAxis::Vertical, 46, &geometry));
        let position = scrolling.position();
        assert_eq!((position.row_position, position.row_offset), (3, 4));
        assert!(!scrolling.set_from_native(ScrollAxis::Vertical, 46, &geometry));
    }

    #[test]
    fn huge_document_switches_to_scaled() {
        let geometry = geometry(16 << 40, 140, 100);
        let scrolling = pixel_scrolling(&geometry);
        assert_eq!(scrolling.vertical_scale(), ScrollBarVerticalScale::Scaled);
    }

    #[test]
    fn scaled_endpoints_map_exactly() {
        let geometry = geometry(16 << 40, 140, 100);
        let mut scrolling = pixel_scrolling(&geometry);
        let last_page = geometry.rows_to_last_page();
        assert_eq!(last_page, (1 << 40) + 1 - 8);

        scrolling.set_from_native(ScrollAxis::Vertical, i32::MAX, &geometry);
        assert_eq!(scrolling.position().row_position, last_page);
        assert_eq!(scrolling.vertical_scrollbar(&geometry).position, i32::MAX);

        scrolling.set_from_native(ScrollAxis::Vertical, 0, &geometry);
        assert_eq!(scrolling.position().row_position, 0);
        assert_eq!(scrolling.vertical_scrollbar(&geometry).position, 0);
    }

    #[test]
    fn scaled_mapping_is_monotonic() {
        let rows = 1u64 << 62;
        let mut previous = 0;
        for value in [1u64, 2, 1000, 1 << 20, 1 << 30, NATIVE_SCROLL_MAX - 1, NATIVE_SCROLL_MAX] {
            let row = scaled_native_to_row(value, rows);
            assert!(row >= previous);
            previous = row;
        }
        assert_eq!(previous, rows);
    }

    #[test]
    fn scaled_small_counts_round_down() {
        assert_eq!(scaled_native_to_row(NATIVE_SCROLL_MAX / 2, 10), 4);
        assert_eq!(scaled_native_to_row(NATIVE_SCROLL_MAX, 10), 10);
    }

    #[test]
    fn forward_and_back_agree_within_one_bucket() {
        let rows = (1u64 << 40) + 12345;
        let bucket = rows / NATIVE_SCROLL_MAX + 1;
        for row in [0, 1, 77, rows / 3, rows / 2, rows - 1, rows] {
            let native = row_to_scaled_native(row, rows);
            let back = scaled_native_to_row(native, rows);
            assert!(back <= row && row - back <= bucket, "row {row} came back as {back}");
        }
    }

    #[test]
    fn horizontal_native_value_sets_columns() {
        let geometry = standard();
        let mut scrolling = pixel_scrolling(&geometry);
        scrolling.set_from_native(ScrollAxis::Horizontal, 15, &geometry);
        let position = scrolling.position();
        assert_eq!((position.char_position, position.char_offset), (2, 1));
        assert_eq!(scrolling.horizontal_scrollbar(&geometry).range, 308);
    }
}
