//! Anchor/active byte selection.

use super::dimensions::PixelRect;
use super::layout::LayoutSnapshot;
use super::visibility::Visibility;

/// Selected byte range in drag order.
///
/// The selection covers the bytes in `[min(anchor, active), max(anchor, active))`.
/// `anchor == active` is the empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    anchor: u64,
    active: u64,
}

impl Selection {
    /// Selection from `anchor` to `active`.
    pub fn new(anchor: u64, active: u64) -> Self {
        Self { anchor, active }
    }

    /// Replace both ends.
    pub fn set_selection(&mut self, anchor: u64, active: u64) {
        self.anchor = anchor;
        self.active = active;
    }

    /// Collapse to an empty selection anchored at `position`.
    pub fn clear(&mut self, position: u64) {
        self.anchor = position;
        self.active = position;
    }

    /// Move the active end, keeping the anchor.
    pub fn extend_to(&mut self, active: u64) {
        self.active = active;
    }

    /// Where the drag started.
    pub fn anchor(&self) -> u64 {
        self.anchor
    }

    /// Where the drag currently is.
    pub fn active(&self) -> u64 {
        self.active
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// First selected byte.
    pub fn first(&self) -> u64 {
        self.anchor.min(self.active)
    }

    /// Last selected byte (inclusive); equals [`first`](Self::first) when empty.
    pub fn last(&self) -> u64 {
        if self.is_empty() {
            self.first()
        } else {
            self.anchor.max(self.active) - 1
        }
    }

    /// Number of selected bytes.
    pub fn len(&self) -> u64 {
        self.anchor.abs_diff(self.active)
    }

    /// Whether `position` is selected.
    pub fn contains(&self, position: u64) -> bool {
        !self.is_empty() && position >= self.first() && position <= self.last()
    }

    /// Clamp both ends to `data_size`. Returns `true` when either moved.
    pub fn revalidate(&mut self, data_size: u64) -> bool {
        let clamped = Self::new(self.anchor.min(data_size), self.active.min(data_size));
        let changed = clamped != *self;
        *self = clamped;
        changed
    }
}

/// Pixel rectangles of the selected spans on every visible row, clipped to
/// the data view. Each shown section contributes one rectangle per row.
pub fn selection_rects(
    selection: &Selection,
    layout: &LayoutSnapshot<'_>,
    visibility: &Visibility,
) -> Vec<PixelRect> {
    let mut rects = Vec::new();
    if selection.is_empty() || !layout.metrics.is_initialized() {
        return rects;
    }

    let structure = layout.structure;
    let bytes_per_row = structure.bytes_per_row() as u64;
    let first = selection.first();
    let last = selection.last();

    for row in layout.visible_rows() {
        let row_start = structure.row_start(row);
        let row_last = row_start.saturating_add(bytes_per_row - 1);
        if last < row_start || first > row_last {
            continue;
        }
        let from = (first.max(row_start) - row_start) as usize;
        let to = (last.min(row_last) - row_start) as usize;

        if visibility.is_code_visible() {
            let start = structure.first_code_char_pos(from);
            let cells = structure.code_last_char_pos(to) + 1 - start;
            rects.extend(layout.clip(layout.cell_rect(row, start, cells)));
        }
        if visibility.is_preview_visible() {
            if let Some(preview) = structure.preview_char_pos() {
                let rect = layout.cell_rect(row, preview + from, to - from + 1);
                rects.extend(layout.clip(rect));
            }
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeType, ViewMode};
    use crate::view_state::dimensions::{ComponentSize, Dimensions};
    use crate::view_state::metrics::Metrics;
    use crate::view_state::scroll::ScrollPosition;
    use crate::view_state::structure::{Structure, StructureConfig};

    #[test]
    fn first_never_exceeds_last_in_either_drag_direction() {
        let forward = Selection::new(3, 9);
        let backward = Selection::new(9, 3);
        assert_eq!((forward.first(), forward.last()), (3, 8));
        assert_eq!((backward.first(), backward.last()), (3, 8));
    }

    #[test]
    fn empty_selection_contains_nothing() {
        let selection = Selection::new(4, 4);
        assert!(selection.is_empty());
        assert_eq!(selection.first(), selection.last());
        assert!(!selection.contains(4));
        assert_eq!(selection.len(), 0);
    }

    #[test]
    fn extend_keeps_anchor() {
        let mut selection = Selection::default();
        selection.clear(10);
        selection.extend_to(4);
        assert_eq!(selection.anchor(), 10);
        assert!(selection.contains(4));
        assert!(selection.contains(9));
        assert!(!selection.contains(10));
    }

    #[test]
    fn revalidate_clamps_to_document() {
        let mut selection = Selection::new(2, 50);
        assert!(selection.revalidate(20));
        assert_eq!(selection, Selection::new(2, 20));
        assert!(!selection.revalidate(20));
    }

    #[test]
    fn rects_cover_both_sections_per_row() {
        let metrics = Metrics::fixed(1, 1, 1);
        let config = StructureConfig {
            view_mode: ViewMode::Dual,
            code_type: CodeType::Hexadecimal,
            bytes_per_row: 4,
            ..StructureConfig::default()
        };
        let structure = Structure::update_cache(&config, 100, 0).unwrap();
        // Row: "00 11 22 33 abcd" is 16 columns; data view 16x5 at (1, 1).
        let dimensions = Dimensions::recompute(
            &metrics,
            &ComponentSize {
                width: 17,
                height: 6,
                ..ComponentSize::default()
            },
        );
        let scroll = ScrollPosition::default();
        let layout = LayoutSnapshot {
            metrics: &metrics,
            structure: &structure,
            dimensions: &dimensions,
            scroll,
        };
        let visibility = Visibility::recompute(&metrics, &structure, &dimensions, &scroll);

        let rects = selection_rects(&Selection::new(6, 2), &layout, &visibility);
        assert_eq!(
            rects,
            vec![
                PixelRect::new(7, 1, 5, 1),
                PixelRect::new(15, 1, 2, 1),
                PixelRect::new(1, 2, 5, 1),
                PixelRect::new(13, 2, 2, 1),
            ]
        );
    }
}
