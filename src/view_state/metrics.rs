//! Per-character cell geometry.

use crate::model::{TextEncoding, DEFAULT_MAX_BYTES_PER_CHAR};

/// Font measurements supplied by the host.
///
/// The engine never loads fonts; it only asks the host how big a
/// monospace cell is. Terminal hosts answer with a 1x1 cell.
pub trait FontMetrics {
    /// Advance width of `character` in pixels.
    fn char_width(&self, character: char) -> i32;
    /// Distance from baseline to the top of the tallest glyph.
    fn ascent(&self) -> f32;
    /// Distance from baseline to the bottom of the lowest glyph.
    fn descent(&self) -> f32;
    /// Nominal font size in pixels.
    fn size(&self) -> i32;
}

/// Character used to measure the cell width.
const MEASURE_CHARACTER: char = 'w';

/// Cell geometry derived from the current font and encoding.
///
/// # Invariants
/// - Either `character_width` and `row_height` are both 0 (no font yet)
///   or both are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    character_width: i32,
    row_height: i32,
    font_height: i32,
    sub_font_space: i32,
    max_bytes_per_char: usize,
}

impl Metrics {
    /// Measure `font`; `None` yields uninitialized metrics.
    pub fn recompute(font: Option<&dyn FontMetrics>, encoding: TextEncoding) -> Self {
        let max_bytes_per_char = encoding
            .max_bytes_per_char()
            .unwrap_or(DEFAULT_MAX_BYTES_PER_CHAR);

        let Some(font) = font else {
            return Self {
                max_bytes_per_char,
                ..Self::default()
            };
        };

        let character_width = font.char_width(MEASURE_CHARACTER);
        let font_height = (font.ascent() + font.descent()).ceil() as i32;
        if character_width <= 0 || font_height <= 0 {
            return Self {
                max_bytes_per_char,
                ..Self::default()
            };
        }

        Self {
            character_width,
            row_height: font_height,
            font_height,
            sub_font_space: font_height - font.size(),
            max_bytes_per_char,
        }
    }

    /// Metrics with fixed cell size, for hosts that already know it.
    pub fn fixed(character_width: i32, row_height: i32, max_bytes_per_char: usize) -> Self {
        if character_width <= 0 || row_height <= 0 {
            return Self {
                max_bytes_per_char,
                ..Self::default()
            };
        }
        Self {
            character_width,
            row_height,
            font_height: row_height,
            sub_font_space: 0,
            max_bytes_per_char,
        }
    }

    /// Same cell geometry with the worst-case character length of `encoding`.
    pub fn with_encoding(self, encoding: TextEncoding) -> Self {
        Self {
            max_bytes_per_char: encoding
                .max_bytes_per_char()
                .unwrap_or(DEFAULT_MAX_BYTES_PER_CHAR),
            ..self
        }
    }

    /// Whether a font has been measured.
    pub fn is_initialized(&self) -> bool {
        self.row_height != 0 && self.character_width != 0
    }

    /// Width of one character cell.
    pub fn character_width(&self) -> i32 {
        self.character_width
    }

    /// Height of one row.
    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    /// Height of the font (ascent + descent, rounded up).
    pub fn font_height(&self) -> i32 {
        self.font_height
    }

    /// Baseline correction for the renderer.
    pub fn sub_font_space(&self) -> i32 {
        self.sub_font_space
    }

    /// Worst-case bytes per decoded preview character.
    pub fn max_bytes_per_char(&self) -> usize {
        self.max_bytes_per_char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFont {
        width: i32,
        ascent: f32,
        descent: f32,
        size: i32,
    }

    impl FontMetrics for TestFont {
        fn char_width(&self, _character: char) -> i32 {
            self.width
        }
        fn ascent(&self) -> f32 {
            self.ascent
        }
        fn descent(&self) -> f32 {
            self.descent
        }
        fn size(&self) -> i32 {
            self.size
        }
    }

    #[test]
    fn no_font_is_uninitialized() {
        let metrics = Metrics::recompute(None, TextEncoding::Latin1);
        assert!(!metrics.is_initialized());
        assert_eq!(metrics.character_width(), 0);
        assert_eq!(metrics.row_height(), 0);
        assert_eq!(metrics.max_bytes_per_char(), 1);
    }

    #[test]
    fn row_height_is_rounded_up_ascent_plus_descent() {
        let font = TestFont {
            width: 7,
            ascent: 10.2,
            descent: 3.1,
            size: 12,
        };
        let metrics = Metrics::recompute(Some(&font), TextEncoding::Utf8);
        assert!(metrics.is_initialized());
        assert_eq!(metrics.character_width(), 7);
        assert_eq!(metrics.row_height(), 14);
        assert_eq!(metrics.font_height(), 14);
        assert_eq!(metrics.sub_font_space(), 2);
        assert_eq!(metrics.max_bytes_per_char(), 4);
    }

    #[test]
    fn zero_width_font_degrades_to_uninitialized() {
        let font = TestFont {
            width: 0,
            ascent: 10.0,
            descent: 2.0,
            size: 12,
        };
        assert!(!Metrics::recompute(Some(&font), TextEncoding::Latin1).is_initialized());
    }

    #[test]
    fn unknown_encoding_uses_fallback_width() {
        let metrics = Metrics::recompute(None, TextEncoding::Other);
        assert_eq!(metrics.max_bytes_per_char(), DEFAULT_MAX_BYTES_PER_CHAR);
    }

    #[test]
    fn fixed_cells_are_initialized() {
        let metrics = Metrics::fixed(1, 1, 1);
        assert!(metrics.is_initialized());
        assert_eq!(metrics.font_height(), 1);
    }
}
