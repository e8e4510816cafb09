//! Smaller presentation settings shared by config and engine.

use serde::Deserialize;

/// Text encoding used for the preview section.
///
/// Only the worst-case byte length per character matters to the layout;
/// the codec uses the variant to decode preview characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// 7-bit ASCII; bytes above 0x7F are not printable.
    Ascii,
    /// ISO-8859-1, one byte per character.
    #[default]
    Latin1,
    /// UTF-8, up to 4 bytes per character.
    Utf8,
    /// UTF-16 little endian, 2 or 4 bytes per character.
    Utf16Le,
    /// Any encoding name not listed above. Decoded as Latin-1 and sized
    /// with [`DEFAULT_MAX_BYTES_PER_CHAR`].
    #[serde(other)]
    Other,
}

/// Worst-case byte count used when an encoding cannot report one.
pub const DEFAULT_MAX_BYTES_PER_CHAR: usize = 4;

impl TextEncoding {
    /// Worst-case bytes needed to encode one character.
    pub fn max_bytes_per_char(self) -> Option<usize> {
        match self {
            TextEncoding::Ascii | TextEncoding::Latin1 => Some(1),
            TextEncoding::Utf8 => Some(4),
            TextEncoding::Utf16Le => Some(4),
            TextEncoding::Other => None,
        }
    }
}

/// Granularity of vertical scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalScrollUnit {
    /// Whole rows; the row offset is always 0.
    Row,
    /// Pixels; partial rows may be scrolled off the top.
    #[default]
    Pixel,
}

/// Granularity of horizontal scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalScrollUnit {
    /// Whole characters; the character offset is always 0.
    Character,
    /// Pixels.
    #[default]
    Pixel,
}

/// When a scrollbar occupies space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBarVisibility {
    /// Never shown.
    Never,
    /// Shown only when content does not fit.
    #[default]
    IfNeeded,
    /// Always shown.
    Always,
}

/// Typing mode, which only affects the caret shape here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditOperation {
    /// Thin bar between characters.
    #[default]
    Insert,
    /// Whole character cell.
    Overwrite,
}

impl EditOperation {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            EditOperation::Insert => EditOperation::Overwrite,
            EditOperation::Overwrite => EditOperation::Insert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_encodings_report_one_byte() {
        assert_eq!(TextEncoding::Ascii.max_bytes_per_char(), Some(1));
        assert_eq!(TextEncoding::Latin1.max_bytes_per_char(), Some(1));
    }

    #[test]
    fn utf8_reports_four_bytes() {
        assert_eq!(TextEncoding::Utf8.max_bytes_per_char(), Some(4));
    }

    #[test]
    fn unknown_encoding_has_no_reported_size() {
        assert_eq!(TextEncoding::Other.max_bytes_per_char(), None);
    }

    #[test]
    fn edit_operation_toggles() {
        assert_eq!(EditOperation::Insert.toggled(), EditOperation::Overwrite);
    }
}
