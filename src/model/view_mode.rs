//! Which sections a row shows and how rows wrap.

use super::error::LayoutError;
use serde::Deserialize;
use std::str::FromStr;

/// Sections displayed on each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Code matrix and text preview side by side.
    #[default]
    Dual,
    /// Code matrix only.
    CodeMatrix,
    /// Text preview only.
    TextPreview,
}

impl ViewMode {
    /// Whether the code matrix section is shown.
    pub fn has_code(self) -> bool {
        self != ViewMode::TextPreview
    }

    /// Whether the text preview section is shown.
    pub fn has_preview(self) -> bool {
        self != ViewMode::CodeMatrix
    }

    /// Section the caret lands in when the current one is not shown.
    pub fn default_section(self) -> Section {
        match self {
            ViewMode::TextPreview => Section::TextPreview,
            ViewMode::Dual | ViewMode::CodeMatrix => Section::CodeMatrix,
        }
    }

    /// Whether `section` is displayed in this mode.
    pub fn shows(self, section: Section) -> bool {
        match section {
            Section::CodeMatrix => self.has_code(),
            Section::TextPreview => self.has_preview(),
        }
    }
}

impl FromStr for ViewMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "dual" => Ok(ViewMode::Dual),
            "code_matrix" | "code" => Ok(ViewMode::CodeMatrix),
            "text_preview" | "text" | "preview" => Ok(ViewMode::TextPreview),
            _ => Err(LayoutError::invalid("view_mode", format!("unknown view mode '{s}'"))),
        }
    }
}

/// Section of the row the caret is active in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    /// Numeric digits.
    #[default]
    CodeMatrix,
    /// One decoded character per byte.
    TextPreview,
}

impl Section {
    /// The other section.
    pub fn toggled(self) -> Self {
        match self {
            Section::CodeMatrix => Section::TextPreview,
            Section::TextPreview => Section::CodeMatrix,
        }
    }
}

/// Whether bytes per row follow the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowWrapping {
    /// Bytes per row is fixed by configuration.
    #[default]
    NoWrapping,
    /// Bytes per row is derived from the available columns.
    Wrapping,
}

impl RowWrapping {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            RowWrapping::NoWrapping => RowWrapping::Wrapping,
            RowWrapping::Wrapping => RowWrapping::NoWrapping,
        }
    }
}
