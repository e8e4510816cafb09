//! Cell styling for the hex component.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== HexStyles =====

/// Styles for each part of the component.
///
/// Without colors, selection and caret fall back to text modifiers so
/// both stay visible on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexStyles {
    /// Column header.
    pub header: Style,
    /// Row-position gutter.
    pub gutter: Style,
    /// Code matrix digits.
    pub code: Style,
    /// Text preview characters.
    pub preview: Style,
    /// Selected cells.
    pub selection: Style,
    /// Cell under the caret.
    pub caret: Style,
    /// Byte under the caret in the other section.
    pub mirror_caret: Style,
    /// Status bar.
    pub status: Style,
    /// Scrollbar thumb.
    pub scrollbar: Style,
}

impl HexStyles {
    /// Styles for `config`.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let caret = Style::default().add_modifier(Modifier::REVERSED);
        let mirror_caret = Style::default().add_modifier(Modifier::UNDERLINED);
        if config.colors_enabled() {
            Self {
                header: Style::default().fg(Color::Cyan),
                gutter: Style::default().fg(Color::Cyan),
                code: Style::default(),
                preview: Style::default().fg(Color::Green),
                selection: Style::default().bg(Color::Blue).fg(Color::White),
                caret,
                mirror_caret,
                status: Style::default().bg(Color::DarkGray).fg(Color::White),
                scrollbar: Style::default().fg(Color::Gray),
            }
        } else {
            Self {
                header: Style::default(),
                gutter: Style::default(),
                code: Style::default(),
                preview: Style::default(),
                selection: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                caret,
                mirror_caret,
                status: Style::default().add_modifier(Modifier::REVERSED),
                scrollbar: Style::default(),
            }
        }
    }
}

impl Default for HexStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
