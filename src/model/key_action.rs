//! Domain-level keyboard actions independent of key bindings.

use super::view_mode::ViewMode;
use crate::view_state::caret::MovementDirection;
use crate::view_state::scroll::ScrollingDirection;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the caret, dropping any selection. Default: arrows, hjkl, Home/End
    MoveCaret(MovementDirection),
    /// Move the caret, extending the selection. Default: Shift+arrows
    ExtendSelection(MovementDirection),
    /// Scroll the viewport without moving the caret. Default: Ctrl+arrows
    Scroll(ScrollingDirection),
    /// Center the viewport on the caret. Default: c
    CenterOnCaret,
    /// Cycle to the next numeric code type. Default: t
    CycleCodeType,
    /// Switch the view mode. Default: F1/F2/F3
    SetViewMode(ViewMode),
    /// Toggle uppercase/lowercase digits. Default: u
    ToggleCase,
    /// Toggle row wrapping. Default: w
    ToggleWrapping,
    /// Toggle insert/overwrite caret shape. Default: Insert
    ToggleEditOperation,
    /// Select the whole document. Default: Ctrl+a
    SelectAll,
    /// Quit. Default: q, Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether this action changes the caret position.
    pub fn moves_caret(self) -> bool {
        matches!(
            self,
            KeyAction::MoveCaret(_) | KeyAction::ExtendSelection(_) | KeyAction::SelectAll
        )
    }
}
