//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::ViewMode;
use crate::view_state::caret::MovementDirection;
use crate::view_state::scroll::ScrollingDirection;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Arrows and vim keys move the caret; Shift extends the selection and
/// Ctrl scrolls the view without moving the caret.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }

    /// Bind `code` to caret movement, Shift+`code` to selection and,
    /// when given, Ctrl+`code` to scrolling.
    fn bind_movement(
        &mut self,
        code: KeyCode,
        direction: MovementDirection,
        scroll: Option<ScrollingDirection>,
    ) {
        self.bind(code, KeyModifiers::NONE, KeyAction::MoveCaret(direction));
        self.bind(code, KeyModifiers::SHIFT, KeyAction::ExtendSelection(direction));
        if let Some(scroll) = scroll {
            self.bind(code, KeyModifiers::CONTROL, KeyAction::Scroll(scroll));
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use MovementDirection as Move;
        use ScrollingDirection as Scroll;

        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Arrows
        bindings.bind_movement(KeyCode::Left, Move::Left, Some(Scroll::Left));
        bindings.bind_movement(KeyCode::Right, Move::Right, Some(Scroll::Right));
        bindings.bind_movement(KeyCode::Up, Move::Up, Some(Scroll::Up));
        bindings.bind_movement(KeyCode::Down, Move::Down, Some(Scroll::Down));

        // Vim-style
        bindings.bind(KeyCode::Char('h'), KeyModifiers::NONE, KeyAction::MoveCaret(Move::Left));
        bindings.bind(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::MoveCaret(Move::Right));
        bindings.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::MoveCaret(Move::Up));
        bindings.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::MoveCaret(Move::Down));
        bindings.bind(
            KeyCode::Char('g'),
            KeyModifiers::NONE,
            KeyAction::MoveCaret(Move::DocStart),
        );
        bindings.bind(
            KeyCode::Char('G'),
            KeyModifiers::SHIFT,
            KeyAction::MoveCaret(Move::DocEnd),
        );

        // Row and page navigation
        bindings.bind_movement(KeyCode::Home, Move::RowStart, None);
        bindings.bind_movement(KeyCode::End, Move::RowEnd, None);
        bindings.bind_movement(KeyCode::PageUp, Move::PageUp, Some(Scroll::PageUp));
        bindings.bind_movement(KeyCode::PageDown, Move::PageDown, Some(Scroll::PageDown));
        bindings.bind(KeyCode::Home, KeyModifiers::CONTROL, KeyAction::MoveCaret(Move::DocStart));
        bindings.bind(KeyCode::End, KeyModifiers::CONTROL, KeyAction::MoveCaret(Move::DocEnd));
        bindings.bind(
            KeyCode::Home,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            KeyAction::ExtendSelection(Move::DocStart),
        );
        bindings.bind(
            KeyCode::End,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            KeyAction::ExtendSelection(Move::DocEnd),
        );

        // Section switching
        bindings.bind(
            KeyCode::Tab,
            KeyModifiers::NONE,
            KeyAction::MoveCaret(Move::SwitchSection),
        );
        bindings.bind(
            KeyCode::BackTab,
            KeyModifiers::SHIFT,
            KeyAction::MoveCaret(Move::SwitchSection),
        );

        // View settings
        bindings.bind(KeyCode::Char('c'), KeyModifiers::NONE, KeyAction::CenterOnCaret);
        bindings.bind(KeyCode::Char('t'), KeyModifiers::NONE, KeyAction::CycleCodeType);
        bindings.bind(KeyCode::Char('u'), KeyModifiers::NONE, KeyAction::ToggleCase);
        bindings.bind(KeyCode::Char('w'), KeyModifiers::NONE, KeyAction::ToggleWrapping);
        bindings.bind(KeyCode::Insert, KeyModifiers::NONE, KeyAction::ToggleEditOperation);
        bindings.bind(
            KeyCode::F(1),
            KeyModifiers::NONE,
            KeyAction::SetViewMode(ViewMode::Dual),
        );
        bindings.bind(
            KeyCode::F(2),
            KeyModifiers::NONE,
            KeyAction::SetViewMode(ViewMode::CodeMatrix),
        );
        bindings.bind(
            KeyCode::F(3),
            KeyModifiers::NONE,
            KeyAction::SetViewMode(ViewMode::TextPreview),
        );

        // Application controls
        bindings.bind(KeyCode::Char('a'), KeyModifiers::CONTROL, KeyAction::SelectAll);
        bindings.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bindings.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        bindings
    }
}
