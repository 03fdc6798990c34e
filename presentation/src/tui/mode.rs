//! Key bindings for the question page
//!
//! The page has a single input field, so typing always edits the question.
//! Control chords and navigation keys drive everything else.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User action derived from key events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the question (Enter)
    Submit,
    /// Insert character into the question
    InsertChar(char),
    /// Delete character before the cursor (Backspace)
    DeleteChar,
    /// Delete character under the cursor (Delete)
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    /// Clear the question (Ctrl+U)
    ClearInput,
    /// Flip light/dark (Ctrl+T)
    ToggleTheme,
    /// Switch footnote rendering (Ctrl+F)
    ToggleFootnotes,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ToggleHelp,
    Quit,
    None,
}

/// Map a key to an action.
///
/// `?` opens help only while the question is empty so it can still be typed.
pub fn handle_key(key: KeyEvent, help_visible: bool, input_empty: bool) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            KeyCode::Char('t') => KeyAction::ToggleTheme,
            KeyCode::Char('f') => KeyAction::ToggleFootnotes,
            KeyCode::Char('u') => KeyAction::ClearInput,
            KeyCode::Char('a') => KeyAction::CursorStart,
            KeyCode::Char('e') => KeyAction::CursorEnd,
            _ => KeyAction::None,
        };
    }

    // Any key dismisses the help overlay
    if help_visible {
        return KeyAction::ToggleHelp;
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::F(1) => KeyAction::ToggleHelp,
        KeyCode::Char('?') if input_empty => KeyAction::ToggleHelp,
        KeyCode::Char(c) => KeyAction::InsertChar(c),
        KeyCode::Backspace => KeyAction::DeleteChar,
        KeyCode::Delete => KeyAction::DeleteForward,
        KeyCode::Left => KeyAction::CursorLeft,
        KeyCode::Right => KeyAction::CursorRight,
        KeyCode::Home => KeyAction::CursorStart,
        KeyCode::End => KeyAction::CursorEnd,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        _ => KeyAction::None,
    }
}
