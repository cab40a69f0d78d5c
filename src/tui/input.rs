// ABOUTME: Keyboard and mouse handling for the TUI — events become actions.
// ABOUTME: Covers typing, scrolling, sending, and panel toggling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::tui::state::WidgetState;

const MOUSE_SCROLL_STEP: u16 = 3;

/// The result of processing an input event.
#[derive(Debug, PartialEq)]
pub enum InputResult {
    /// No action needed.
    None,
    /// User submitted a query.
    Send(String),
    /// User toggled panel visibility.
    Toggle,
    /// User wants to quit.
    Quit,
}

/// Process a key event against the current widget state and return the
/// resulting action.
pub fn handle_key(state: &mut WidgetState, key: KeyEvent) -> InputResult {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    // Ctrl+T toggles the panel from the keyboard.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
        return InputResult::Toggle;
    }

    // While collapsed, only quit and toggle are live.
    if !state.panel_open {
        return match key.code {
            KeyCode::Esc => InputResult::Quit,
            _ => InputResult::None,
        };
    }

    match key.code {
        KeyCode::PageUp => {
            state.scroll_offset = state.scroll_offset.saturating_add(10);
            InputResult::None
        }
        KeyCode::PageDown => {
            state.scroll_offset = state.scroll_offset.saturating_sub(10);
            InputResult::None
        }
        KeyCode::Up => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
            InputResult::None
        }
        KeyCode::Down => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
            InputResult::None
        }
        // Sending while an earlier request is outstanding is allowed; each
        // send stages its own placeholder.
        KeyCode::Enter => {
            if let Some(text) = state.submit_input() {
                InputResult::Send(text)
            } else {
                InputResult::None
            }
        }
        KeyCode::Char(c) => {
            state.insert_char_at_cursor(c);
            InputResult::None
        }
        KeyCode::Backspace => {
            state.backspace_char();
            InputResult::None
        }
        KeyCode::Delete => {
            state.delete_char_at_cursor();
            InputResult::None
        }
        KeyCode::Left => {
            state.move_cursor_left();
            InputResult::None
        }
        KeyCode::Right => {
            state.move_cursor_right();
            InputResult::None
        }
        KeyCode::Home => {
            state.move_cursor_home();
            InputResult::None
        }
        KeyCode::End => {
            state.move_cursor_end();
            InputResult::None
        }
        KeyCode::Esc => InputResult::Quit,
        _ => InputResult::None,
    }
}

/// Process a mouse event against the current widget state.
pub fn handle_mouse(state: &mut WidgetState, event: MouseEvent) -> InputResult {
    match event.kind {
        MouseEventKind::ScrollUp if state.panel_open => {
            state.scroll_offset = state.scroll_offset.saturating_add(MOUSE_SCROLL_STEP);
            InputResult::None
        }
        MouseEventKind::ScrollDown if state.panel_open => {
            state.scroll_offset = state.scroll_offset.saturating_sub(MOUSE_SCROLL_STEP);
            InputResult::None
        }
        MouseEventKind::Down(MouseButton::Left) if event.row == 0 => {
            // Clicks anywhere on the header toggle, including the [-]/[+]
            // control at the right edge. One dispatcher covers both
            // regions, so a click on the control cannot double-toggle the
            // way two stacked handlers would.
            InputResult::Toggle
        }
        _ => InputResult::None,
    }
}
