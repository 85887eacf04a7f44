//! Keyboard and mouse input handling for the TUI.
//!
//! Translates terminal events into high-level actions and applies those
//! actions to the application state.
//!
//! # Key Bindings
//!
//! | Key         | Action                |
//! |-------------|-----------------------|
//! | `c`         | Capture location      |
//! | `x`         | Clear locations       |
//! | `t` / `d`   | Toggle dark mode      |
//! | `↓` / `j`   | Select next           |
//! | `↑` / `k`   | Select previous       |
//! | `?`         | Toggle help           |
//! | `Esc`       | Close help            |
//! | `q`         | Quit                  |
//!
//! While the permission alert is open only `Enter` and `Esc` are handled;
//! while a confirmation is pending only `y`, `n` and `Esc`.

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use super::app::App;
use mylocation_core::Command;

/// User actions that can be triggered by keyboard or mouse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Capture the current position.
    Capture,
    /// Ask to delete every saved location.
    Clear,
    /// Flip dark mode.
    ToggleDarkMode,
    /// Select the next record.
    SelectNext,
    /// Select the previous record.
    SelectPrevious,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Close the alert or the help overlay.
    Dismiss,
    /// Mouse click at coordinates.
    MouseClick { x: u16, y: u16 },
    /// Confirm pending action.
    Confirm,
    /// Cancel pending action.
    Cancel,
    /// No action (unrecognized key).
    None,
}

/// Map a key code to an action.
///
/// # Arguments
///
/// * `key` - The key code from a keyboard event
/// * `has_alert` - Whether the permission alert is showing
/// * `has_pending_confirmation` - Whether there is a pending confirmation dialog
pub fn handle_key(key: KeyCode, has_alert: bool, has_pending_confirmation: bool) -> Action {
    if has_alert {
        return match key {
            KeyCode::Enter | KeyCode::Esc => Action::Dismiss,
            _ => Action::None,
        };
    }

    // When a confirmation dialog is active, only handle Y/N keys
    if has_pending_confirmation {
        return match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        };
    }

    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') => Action::Capture,
        KeyCode::Char('x') => Action::Clear,
        KeyCode::Char('t') | KeyCode::Char('d') => Action::ToggleDarkMode,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::Dismiss,
        _ => Action::None,
    }
}

/// Handle mouse events and return corresponding action.
pub fn handle_mouse(event: MouseEvent) -> Action {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::MouseClick {
            x: event.column,
            y: event.row,
        },
        MouseEventKind::ScrollDown => Action::SelectNext,
        MouseEventKind::ScrollUp => Action::SelectPrevious,
        _ => Action::None,
    }
}

/// Apply an action to the application state.
///
/// Returns `Some(Command)` if the worker has to act, `None` if the action was
/// handled entirely within the UI.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    match action {
        Action::Quit => {
            app.should_quit = true;
            None
        }
        Action::Capture => app.request_capture(),
        Action::Clear => {
            app.request_clear();
            None
        }
        Action::ToggleDarkMode => Some(app.toggle_dark_mode()),
        Action::SelectNext => {
            app.select_next();
            None
        }
        Action::SelectPrevious => {
            app.select_previous();
            None
        }
        Action::ToggleHelp => {
            app.toggle_help();
            None
        }
        Action::Dismiss => {
            if app.alert.is_some() {
                app.dismiss_alert();
            } else {
                app.show_help = false;
            }
            None
        }
        Action::MouseClick { x, y } => app.handle_click(x, y),
        Action::Confirm => app.confirm_action(),
        Action::Cancel => {
            if app.pending_confirmation.is_some() {
                app.cancel_confirmation();
            }
            None
        }
        Action::None => None,
    }
}
