//! Keyboard and mouse mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use strictly_hanoi::{PegId, Route};

/// A user intent decoded from a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the application.
    Quit,
    /// Start a fresh attempt from the entry screen.
    Begin,
    /// Click a peg.
    SelectPeg(PegId),
    /// Click the peg under the cursor.
    SelectCursor,
    /// Move the cursor one peg left.
    CursorLeft,
    /// Move the cursor one peg right.
    CursorRight,
    /// Ask for a restart.
    RequestRestart,
    /// Confirm a pending restart.
    ConfirmRestart,
    /// Dismiss a pending restart.
    CancelRestart,
    /// Mouse button pressed over a peg.
    Press(PegId),
    /// Mouse button released over a peg.
    Release(PegId),
}

/// Decodes a key press for the current screen.
pub fn key_action(route: Route, restart_pending: bool, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if restart_pending {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ConfirmRestart),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CancelRestart),
            _ => None,
        };
    }

    match (route, key.code) {
        (_, KeyCode::Char('q')) => Some(Action::Quit),
        (Route::Entry, KeyCode::Enter | KeyCode::Char(' ')) => Some(Action::Begin),
        (Route::Play, KeyCode::Char(c @ '1'..='3')) => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            PegId::from_index(index).map(Action::SelectPeg)
        }
        (Route::Play, KeyCode::Left) => Some(Action::CursorLeft),
        (Route::Play, KeyCode::Right) => Some(Action::CursorRight),
        (Route::Play, KeyCode::Enter | KeyCode::Char(' ')) => Some(Action::SelectCursor),
        (Route::Play | Route::Completed, KeyCode::Char('r')) => Some(Action::RequestRestart),
        _ => None,
    }
}

/// Decodes a left-button press or release over one of the peg columns.
///
/// `columns` are the rects the pegs are drawn in, as laid out by
/// [`super::ui::peg_columns`].
pub fn mouse_action(route: Route, mouse: MouseEvent, columns: &[Rect; 3]) -> Option<Action> {
    if route != Route::Play {
        return None;
    }
    let peg = peg_at(mouse.column, mouse.row, columns)?;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Press(peg)),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::Release(peg)),
        _ => None,
    }
}

/// Finds the peg whose drawn column contains the terminal cell.
pub fn peg_at(column: u16, row: u16, columns: &[Rect; 3]) -> Option<PegId> {
    let cell = Position::new(column, row);
    columns
        .iter()
        .position(|rect| rect.contains(cell))
        .and_then(PegId::from_index)
}
