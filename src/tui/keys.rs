/// Keyboard event to action mapping
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use super::action::Action;

pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    trace!("KEY: {:?}", key);

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveDays(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveDays(1)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveMonths(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveMonths(1)),
        KeyCode::Char('t') => Some(Action::JumpToToday),
        KeyCode::Char('r') => Some(Action::RefreshBounds),
        _ => None,
    }
}
