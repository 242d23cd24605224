//! Key bindings: arrows, W/Q rotation, and vim-style keys.

use blockdrop::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Quit,
    None,
}

/// Map key event to game action while playing.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL {
        return match code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Left | KeyCode::Char('h') => Action::Game(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Action::Game(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j') => Action::Game(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Action::Game(Command::RotateCw),
        KeyCode::Char('q' | 'Q' | 'u') => Action::Game(Command::RotateCcw),
        KeyCode::Char('p' | 'P') => Action::Game(Command::TogglePause),
        _ => Action::None,
    }
}
