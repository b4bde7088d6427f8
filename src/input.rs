//! Keyboard handling: maps terminal key events onto game actions.

use crate::runner::{RunnerGame, RunnerInput};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue the game loop normally.
    Continue,
    /// Leave the game and restore the terminal.
    Quit,
}

/// Logical action behind a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(RunnerInput),
    Quit,
    /// Releases and auto-repeats.
    Ignored,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignored;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => KeyAction::Game(RunnerInput::Jump),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        _ => KeyAction::Game(RunnerInput::Other),
    }
}

/// Apply a key event to the game.
pub fn handle_key<R: Rng>(key: KeyEvent, game: &mut RunnerGame<R>) -> InputResult {
    match map_key(key) {
        KeyAction::Game(input) => {
            game.process_input(input);
            InputResult::Continue
        }
        KeyAction::Quit => InputResult::Quit,
        KeyAction::Ignored => InputResult::Continue,
    }
}
