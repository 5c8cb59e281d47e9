//! Input module - keyboard mapping for game controls
//!
//! Translates crossterm key events into [`Intent`] values. No game state
//! lives here; raw key codes never travel past this table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Intent;

/// Map keyboard input to player intents
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    match key.code {
        // Movement
        KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Down => Some(Intent::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('e') => Some(Intent::RotateCw),
        KeyCode::Char('w') => Some(Intent::RotateCcw),
        KeyCode::Char('a') => Some(Intent::Rotate180),

        // Drop
        KeyCode::Char(' ') => Some(Intent::HardDrop),

        _ => None,
    }
}

/// Check if key should quit the game
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
