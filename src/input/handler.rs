use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Longest player name accepted at the high-score prompt
pub const MAX_NAME_LEN: usize = 16;

/// Key meaning during play and on the menu screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Restart,
    ShowLeaderboard,
    Quit,
    None,
}

/// Key meaning while typing a name for the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKey {
    Insert(char),
    Backspace,
    Submit,
    Skip,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('l') | KeyCode::Char('L') => KeyAction::ShowLeaderboard,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Map a key during name entry; `current_len` is the name length so far
    pub fn handle_name_key(&self, key: KeyEvent, current_len: usize) -> NameKey {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => NameKey::Quit,
                _ => NameKey::None,
            };
        }

        match key.code {
            KeyCode::Enter => NameKey::Submit,
            KeyCode::Esc => NameKey::Skip,
            KeyCode::Backspace => NameKey::Backspace,
            KeyCode::Char(c) if !c.is_control() && current_len < MAX_NAME_LEN => {
                NameKey::Insert(c)
            }
            _ => NameKey::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
