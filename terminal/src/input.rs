use common::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Turn(Direction),
    Switch,
    Restart,
    /// Leave the board for the scoreboard
    Back,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(GameInput::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameInput::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameInput::Turn(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameInput::Turn(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameInput::Turn(Direction::Right)),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Tab => Some(GameInput::Switch),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameInput::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(GameInput::Back),
        _ => None,
    }
}
