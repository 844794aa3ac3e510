use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    /// Step by `velocity`, re-entering from the opposite edge of a `grid_size` square board.
    pub fn wrapping_add(self, velocity: Velocity, grid_size: u16) -> Position {
        let size = grid_size.max(1) as i16;
        Position {
            x: (self.x + velocity.x).rem_euclid(size),
            y: (self.y + velocity.y).rem_euclid(size),
        }
    }

    pub fn is_within(&self, grid_size: u16) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < grid_size as i16 && self.y < grid_size as i16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn velocity(&self) -> Velocity {
        match self {
            Direction::Up => Velocity::new(0, -1),
            Direction::Down => Velocity::new(0, 1),
            Direction::Left => Velocity::new(-1, 0),
            Direction::Right => Velocity::new(1, 0),
        }
    }
}

/// Per-tick displacement of a snake head. Always axis-aligned with unit length, or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub x: i16,
    pub y: i16,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0, y: 0 };

    pub const fn new(x: i16, y: i16) -> Self {
        Velocity { x, y }
    }

    pub fn negated(self) -> Velocity {
        Velocity { x: -self.x, y: -self.y }
    }

    /// A turn is allowed onto an axis the snake is not currently travelling along.
    /// Reversals and repeats of the current heading are refused.
    pub fn allows_turn(&self, turn: Velocity) -> bool {
        (turn.x != 0 && self.x == 0) || (turn.y != 0 && self.y == 0)
    }
}
