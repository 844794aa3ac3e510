use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::MIN_SPLIT_LENGTH;
use crate::{Direction, Position, Velocity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeRole {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Head first, tail last
    pub body: VecDeque<Position>,
    /// Body as it was before the latest move, for render interpolation
    prev_body: Vec<Position>,
    pub velocity: Velocity,
    pending_velocity: Velocity,
    pub role: SnakeRole,
    pub is_active: bool,
}

impl Snake {
    /// A primary, active snake of `length` tiles laid out behind `head`, travelling `direction`.
    pub fn new(head: Position, length: usize, direction: Direction) -> Self {
        let velocity = direction.velocity();
        let body = (0..length.max(1) as i16)
            .map(|i| Position::new(head.x - velocity.x * i, head.y - velocity.y * i))
            .collect();
        Self::with_body(body, velocity)
    }

    pub fn with_body(body: Vec<Position>, velocity: Velocity) -> Self {
        let body: VecDeque<Position> = body.into();
        Snake {
            prev_body: body.iter().copied().collect(),
            body,
            velocity,
            pending_velocity: velocity,
            role: SnakeRole::Primary,
            is_active: true,
        }
    }

    pub fn head(&self) -> Position {
        *self.body.front().expect("Snake body should not be empty")
    }

    pub fn tail(&self) -> Position {
        *self.body.back().expect("Snake body should not be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn pending_velocity(&self) -> Velocity {
        self.pending_velocity
    }

    pub fn previous_body(&self) -> &[Position] {
        &self.prev_body
    }

    pub fn contains_point(&self, point: &Position) -> bool {
        self.body.contains(point)
    }

    /// Buffer a turn for the next move. Turns onto the current axis are ignored; the last accepted call wins.
    pub fn set_direction(&mut self, direction: Direction) {
        let turn = direction.velocity();
        if self.velocity.allows_turn(turn) {
            self.pending_velocity = turn;
        }
    }

    /// Copy the body into the interpolation snapshot, reusing its allocation.
    pub fn save_previous(&mut self) {
        self.prev_body.clear();
        self.prev_body.extend(self.body.iter().copied());
    }

    /// Apply the buffered turn and push a new head. The caller decides whether the tail is popped.
    pub fn move_head(&mut self, grid_size: u16) -> Position {
        self.velocity = self.pending_velocity;
        let head = self.head().wrapping_add(self.velocity, grid_size);
        self.body.push_front(head);
        head
    }

    /// Stack `amount` copies of the tail; they are pulled forward over the next ticks.
    pub fn grow(&mut self, amount: usize) {
        let tail = self.tail();
        self.body.extend(std::iter::repeat_n(tail, amount));
    }

    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    pub fn check_self_collision(&self, ghost: bool) -> bool {
        if ghost {
            return false;
        }
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// True when this head sits on any segment of `other`, its head included.
    pub fn check_collision_with(&self, other: &Snake) -> bool {
        other.contains_point(&self.head())
    }

    /// Cut the body at `len / 2`. The head half stays here; the tail half becomes an inactive
    /// secondary snake led by the old tail tip and travelling opposite to this snake.
    pub fn split(&mut self) -> Option<Snake> {
        if self.body.len() < MIN_SPLIT_LENGTH {
            return None;
        }

        let half = self.body.len() / 2;
        let tail_half: Vec<Position> = self.body.split_off(half).into_iter().rev().collect();
        self.prev_body.truncate(half);

        let mut offspring = Snake::with_body(tail_half, self.velocity.negated());
        offspring.role = SnakeRole::Secondary;
        offspring.is_active = false;
        Some(offspring)
    }
}
