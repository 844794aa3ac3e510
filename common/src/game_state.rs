use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::combo::award_points;
use crate::util::PseudoRandom;
use crate::{
    ComboState, Direction, Effect, Food, FoodSpawner, FoodType, GameConfig, Position, PowerupState, Snake, SnakeRole,
};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Tick { now_ms: u64 },
    Turn { direction: Direction },
    SwitchActive,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCause {
    SelfCollision { snake_index: usize },
    CrossSnake { snake_index: usize, other_index: usize },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GameEvent {
    TrailSample { snake_index: usize, position: Position, ghost: bool, role: SnakeRole },
    SnakeTurned { snake_index: usize, direction: Direction },
    FoodEaten { snake_index: usize, position: Position, kind: FoodType, points: u32, combo: usize },
    FoodSpawned { position: Position, kind: FoodType },
    SnakeSplit { parent_index: usize, snake_index: usize, head: Position },
    ActiveSwitched { snake_index: usize, head: Position },
    PowerupActivated { effect: Effect, expires_at_ms: u64 },
    PowerupExpired { effect: Effect },
    ComboReset,
    GameOver { score: u32, cause: CollisionCause },
}

/// Read-only readout for the UI layer, refreshed after every tick.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u32,
    pub total_segments: usize,
    pub combo_count: usize,
    pub active_effect: Option<Effect>,
    pub effect_remaining_ms: u64,
    pub live_snakes: usize,
    /// 1-based position of the controlled snake
    pub active_ordinal: usize,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub tick: u64,
    pub grid_size: u16,
    /// Creation order; index 0 is the primary snake
    pub snakes: Vec<Snake>,
    pub active_index: usize,
    pub food: Option<Food>,
    pub powerup: PowerupState,
    pub combo: ComboState,
    pub score: u32,
    pub tick_rate_ms: u32,
    pub running: bool,
    pub hud: HudSnapshot,
    config: GameConfig,
    rng: PseudoRandom,
}

impl GameState {
    /// A fresh, not yet running board: one primary snake and the first food.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let primary = Snake::new(config.start_position, config.start_length, Direction::Right);
        let mut state = GameState {
            tick: 0,
            grid_size: config.grid_size(),
            snakes: vec![primary],
            active_index: 0,
            food: None,
            powerup: PowerupState::default(),
            combo: ComboState::default(),
            score: 0,
            tick_rate_ms: config.base_tick_ms,
            running: false,
            hud: HudSnapshot::default(),
            config: config.clone(),
            rng: PseudoRandom::new(seed),
        };
        state.food = FoodSpawner::new(state.grid_size, &state.config.food).spawn(&state.snakes, &mut state.rng);
        state.refresh_hud(0);
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn active_snake(&self) -> &Snake {
        &self.snakes[self.active_index]
    }

    pub fn total_segments(&self) -> usize {
        self.snakes.iter().map(Snake::len).sum()
    }

    pub fn exec_command(&mut self, command: GameCommand) -> Vec<GameEvent> {
        let mut out = Vec::new();
        if !self.running {
            return out;
        }

        match command {
            GameCommand::Tick { now_ms } => self.tick(now_ms, &mut out),

            GameCommand::Turn { direction } => {
                let snake_index = self.active_index;
                let snake = &mut self.snakes[snake_index];
                let before = snake.pending_velocity();
                snake.set_direction(direction);
                if snake.pending_velocity() != before {
                    out.push(GameEvent::SnakeTurned { snake_index, direction });
                }
            }

            GameCommand::SwitchActive => {
                if self.snakes.len() > 1 {
                    self.snakes[self.active_index].is_active = false;
                    self.active_index = (self.active_index + 1) % self.snakes.len();
                    let snake = &mut self.snakes[self.active_index];
                    snake.is_active = true;
                    debug!("Control switched to snake {}", self.active_index);
                    out.push(GameEvent::ActiveSwitched {
                        snake_index: self.active_index,
                        head: snake.head(),
                    });
                }
            }
        }

        out
    }

    fn tick(&mut self, now_ms: u64, out: &mut Vec<GameEvent>) {
        if let Some(effect) = self.powerup.expire_if_due(now_ms) {
            self.tick_rate_ms = self.config.base_tick_ms;
            debug!("{:?} expired", effect);
            out.push(GameEvent::PowerupExpired { effect });
        }

        if self.combo.decay(now_ms, self.config.combo_window_ms) {
            out.push(GameEvent::ComboReset);
        }

        let ghost = self.powerup.is_ghost();

        // Snakes split off during this tick start moving on the next one
        let movers = self.snakes.len();
        for snake_index in 0..movers {
            let snake = &mut self.snakes[snake_index];
            snake.save_previous();
            out.push(GameEvent::TrailSample {
                snake_index,
                position: snake.head(),
                ghost,
                role: snake.role,
            });

            snake.move_head(self.grid_size);
            if snake.check_self_collision(ghost) {
                self.game_over(CollisionCause::SelfCollision { snake_index }, now_ms, out);
                return;
            }
        }

        // Cross hits are checked against fully advanced bodies, before anyone eats
        let active = self.active_index;
        if movers > 1 && !ghost {
            let mover = &self.snakes[active];
            let hit = self
                .snakes
                .iter()
                .enumerate()
                .find(|(other_index, other)| *other_index != active && mover.check_collision_with(other))
                .map(|(other_index, _)| other_index);
            if let Some(other_index) = hit {
                self.game_over(
                    CollisionCause::CrossSnake {
                        snake_index: active,
                        other_index,
                    },
                    now_ms,
                    out,
                );
                return;
            }
        }

        // Only the controlled snake can eat; everything else keeps its length
        let active_head = self.snakes[active].head();
        let on_food = self.food.as_ref().is_some_and(|food| food.position == active_head);
        for snake_index in 0..movers {
            if snake_index == active && on_food {
                self.eat(snake_index, now_ms, out);
            } else {
                self.snakes[snake_index].pop_tail();
            }
        }

        self.tick += 1;
        self.refresh_hud(now_ms);
    }

    fn eat(&mut self, snake_index: usize, now_ms: u64, out: &mut Vec<GameEvent>) {
        let Some(food) = self.food.take() else {
            return;
        };

        let multiplier =
            self.combo.register_eat(now_ms, self.config.combo_window_ms, &self.config.combo_multipliers);
        let points = award_points(food.config.points, multiplier);
        self.score = self.score.saturating_add(points);
        debug!(
            "Snake {} ate {:?} for {} points (combo {})",
            snake_index,
            food.kind(),
            points,
            self.combo.count()
        );
        out.push(GameEvent::FoodEaten {
            snake_index,
            position: food.position,
            kind: food.kind(),
            points,
            combo: self.combo.count(),
        });

        if food.config.growth > 0 {
            self.snakes[snake_index].grow(food.config.growth);
        }

        if let Some(effect) = food.config.effect {
            self.powerup.activate(effect, now_ms, food.config.effect_duration_ms);
            self.tick_rate_ms = self.powerup.tick_rate_ms(self.config.base_tick_ms, self.config.fast_tick_ms);
            out.push(GameEvent::PowerupActivated {
                effect,
                expires_at_ms: self.powerup.expires_at_ms(),
            });

            if effect == Effect::Split {
                self.try_split(snake_index, out);
            }
        }

        self.respawn_food(out);
    }

    fn try_split(&mut self, parent_index: usize, out: &mut Vec<GameEvent>) {
        let Some(offspring) = self.snakes[parent_index].split() else {
            debug!("Snake {} too short to split", parent_index);
            return;
        };
        let head = offspring.head();
        self.snakes.push(offspring);
        let snake_index = self.snakes.len() - 1;
        debug!("Snake {} split off snake {}", parent_index, snake_index);
        out.push(GameEvent::SnakeSplit {
            parent_index,
            snake_index,
            head,
        });
    }

    fn respawn_food(&mut self, out: &mut Vec<GameEvent>) {
        self.food = FoodSpawner::new(self.grid_size, &self.config.food).spawn(&self.snakes, &mut self.rng);
        match &self.food {
            Some(food) => out.push(GameEvent::FoodSpawned {
                position: food.position,
                kind: food.kind(),
            }),
            None => warn!("Board is full, no tile left for food"),
        }
    }

    fn game_over(&mut self, cause: CollisionCause, now_ms: u64, out: &mut Vec<GameEvent>) {
        self.running = false;
        self.refresh_hud(now_ms);
        info!("Game over at tick {} with score {} ({:?})", self.tick, self.score, cause);
        out.push(GameEvent::GameOver {
            score: self.score,
            cause,
        });
    }

    fn refresh_hud(&mut self, now_ms: u64) {
        self.hud = HudSnapshot {
            score: self.score,
            total_segments: self.total_segments(),
            combo_count: self.combo.count(),
            active_effect: self.powerup.active(),
            effect_remaining_ms: self.powerup.remaining_ms(now_ms),
            live_snakes: self.snakes.len(),
            active_ordinal: self.active_index + 1,
        };
    }
}
