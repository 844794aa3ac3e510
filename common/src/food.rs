use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::util::RandomGenerator;
use crate::{Effect, Position, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Normal,
    Golden,
    Speed,
    Ghost,
    Split,
}

impl FoodType {
    pub const ALL: [FoodType; 5] = [
        FoodType::Normal,
        FoodType::Golden,
        FoodType::Speed,
        FoodType::Ghost,
        FoodType::Split,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodTypeConfig {
    pub kind: FoodType,
    pub spawn_weight: u32,
    pub points: u32,
    pub growth: usize,
    pub effect: Option<Effect>,
    pub effect_duration_ms: u64,
}

/// Static spawn table. Entry order is the order of the cumulative-weight draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodTable {
    pub entries: Vec<FoodTypeConfig>,
}

impl Default for FoodTable {
    fn default() -> Self {
        let entry = |kind, spawn_weight, points, growth, effect, effect_duration_ms| FoodTypeConfig {
            kind,
            spawn_weight,
            points,
            growth,
            effect,
            effect_duration_ms,
        };
        FoodTable {
            entries: vec![
                entry(FoodType::Normal, 50, 10, 1, None, 0),
                entry(FoodType::Golden, 18, 25, 3, None, 0),
                entry(FoodType::Speed, 12, 15, 1, Some(Effect::Speed), 5000),
                entry(FoodType::Ghost, 10, 20, 1, Some(Effect::Ghost), 4000),
                entry(FoodType::Split, 10, 30, 0, Some(Effect::Split), 8000),
            ],
        }
    }
}

impl FoodTable {
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|e| e.spawn_weight).sum()
    }

    pub fn config_for(&self, kind: FoodType) -> Option<&FoodTypeConfig> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Cumulative-weight draw: `roll` is uniform in [0, total_weight).
    /// Subtract each weight in turn and take the first entry where the running value drops to zero or below.
    pub fn select(&self, roll: f64) -> &FoodTypeConfig {
        let mut remaining = roll;
        for entry in self.entries.iter().filter(|e| e.spawn_weight > 0) {
            remaining -= entry.spawn_weight as f64;
            if remaining <= 0.0 {
                return entry;
            }
        }
        // Only reachable through float rounding at the top of the range
        self.config_for(FoodType::Normal)
            .or_else(|| self.entries.last())
            .expect("food table validated non-empty")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    pub config: FoodTypeConfig,
}

impl Food {
    pub fn kind(&self) -> FoodType {
        self.config.kind
    }
}

pub struct FoodSpawner<'a> {
    grid_size: u16,
    table: &'a FoodTable,
}

impl<'a> FoodSpawner<'a> {
    pub fn new(grid_size: u16, table: &'a FoodTable) -> Self {
        FoodSpawner { grid_size, table }
    }

    /// Rejection-sample a free tile, then draw a type from the weight table.
    /// Returns `None` only when every tile is covered by a snake.
    pub fn spawn(&self, snakes: &[Snake], rng: &mut dyn RandomGenerator) -> Option<Food> {
        let occupied: HashSet<Position> = snakes.iter().flat_map(|s| s.body.iter().copied()).collect();
        let cells = self.grid_size as usize * self.grid_size as usize;
        if occupied.len() >= cells {
            return None;
        }

        let position = loop {
            let candidate = Position::new(
                rng.random_below(self.grid_size as u32) as i16,
                rng.random_below(self.grid_size as u32) as i16,
            );
            if !occupied.contains(&candidate) {
                break candidate;
            }
        };

        let roll = rng.random_f64() * self.table.total_weight() as f64;
        Some(Food {
            position,
            config: self.table.select(roll).clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::PseudoRandom;
    use crate::Direction;
    use std::collections::HashMap;

    #[test]
    fn test_select_boundaries() {
        let table = FoodTable::default();
        assert_eq!(table.select(0.0).kind, FoodType::Normal);
        assert_eq!(table.select(50.0).kind, FoodType::Normal);
        assert_eq!(table.select(50.5).kind, FoodType::Golden);
        assert_eq!(table.select(68.0).kind, FoodType::Golden);
        assert_eq!(table.select(79.9).kind, FoodType::Speed);
        assert_eq!(table.select(89.9).kind, FoodType::Ghost);
        assert_eq!(table.select(99.9).kind, FoodType::Split);
    }

    #[test]
    fn test_zero_weight_entries_never_selected() {
        let mut table = FoodTable::default();
        table.entries[0].spawn_weight = 0;
        assert_eq!(table.select(0.0).kind, FoodType::Golden);
    }

    #[test]
    fn test_spawn_never_lands_on_snake() {
        let table = FoodTable::default();
        let spawner = FoodSpawner::new(6, &table);
        let mut rng = PseudoRandom::new(99);
        // Two rows of a 6x6 board are covered
        let snakes = vec![
            Snake::new(Position::new(5, 0), 6, Direction::Right),
            Snake::new(Position::new(5, 1), 6, Direction::Right),
        ];
        for _ in 0..2_000 {
            let food = spawner.spawn(&snakes, &mut rng).unwrap();
            assert!(food.position.is_within(6));
            assert!(snakes.iter().all(|s| !s.contains_point(&food.position)));
        }
    }

    #[test]
    fn test_spawn_finds_last_free_tile() {
        let table = FoodTable::default();
        let spawner = FoodSpawner::new(2, &table);
        let mut rng = PseudoRandom::new(5);
        let snake = Snake::with_body(
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)],
            Direction::Up.velocity(),
        );
        let food = spawner.spawn(&[snake], &mut rng).unwrap();
        assert_eq!(food.position, Position::new(0, 1));
    }

    #[test]
    fn test_spawn_on_full_board_returns_none() {
        let table = FoodTable::default();
        let spawner = FoodSpawner::new(2, &table);
        let mut rng = PseudoRandom::new(5);
        let snake = Snake::with_body(
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1), Position::new(0, 1)],
            Direction::Up.velocity(),
        );
        assert!(spawner.spawn(&[snake], &mut rng).is_none());
    }

    #[test]
    fn test_type_frequencies_match_weights() {
        let table = FoodTable::default();
        let spawner = FoodSpawner::new(20, &table);
        let mut rng = PseudoRandom::new(2024);
        let draws = 50_000;
        let mut counts: HashMap<FoodType, u32> = HashMap::new();
        for _ in 0..draws {
            let food = spawner.spawn(&[], &mut rng).unwrap();
            *counts.entry(food.kind()).or_default() += 1;
        }

        // Chi-squared with 4 degrees of freedom; 18.47 is the 0.001 critical value
        let total = table.total_weight() as f64;
        let chi_squared: f64 = table
            .entries
            .iter()
            .map(|e| {
                let expected = draws as f64 * e.spawn_weight as f64 / total;
                let observed = *counts.get(&e.kind).unwrap_or(&0) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum();
        assert!(chi_squared < 18.47, "chi-squared too large: {chi_squared}");
    }
}
