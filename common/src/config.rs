use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::{FoodTable, FoodType, Position};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tile size {tile_size} must be non-zero and divide canvas size {canvas_size}")]
    TileSize { tile_size: u32, canvas_size: u32 },
    #[error("grid of {0} tiles per side is outside the supported range 3..=1000")]
    GridSize(u32),
    #[error("tick interval must be positive (base {base_ms}ms, fast {fast_ms}ms)")]
    TickRate { base_ms: u32, fast_ms: u32 },
    #[error("combo multiplier table is empty")]
    EmptyMultipliers,
    #[error("food table has zero total spawn weight")]
    ZeroFoodWeight,
    #[error("food table has no entry for {0:?}")]
    MissingFoodType(FoodType),
    #[error("start position ({x}, {y}) with length {length} does not fit on a {grid}x{grid} board")]
    StartOutOfBounds { x: i16, y: i16, length: usize, grid: u16 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tile_size: u32,
    pub canvas_size: u32,
    pub base_tick_ms: u32,
    pub fast_tick_ms: u32,
    pub combo_window_ms: u64,
    pub combo_multipliers: Vec<f64>,
    pub start_position: Position,
    pub start_length: usize,
    pub food: FoodTable,
    /// Fixed seed for food placement and particles; random per process when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            canvas_size: CANVAS_SIZE,
            base_tick_ms: BASE_TICK_MS,
            fast_tick_ms: FAST_TICK_MS,
            combo_window_ms: COMBO_WINDOW_MS,
            combo_multipliers: COMBO_MULTIPLIERS.to_vec(),
            start_position: Position::new(10, 10),
            start_length: DEFAULT_SNAKE_LENGTH,
            food: FoodTable::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Board edge in tiles
    pub fn grid_size(&self) -> u16 {
        (self.canvas_size / self.tile_size.max(1)) as u16
    }

    /// Resize the board to `tiles` per side, keeping the tile size and re-centring the start.
    pub fn with_grid_tiles(mut self, tiles: u16) -> Self {
        self.canvas_size = self.tile_size * tiles as u32;
        let mid = (tiles / 2) as i16;
        self.start_position = Position::new(mid, mid);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse game config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config: {:?}", path))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 || self.canvas_size % self.tile_size != 0 {
            return Err(ConfigError::TileSize {
                tile_size: self.tile_size,
                canvas_size: self.canvas_size,
            });
        }
        let grid = self.canvas_size / self.tile_size;
        if !(3..=1000).contains(&grid) {
            return Err(ConfigError::GridSize(grid));
        }
        if self.base_tick_ms == 0 || self.fast_tick_ms == 0 {
            return Err(ConfigError::TickRate {
                base_ms: self.base_tick_ms,
                fast_ms: self.fast_tick_ms,
            });
        }
        if self.combo_multipliers.is_empty() {
            return Err(ConfigError::EmptyMultipliers);
        }
        if self.food.total_weight() == 0 {
            return Err(ConfigError::ZeroFoodWeight);
        }
        if let Some(missing) = FoodType::ALL.into_iter().find(|k| self.food.config_for(*k).is_none()) {
            return Err(ConfigError::MissingFoodType(missing));
        }

        // The initial body is laid out to the left of the head
        let grid = grid as u16;
        let tail_x = self.start_position.x as i32 - self.start_length as i32 + 1;
        if self.start_length == 0 || !self.start_position.is_within(grid) || tail_x < 0 {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start_position.x,
                y: self.start_position.y,
                length: self.start_length,
                grid,
            });
        }
        Ok(())
    }
}
