/// Edge length of one tile in pixels
pub const TILE_SIZE: u32 = 16;

/// Edge length of the square board in pixels
pub const CANVAS_SIZE: u32 = 320;

/// Tick interval in milliseconds while no speed effect is active
pub const BASE_TICK_MS: u32 = 85;

/// Tick interval in milliseconds while the speed effect is active
pub const FAST_TICK_MS: u32 = 50;

/// Maximum gap between two pickups that still extends a combo
pub const COMBO_WINDOW_MS: u64 = 2000;

pub const COMBO_MULTIPLIERS: [f64; 6] = [1.0, 1.5, 2.0, 2.5, 3.0, 4.0];

/// Starting length of the primary snake
pub const DEFAULT_SNAKE_LENGTH: usize = 3;

/// Shortest snake that can be split in two
pub const MIN_SPLIT_LENGTH: usize = 6;

/// Entries kept in the high score list
pub const MAX_HIGH_SCORES: usize = 5;

/// A segment that moved further than this many tiles in one tick wrapped around the board
pub const WRAP_TELEPORT_TILES: f64 = 2.0;
