use crate::constants::WRAP_TELEPORT_TILES;
use crate::{GameState, ParticleSystem, Position, Snake};

/// Everything a renderer may read for one display frame.
pub struct FrameView<'a> {
    pub state: &'a GameState,
    pub particles: &'a ParticleSystem,
    /// Progress from the previous tick towards the next, in [0, 1)
    pub alpha: f64,
    /// Wall-clock time for food pulses and other free-running animation
    pub now_ms: u64,
    pub tile_size: f64,
}

pub trait FrameRenderer {
    fn draw_frame(&mut self, frame: &FrameView<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Blend a segment from its previous tile to its current one. Jumps wider than
/// two tiles are wraparounds and snap to the current tile.
pub fn interpolate_segment(previous: Option<Position>, current: Position, alpha: f64, tile_size: f64) -> PixelPoint {
    let to = PixelPoint {
        x: current.x as f64 * tile_size,
        y: current.y as f64 * tile_size,
    };
    let Some(previous) = previous else {
        return to;
    };
    let from = PixelPoint {
        x: previous.x as f64 * tile_size,
        y: previous.y as f64 * tile_size,
    };

    let limit = tile_size * WRAP_TELEPORT_TILES;
    if (to.x - from.x).abs() > limit || (to.y - from.y).abs() > limit {
        return to;
    }

    PixelPoint {
        x: from.x + (to.x - from.x) * alpha,
        y: from.y + (to.y - from.y) * alpha,
    }
}

/// Draw positions for every segment of `snake`, head first.
pub fn interpolated_body(snake: &Snake, alpha: f64, tile_size: f64) -> Vec<PixelPoint> {
    let previous = snake.previous_body();
    snake
        .body
        .iter()
        .enumerate()
        .map(|(i, segment)| interpolate_segment(previous.get(i).copied(), *segment, alpha, tile_size))
        .collect()
}

/// Food glow offset in pixels, oscillating with wall-clock time.
pub fn food_pulse(now_ms: u64) -> f64 {
    (now_ms as f64 / 150.0).sin() * 2.0
}
