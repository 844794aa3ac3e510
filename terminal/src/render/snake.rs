use common::{interpolated_body, Snake};

use super::types::pixel_to_cell;

pub struct SnakeRenderer;

impl SnakeRenderer {
    /// Board cell for each segment at `alpha`, head first. A segment half way
    /// between two tiles lands on the nearer one; off-board segments are `None`.
    pub fn body_cells(snake: &Snake, alpha: f64, tile_size: f64, grid_size: usize) -> Vec<Option<(usize, usize)>> {
        let half = tile_size / 2.0;
        interpolated_body(snake, alpha, tile_size)
            .into_iter()
            .map(|point| pixel_to_cell(point.x + half, point.y + half, tile_size, grid_size))
            .collect()
    }
}
