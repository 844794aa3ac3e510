use common::{food_pulse, FrameRenderer, FrameView};

use super::snake::SnakeRenderer;
use super::traits::{GameObjectRenderer, SegmentLook};
use super::types::{pixel_to_cell, CharGrid};

/// Composes one board frame into a `CharGrid` and keeps the latest for the view.
pub struct ArenaRenderer<R: GameObjectRenderer> {
    renderer: R,
    last_frame: Option<CharGrid>,
}

impl<R: GameObjectRenderer> ArenaRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer, last_frame: None }
    }

    pub fn last_frame(&self) -> Option<&CharGrid> {
        self.last_frame.as_ref()
    }

    pub fn render(&self, frame: &FrameView<'_>) -> CharGrid {
        let state = frame.state;
        let size = state.grid_size as usize;
        let mut grid = CharGrid::new(size, size, self.renderer.char_dimensions());

        for trail in frame.particles.trails() {
            if let Some((x, y)) = pixel_to_cell(trail.x, trail.y, frame.tile_size, size) {
                grid.set_logical_point(x, y, &self.renderer.render_trail(trail));
            }
        }

        if let Some(food) = &state.food {
            if food.position.is_within(state.grid_size) {
                let pattern = self.renderer.render_food(food.kind(), food_pulse(frame.now_ms));
                grid.set_logical_point(food.position.x as usize, food.position.y as usize, &pattern);
            }
        }

        let ghost = state.powerup.is_ghost();
        for snake in &state.snakes {
            let cells = SnakeRenderer::body_cells(snake, frame.alpha, frame.tile_size, size);

            // Tail first so the head ends up on top
            for (i, cell) in cells.iter().enumerate().rev() {
                let Some((x, y)) = *cell else {
                    continue;
                };
                let look = SegmentLook {
                    role: snake.role,
                    is_head: i == 0,
                    ghost,
                    is_active: snake.is_active,
                };
                grid.set_logical_point(x, y, &self.renderer.render_snake_segment(&look));
            }
        }

        for particle in frame.particles.particles() {
            if let Some((x, y)) = pixel_to_cell(particle.x, particle.y, frame.tile_size, size) {
                grid.set_logical_point(x, y, &self.renderer.render_particle(particle));
            }
        }

        grid
    }
}

impl<R: GameObjectRenderer> FrameRenderer for ArenaRenderer<R> {
    fn draw_frame(&mut self, frame: &FrameView<'_>) {
        self.last_frame = Some(self.render(frame));
    }
}
