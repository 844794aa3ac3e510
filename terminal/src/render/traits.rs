use common::{FoodType, Particle, SnakeRole, Trail};
use super::types::{CharDimensions, CharPattern};

pub struct SegmentLook {
    pub role: SnakeRole,
    pub is_head: bool,
    pub ghost: bool,
    pub is_active: bool,
}

pub trait GameObjectRenderer {
    fn char_dimensions(&self) -> CharDimensions;

    fn render_snake_segment(&self, look: &SegmentLook) -> CharPattern;

    /// `pulse` is the food glow offset, between -2 and 2
    fn render_food(&self, kind: FoodType, pulse: f64) -> CharPattern;

    fn render_trail(&self, trail: &Trail) -> CharPattern;

    fn render_particle(&self, particle: &Particle) -> CharPattern;
}
