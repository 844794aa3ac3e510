use common::{burst_palette, FoodType, Particle, Rgb, SnakeRole, Trail};
use ratatui::style::{Color, Modifier, Style};

use super::traits::{GameObjectRenderer, SegmentLook};
use super::types::{CharDimensions, CharPattern};

const HEAD: Color = Color::Rgb(0xff, 0xff, 0xff);
const BODY: Color = Color::Rgb(0x10, 0xb9, 0x81);
const GHOST_HEAD: Color = Color::Rgb(167, 139, 250);
const GHOST_BODY: Color = Color::Rgb(139, 92, 246);
const SPLIT_HEAD: Color = Color::Rgb(251, 191, 36);
const SPLIT_BODY: Color = Color::Rgb(245, 158, 11);

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub struct StandardRenderer {
    char_dims: CharDimensions,
}

impl StandardRenderer {
    pub fn new(char_dims: CharDimensions) -> Self {
        Self { char_dims }
    }

    fn fill(&self, ch: char, style: Style) -> CharPattern {
        CharPattern::single(ch, self.char_dims).with_style(style)
    }
}

impl GameObjectRenderer for StandardRenderer {
    fn char_dimensions(&self) -> CharDimensions {
        self.char_dims
    }

    fn render_snake_segment(&self, look: &SegmentLook) -> CharPattern {
        let (head, body) = if look.ghost {
            (GHOST_HEAD, GHOST_BODY)
        } else if look.role == SnakeRole::Secondary {
            (SPLIT_HEAD, SPLIT_BODY)
        } else {
            (HEAD, BODY)
        };

        let mut style = Style::default().fg(if look.is_head { head } else { body });
        if !look.is_active {
            style = style.add_modifier(Modifier::DIM);
        }

        let ch = match (look.is_head, look.ghost) {
            (true, _) => '█',
            (false, true) => '░',
            (false, false) if look.role == SnakeRole::Secondary => '▒',
            (false, false) => '▓',
        };
        self.fill(ch, style)
    }

    fn render_food(&self, kind: FoodType, pulse: f64) -> CharPattern {
        let ch = match kind {
            FoodType::Normal => '●',
            FoodType::Golden => '◆',
            FoodType::Speed => '»',
            FoodType::Ghost => '◌',
            FoodType::Split => '✚',
        };
        let mut style = Style::default().fg(color(burst_palette(kind)[0]));
        if pulse > 0.0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        self.fill(ch, style)
    }

    fn render_trail(&self, trail: &Trail) -> CharPattern {
        let fg = if trail.ghost {
            GHOST_HEAD
        } else if trail.secondary {
            SPLIT_HEAD
        } else {
            BODY
        };
        let ch = if trail.life > 0.5 { '∙' } else { '·' };
        self.fill(ch, Style::default().fg(fg).add_modifier(Modifier::DIM))
    }

    fn render_particle(&self, particle: &Particle) -> CharPattern {
        let ch = match particle.size {
            s if s >= 3.5 => '*',
            s if s >= 2.0 => '+',
            _ => '.',
        };
        let mut style = Style::default().fg(color(particle.color));
        if particle.life < 0.4 {
            style = style.add_modifier(Modifier::DIM);
        }
        self.fill(ch, style)
    }
}
