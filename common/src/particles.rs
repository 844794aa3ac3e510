//! Cosmetic bursts and head trails. Gameplay never reads any of this.

use serde::{Deserialize, Serialize};

use crate::util::{PseudoRandom, RandomGenerator};
use crate::{FoodType, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

pub fn burst_palette(kind: FoodType) -> [Rgb; 3] {
    match kind {
        FoodType::Normal => [Rgb::hex(0x10b981), Rgb::hex(0x34d399), Rgb::hex(0x6ee7b7)],
        FoodType::Golden => [Rgb::hex(0xfbbf24), Rgb::hex(0xf59e0b), Rgb::hex(0xfcd34d)],
        FoodType::Speed => [Rgb::hex(0x38bdf8), Rgb::hex(0x0ea5e9), Rgb::hex(0x7dd3fc)],
        FoodType::Ghost => [Rgb::hex(0xa78bfa), Rgb::hex(0x8b5cf6), Rgb::hex(0xc4b5fd)],
        FoodType::Split => [Rgb::hex(0xf43f5e), Rgb::hex(0xfb7185), Rgb::hex(0xfda4af)],
    }
}

const PARTICLE_DRAG: f64 = 0.98;
const PARTICLE_GRAVITY: f64 = 0.05;
const PARTICLE_DECAY: f64 = 0.04;
const PARTICLE_SHRINK: f64 = 0.97;
const TRAIL_DECAY: f64 = 0.08;

/// Pixel-space particle, not snapped to the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: f64,
    pub size: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub x: f64,
    pub y: f64,
    pub life: f64,
    pub ghost: bool,
    pub secondary: bool,
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    trails: Vec<Trail>,
    tile_size: f64,
    rng: PseudoRandom,
}

impl ParticleSystem {
    pub fn new(tile_size: u32, seed: u64) -> Self {
        ParticleSystem {
            particles: Vec::new(),
            trails: Vec::new(),
            tile_size: tile_size as f64,
            rng: PseudoRandom::new(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    fn tile_center(&self, tile: Position) -> (f64, f64) {
        let half = self.tile_size / 2.0;
        (tile.x as f64 * self.tile_size + half, tile.y as f64 * self.tile_size + half)
    }

    /// Spray `count` particles outward from the centre of `tile`.
    pub fn burst(&mut self, tile: Position, kind: FoodType, count: usize) {
        let (x, y) = self.tile_center(tile);
        let palette = burst_palette(kind);
        for _ in 0..count {
            let angle = self.rng.random_f64() * std::f64::consts::TAU;
            let speed = self.rng.random_f64() * 3.0 + 1.5;
            let size = self.rng.random_f64() * 3.0 + 2.0;
            let color = palette[self.rng.random_below(palette.len() as u32) as usize];
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                life: 1.0,
                size,
                color,
            });
        }
    }

    pub fn add_trail(&mut self, tile: Position, ghost: bool, secondary: bool) {
        let (x, y) = self.tile_center(tile);
        self.trails.push(Trail { x, y, life: 1.0, ghost, secondary });
    }

    /// One animation step: drift, drag, gravity and fade. Spent entries are dropped.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vx *= PARTICLE_DRAG;
            p.vy *= PARTICLE_DRAG;
            p.vy += PARTICLE_GRAVITY;
            p.life -= PARTICLE_DECAY;
            p.size *= PARTICLE_SHRINK;
        }
        self.particles.retain(|p| p.life > 0.0);

        for t in &mut self.trails {
            t.life -= TRAIL_DECAY;
        }
        self.trails.retain(|t| t.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.trails.clear();
    }
}
