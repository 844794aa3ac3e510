mod clock;
mod combo;
mod config;
mod constants;
mod food;
mod game_engine;
mod game_state;
mod grid;
mod particles;
mod powerup;
mod render;
mod scores;
mod snake;

pub mod util;

pub use clock::*;
pub use combo::*;
pub use config::*;
pub use constants::*;
pub use food::*;
pub use game_engine::*;
pub use game_state::*;
pub use grid::*;
pub use particles::*;
pub use powerup::*;
pub use render::*;
pub use scores::*;
pub use snake::*;
pub use util::{PseudoRandom, RandomGenerator};
