use log::{debug, info};

use crate::util::PseudoRandom;
use crate::{
    Clock, ConfigError, Direction, FoodType, FrameRenderer, FrameView, GameCommand, GameConfig, GameEvent, GameState,
    HighScore, HudSnapshot, ParticleSystem, ScoreStore, SnakeRole,
};

const EAT_BURST: usize = 12;
const GOLDEN_EAT_BURST: usize = 20;
const SPLIT_BURST: usize = 15;
const SWITCH_BURST: usize = 6;

/// Owns one game session: the board, the particles and the fixed-timestep clock.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    particles: ParticleSystem,
    clock: Box<dyn Clock>,
    scores: Box<dyn ScoreStore>,
    top_scores: Vec<HighScore>,
    seeds: PseudoRandom,
    accumulator_ms: f64,
    last_frame_ms: Option<f64>,
    runs: u32,
}

impl GameEngine {
    pub fn new(config: GameConfig, clock: Box<dyn Clock>, scores: Box<dyn ScoreStore>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut seeds = PseudoRandom::new(config.seed.unwrap_or_else(|| clock.now_ms()));
        let state = GameState::new(&config, seeds.next_u64());
        let particles = ParticleSystem::new(config.tile_size, seeds.next_u64());
        let top_scores = scores.load_top_scores();

        Ok(GameEngine {
            config,
            state,
            particles,
            clock,
            scores,
            top_scores,
            seeds,
            accumulator_ms: 0.0,
            last_frame_ms: None,
            runs: 0,
        })
    }

    /// Begin a run unless one is already in progress.
    pub fn start(&mut self) {
        if !self.state.running {
            self.restart();
        }
    }

    /// Same as [`GameEngine::start`], for callers that bring the board on screen.
    pub fn show(&mut self) {
        self.start();
    }

    /// Throw away the current board and begin a new run.
    pub fn restart(&mut self) {
        self.state = GameState::new(&self.config, self.seeds.next_u64());
        self.state.running = true;
        self.particles.clear();
        self.accumulator_ms = 0.0;
        self.last_frame_ms = None;
        self.top_scores = self.scores.load_top_scores();
        self.runs += 1;
        info!(
            "Run {} started on a {}x{} board",
            self.runs, self.state.grid_size, self.state.grid_size
        );
    }

    /// Cancel the run without recording a score.
    pub fn stop(&mut self) {
        if self.state.running {
            info!("Run {} stopped at score {}", self.runs, self.state.score);
        }
        self.state.running = false;
        self.accumulator_ms = 0.0;
        self.last_frame_ms = None;
    }

    pub fn turn(&mut self, direction: Direction) {
        let events = self.state.exec_command(GameCommand::Turn { direction });
        self.apply_events(&events);
    }

    pub fn switch_active(&mut self) {
        let events = self.state.exec_command(GameCommand::SwitchActive);
        self.apply_events(&events);
    }

    /// Run as many ticks as the time since the previous frame allows, then draw.
    /// Can be called from a very fast interval loop; `frame_ms` only has to be monotonic.
    pub fn advance(&mut self, frame_ms: f64, renderer: &mut dyn FrameRenderer) -> Vec<GameEvent> {
        let mut out = Vec::new();
        if !self.state.running {
            return out;
        }

        // The first frame of a run only records its timestamp
        let last_ms = self.last_frame_ms.replace(frame_ms).unwrap_or(frame_ms);
        self.accumulator_ms += (frame_ms - last_ms).max(0.0);

        while self.state.running && self.accumulator_ms >= self.state.tick_rate_ms as f64 {
            let now_ms = self.clock.now_ms();
            let events = self.state.exec_command(GameCommand::Tick { now_ms });
            // The tick may have changed the rate; pay for it at the new one
            self.accumulator_ms -= self.state.tick_rate_ms as f64;
            self.apply_events(&events);
            out.extend(events);
        }

        if !self.state.running {
            self.accumulator_ms = 0.0;
        }

        let alpha = (self.accumulator_ms / self.state.tick_rate_ms as f64).clamp(0.0, 1.0);
        renderer.draw_frame(&FrameView {
            state: &self.state,
            particles: &self.particles,
            alpha,
            now_ms: self.clock.now_ms(),
            tile_size: self.config.tile_size as f64,
        });
        self.particles.update();

        out
    }

    fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::TrailSample { position, ghost, role, .. } => {
                    self.particles.add_trail(*position, *ghost, *role == SnakeRole::Secondary);
                }
                GameEvent::FoodEaten { position, kind, .. } => {
                    let count = if *kind == FoodType::Golden { GOLDEN_EAT_BURST } else { EAT_BURST };
                    self.particles.burst(*position, *kind, count);
                }
                GameEvent::SnakeSplit { head, .. } => {
                    self.particles.burst(*head, FoodType::Split, SPLIT_BURST);
                }
                GameEvent::ActiveSwitched { head, .. } => {
                    self.particles.burst(*head, FoodType::Golden, SWITCH_BURST);
                }
                GameEvent::GameOver { score, .. } => {
                    self.top_scores = self.scores.submit_score(*score);
                    debug!("Recorded score {}, {} entries on the board", score, self.top_scores.len());
                }
                _ => {}
            }
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn hud(&self) -> &HudSnapshot {
        &self.state.hud
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn top_scores(&self) -> &[HighScore] {
        &self.top_scores
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Runs started since the engine was created
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }
}
