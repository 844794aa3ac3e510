use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::path::PathBuf;
use std::time::Duration;

use common::{GameConfig, GameEngine, PseudoRandom, ScoreStore, SystemClock};

use crate::scores::JsonScoreStore;
use crate::views::{GameViewState, ScoreboardState, View};

#[derive(Debug)]
pub enum AppCommand {
    Quit,
    StartGame,
    BackToScoreboard,
}

pub enum AppState {
    Scoreboard(Box<ScoreboardState>),
    Playing(Box<GameViewState>),
}

pub struct App {
    pub state: AppState,
    pub config: GameConfig,
    pub scores_path: PathBuf,
    /// Hands each new game its own board seed
    seeds: PseudoRandom,
}

impl App {
    pub fn new(config: GameConfig, scores_path: PathBuf) -> Self {
        let scores = JsonScoreStore::open(&scores_path).load_top_scores();
        let seeds = PseudoRandom::new(config.seed.unwrap_or_else(rand::random));
        Self {
            state: AppState::Scoreboard(Box::new(ScoreboardState::new(scores))),
            config,
            scores_path,
            seeds,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match &mut self.state {
            AppState::Scoreboard(scoreboard) => scoreboard.handle_input(key),
            AppState::Playing(game) => game.handle_input(key),
        }
    }

    pub fn update(&mut self, dt: Duration) {
        match &mut self.state {
            AppState::Scoreboard(scoreboard) => scoreboard.update(dt),
            AppState::Playing(game) => game.update(dt),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        match &self.state {
            AppState::Scoreboard(scoreboard) => scoreboard.render(frame),
            AppState::Playing(game) => game.render(frame),
        }
    }

    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::StartGame => {
                let config = GameConfig { seed: Some(self.seeds.next_u64()), ..self.config.clone() };
                let engine = GameEngine::new(
                    config,
                    Box::new(SystemClock),
                    Box::new(JsonScoreStore::open(&self.scores_path)),
                )
                .context("Failed to set up the game")?;
                self.state = AppState::Playing(Box::new(GameViewState::new(engine)));
            }
            AppCommand::BackToScoreboard => {
                let scores = match &self.state {
                    AppState::Playing(game) => game.engine().top_scores().to_vec(),
                    AppState::Scoreboard(scoreboard) => scoreboard.scores().to_vec(),
                };
                self.state = AppState::Scoreboard(Box::new(ScoreboardState::new(scores)));
            }
            AppCommand::Quit => {
                // Handled in main loop
            }
        }
        Ok(())
    }
}
