use super::View;
use crate::app::AppCommand;
use crate::input::{map_key, GameInput};
use crate::render::arena::ArenaRenderer;
use crate::render::standard_renderer::StandardRenderer;
use crate::render::types::CharDimensions;
use common::{is_high_score, Effect, GameEngine, GameEvent, HighScore, HudSnapshot};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::Duration;
use tracing::{debug, info};

const EMERALD: Color = Color::Rgb(0x10, 0xb9, 0x81);
const AMBER: Color = Color::Rgb(0xfb, 0xbf, 0x24);
const ROSE: Color = Color::Rgb(0xf4, 0x3f, 0x5e);
const ZINC: Color = Color::Rgb(0x71, 0x71, 0x7a);

fn effect_label(effect: Effect) -> &'static str {
    match effect {
        Effect::Speed => "SPEED",
        Effect::Ghost => "GHOST",
        Effect::Split => "SPLIT",
    }
}

/// One-line readout of the HUD snapshot.
pub fn hud_text(hud: &HudSnapshot, multipliers: &[f64]) -> String {
    let mut text = format!("Score: {} | Length: {}", hud.score, hud.total_segments);
    if hud.combo_count >= 2 {
        if let Some(multiplier) = multipliers.get(hud.combo_count) {
            text.push_str(&format!(" | Combo x{}", multiplier));
        }
    }
    if let Some(effect) = hud.active_effect {
        text.push_str(&format!(
            " | {} {:.1}s",
            effect_label(effect),
            hud.effect_remaining_ms as f64 / 1000.0
        ));
    }
    text
}

pub fn switch_hint(hud: &HudSnapshot) -> Option<String> {
    (hud.live_snakes > 1).then(|| format!("Snake {}/{} • Press X", hud.active_ordinal, hud.live_snakes))
}

pub struct GameViewState {
    engine: GameEngine,
    renderer: ArenaRenderer<StandardRenderer>,
    elapsed_ms: f64,
    best_combo: usize,
    /// Set once the run ends in a collision, not when it is stopped
    crashed: bool,
    /// Board as it stood when the run began
    scores_at_start: Vec<HighScore>,
}

impl GameViewState {
    pub fn new(mut engine: GameEngine) -> Self {
        engine.start();
        let scores_at_start = engine.top_scores().to_vec();
        Self {
            engine,
            renderer: ArenaRenderer::new(StandardRenderer::new(CharDimensions::new(2, 1))),
            elapsed_ms: 0.0,
            best_combo: 0,
            crashed: false,
            scores_at_start,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &ArenaRenderer<StandardRenderer> {
        &self.renderer
    }

    fn render_header(&self) -> Paragraph<'_> {
        let hud = self.engine.hud();
        Paragraph::new(hud_text(hud, &self.engine.config().combo_multipliers))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_arena(&self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default().borders(Borders::ALL);
        if let Some(hint) = switch_hint(self.engine.hud()) {
            block = block.title(Span::styled(format!(" {} ", hint), Style::default().fg(AMBER)));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(grid) = self.renderer.last_frame() else {
            return;
        };

        let arena_width = grid.physical_width() + 2;
        let arena_height = grid.physical_height() + 2;
        let x_offset = inner.width.saturating_sub(arena_width as u16) / 2;
        let y_offset = inner.height.saturating_sub(arena_height as u16) / 2;
        let border = Style::default().fg(Color::DarkGray);
        let padding = " ".repeat(x_offset as usize);

        let mut lines: Vec<Line> = Vec::new();
        for _ in 0..y_offset {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            format!("{}┌{}┐", padding, "─".repeat(grid.physical_width())),
            border,
        )));
        for (chars, styles) in grid.styled_lines() {
            let mut spans = vec![Span::raw(padding.clone()), Span::styled("│", border)];
            for (ch, style) in chars.iter().zip(styles.iter()) {
                spans.push(Span::styled(ch.to_string(), *style));
            }
            spans.push(Span::styled("│", border));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(Span::styled(
            format!("{}└{}┘", padding, "─".repeat(grid.physical_width())),
            border,
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_game_over(&self, frame: &mut Frame, area: Rect) {
        let hud = self.engine.hud();
        let mut lines = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                hud.score.to_string(),
                Style::default().fg(EMERALD).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("FINAL SCORE", Style::default().fg(ZINC))),
        ];
        if hud.score > 0 && is_high_score(&self.scores_at_start, hud.score) {
            lines.push(Line::from(Span::styled(
                "New High Score!",
                Style::default().fg(EMERALD).add_modifier(Modifier::BOLD),
            )));
        }
        if self.best_combo >= 2 {
            lines.push(Line::from(Span::styled(
                format!("Best Combo: x{}", self.best_combo),
                Style::default().fg(AMBER),
            )));
        }
        if hud.live_snakes > 1 {
            lines.push(Line::from(Span::styled("Split Master!", Style::default().fg(ROSE))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("r: Restart | q: Menu", Style::default().fg(ZINC))));

        let height = lines.len() as u16 + 2;
        let popup = centered_rect(area, 30, height);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ROSE))),
            popup,
        );
    }

    fn render_controls(&self) -> Paragraph<'_> {
        Paragraph::new("Arrows/WASD: Steer | X/Tab: Switch snake | r: Restart | q: Menu")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl View for GameViewState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match map_key(key)? {
            GameInput::Turn(direction) => self.engine.turn(direction),
            GameInput::Switch => self.engine.switch_active(),
            GameInput::Restart => {
                self.engine.restart();
                self.best_combo = 0;
                self.crashed = false;
                self.scores_at_start = self.engine.top_scores().to_vec();
            }
            GameInput::Back => {
                self.engine.stop();
                return Some(AppCommand::BackToScoreboard);
            }
            GameInput::Quit => return Some(AppCommand::Quit),
        }
        None
    }

    fn update(&mut self, dt: Duration) {
        self.elapsed_ms += dt.as_secs_f64() * 1000.0;
        let events = self.engine.advance(self.elapsed_ms, &mut self.renderer);
        self.best_combo = self.best_combo.max(self.engine.hud().combo_count);

        for event in &events {
            match event {
                GameEvent::GameOver { score, cause } => {
                    self.crashed = true;
                    info!(score, ?cause, "Game over");
                }
                GameEvent::SnakeSplit { snake_index, .. } => {
                    debug!(snake_index, "Snake split");
                }
                _ => {}
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // HUD
                Constraint::Min(10),   // Board
                Constraint::Length(3), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(), chunks[0]);
        self.render_arena(frame, chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);

        if self.crashed {
            self.render_game_over(frame, chunks[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::COMBO_MULTIPLIERS;

    #[test]
    fn test_hud_text_shows_combo_and_effect() {
        let hud = HudSnapshot {
            score: 120,
            total_segments: 9,
            combo_count: 3,
            active_effect: Some(Effect::Ghost),
            effect_remaining_ms: 2_500,
            live_snakes: 1,
            active_ordinal: 1,
        };
        assert_eq!(hud_text(&hud, &COMBO_MULTIPLIERS), "Score: 120 | Length: 9 | Combo x2.5 | GHOST 2.5s");
    }

    #[test]
    fn test_hud_text_hides_single_pickup_combo() {
        let hud = HudSnapshot { score: 15, total_segments: 4, combo_count: 1, ..Default::default() };
        assert_eq!(hud_text(&hud, &COMBO_MULTIPLIERS), "Score: 15 | Length: 4");
    }

    #[test]
    fn test_switch_hint_needs_two_snakes() {
        let mut hud = HudSnapshot { live_snakes: 1, active_ordinal: 1, ..Default::default() };
        assert_eq!(switch_hint(&hud), None);
        hud.live_snakes = 2;
        hud.active_ordinal = 2;
        assert_eq!(switch_hint(&hud).as_deref(), Some("Snake 2/2 • Press X"));
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect { x: 2, y: 3, width: 40, height: 20 };
        let popup = centered_rect(area, 30, 8);
        assert_eq!(popup, Rect { x: 7, y: 9, width: 30, height: 8 });
        let popup = centered_rect(Rect { x: 0, y: 0, width: 10, height: 4 }, 30, 8);
        assert_eq!(popup, Rect { x: 0, y: 0, width: 10, height: 4 });
    }
}
