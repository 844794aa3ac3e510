use super::View;
use crate::app::AppCommand;
use common::HighScore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Duration;

/// Title screen listing the best runs so far.
pub struct ScoreboardState {
    scores: Vec<HighScore>,
}

impl ScoreboardState {
    pub fn new(scores: Vec<HighScore>) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &[HighScore] {
        &self.scores
    }

    fn score_lines(&self) -> Vec<Line<'static>> {
        if self.scores.is_empty() {
            return vec![Line::from(Span::styled(
                "No scores yet",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        self.scores
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let rank_style = if i == 0 {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), rank_style),
                    Span::styled(format!("{:>6}", entry.score), rank_style),
                    Span::styled(format!("   {}", entry.date), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect()
    }
}

impl View for ScoreboardState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(AppCommand::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppCommand::StartGame),
            _ => None,
        }
    }

    fn update(&mut self, _dt: Duration) {}

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(9),    // Scores
                Constraint::Length(3), // Controls
            ])
            .split(frame.area());

        let title = Paragraph::new("SPLIT SNAKE")
            .style(Style::default().fg(Color::Rgb(0x10, 0xb9, 0x81)).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let scores = Paragraph::new(self.score_lines())
            .alignment(Alignment::Center)
            .block(Block::default().title("High Scores").borders(Borders::ALL));
        frame.render_widget(scores, chunks[1]);

        let controls = Paragraph::new("Enter/Space: Play | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(controls, chunks[2]);
    }
}
