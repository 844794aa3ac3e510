use std::time::Duration;

use common::{FoodType, GameConfig, GameEngine, ManualClock, MemoryScoreStore};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use terminal::app::AppCommand;
use terminal::views::{GameViewState, View};

fn view() -> GameViewState {
    let config = GameConfig { seed: Some(12), ..Default::default() };
    let engine =
        GameEngine::new(config, Box::new(ManualClock::new(0)), Box::new(MemoryScoreStore::default())).unwrap();
    GameViewState::new(engine)
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn screen_text(view: &GameViewState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
    terminal.draw(|f| view.render(f)).unwrap();
    terminal.backend().buffer().content.iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_view_starts_a_run() {
    let view = view();
    assert!(view.engine().is_running());
    assert_eq!(view.engine().runs(), 1);
}

#[test]
fn test_time_drives_ticks() {
    let mut view = view();
    view.update(Duration::ZERO);
    assert!(view.renderer().last_frame().is_some());
    view.update(Duration::from_millis(90));
    assert_eq!(view.engine().state().tick, 1);
}

#[test]
fn test_keys_map_to_commands() {
    let mut view = view();
    assert!(view.handle_input(press(KeyCode::Up)).is_none());
    assert!(view.handle_input(press(KeyCode::Char('x'))).is_none());

    assert!(view.handle_input(press(KeyCode::Char('r'))).is_none());
    assert_eq!(view.engine().runs(), 2);

    let quit = view.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(matches!(quit, Some(AppCommand::Quit)));

    let back = view.handle_input(press(KeyCode::Esc));
    assert!(matches!(back, Some(AppCommand::BackToScoreboard)));
    assert!(!view.engine().is_running());
}

#[test]
fn test_hud_is_drawn() {
    let mut view = view();
    view.update(Duration::ZERO);
    let text = screen_text(&view);
    assert!(text.contains("Score: 0 | Length: 3"));
    assert!(!text.contains("GAME OVER"));
}

#[test]
fn test_leaving_is_not_a_game_over() {
    let mut view = view();
    view.update(Duration::ZERO);
    view.handle_input(press(KeyCode::Char('q')));
    assert!(!view.engine().is_running());
    assert!(!screen_text(&view).contains("GAME OVER"));
}

#[test]
fn test_crash_shows_game_over_panel() {
    let mut config = GameConfig { seed: Some(12), start_length: 5, ..Default::default() };
    for entry in config.food.entries.iter_mut() {
        if entry.kind != FoodType::Normal {
            entry.spawn_weight = 0;
        }
    }
    let engine =
        GameEngine::new(config, Box::new(ManualClock::new(0)), Box::new(MemoryScoreStore::default())).unwrap();
    let mut view = GameViewState::new(engine);
    view.update(Duration::ZERO);

    // Up, left, down curls the head back into the body
    for key in [KeyCode::Up, KeyCode::Left, KeyCode::Down] {
        view.handle_input(press(key));
        view.update(Duration::from_millis(90));
    }

    assert!(!view.engine().is_running());
    let text = screen_text(&view);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("FINAL SCORE"));
    assert!(text.contains("r: Restart | q: Menu"));

    view.handle_input(press(KeyCode::Char('r')));
    assert!(!screen_text(&view).contains("GAME OVER"));
}
