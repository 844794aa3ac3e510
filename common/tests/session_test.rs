use common::*;

fn food(config: &GameConfig, kind: FoodType, x: i16, y: i16) -> Option<Food> {
    Some(Food {
        position: Position::new(x, y),
        config: config.food.config_for(kind).unwrap().clone(),
    })
}

fn running_state(config: &GameConfig) -> GameState {
    let mut state = GameState::new(config, 7);
    state.running = true;
    state
}

fn tick(state: &mut GameState, now_ms: u64) -> Vec<GameEvent> {
    state.exec_command(GameCommand::Tick { now_ms })
}

fn steer(state: &mut GameState, direction: Direction, now_ms: u64) -> Vec<GameEvent> {
    state.exec_command(GameCommand::Turn { direction });
    tick(state, now_ms)
}

fn normal_food_only() -> GameConfig {
    let mut config = GameConfig { seed: Some(21), ..Default::default() };
    for entry in config.food.entries.iter_mut() {
        if entry.kind != FoodType::Normal {
            entry.spawn_weight = 0;
        }
    }
    config
}

#[derive(Default)]
struct FrameLog {
    frames: usize,
    alphas: Vec<f64>,
}

impl FrameRenderer for FrameLog {
    fn draw_frame(&mut self, frame: &FrameView<'_>) {
        self.frames += 1;
        self.alphas.push(frame.alpha);
    }
}

fn engine(config: GameConfig) -> GameEngine {
    GameEngine::new(config, Box::new(ManualClock::new(0)), Box::new(MemoryScoreStore::default())).unwrap()
}

#[test]
fn test_snake_wraps_around_the_board() {
    let config = GameConfig::default();
    let mut state = running_state(&config);
    state.food = food(&config, FoodType::Normal, 3, 3);

    for i in 0..10 {
        tick(&mut state, i * 85);
    }

    assert!(state.running);
    assert_eq!(state.snakes[0].head(), Position::new(0, 10));
    assert_eq!(state.snakes[0].len(), 3);
    assert_eq!(state.hud.total_segments, 3);
}

#[test]
fn test_quick_pickups_build_a_combo() {
    let config = GameConfig::default();
    let mut state = running_state(&config);

    state.food = food(&config, FoodType::Normal, 11, 10);
    tick(&mut state, 1_000);
    assert_eq!(state.score, 15);

    state.food = food(&config, FoodType::Normal, 12, 10);
    let events = tick(&mut state, 1_500);
    assert!(events.iter().any(|e| matches!(e, GameEvent::FoodEaten { points: 20, combo: 2, .. })));
    assert_eq!(state.score, 35);
    assert_eq!(state.hud.combo_count, 2);
}

#[test]
fn test_combo_lapses_after_window() {
    let config = GameConfig::default();
    let mut state = running_state(&config);
    state.food = food(&config, FoodType::Normal, 11, 10);
    tick(&mut state, 1_000);

    state.food = food(&config, FoodType::Normal, 3, 3);
    let events = tick(&mut state, 3_001);
    assert!(events.contains(&GameEvent::ComboReset));
    assert_eq!(state.combo.count(), 0);

    state.food = food(&config, FoodType::Normal, 13, 10);
    tick(&mut state, 3_100);
    assert_eq!(state.score, 15 + 15);
}

fn coiled_config() -> GameConfig {
    GameConfig { start_length: 5, ..Default::default() }
}

#[test]
fn test_ghost_passes_through_own_body() {
    let config = coiled_config();
    let mut state = running_state(&config);
    state.food = food(&config, FoodType::Normal, 0, 0);
    state.powerup.activate(Effect::Ghost, 0, 4_000);

    steer(&mut state, Direction::Up, 100);
    steer(&mut state, Direction::Left, 200);
    let events = steer(&mut state, Direction::Down, 300);

    assert!(state.running);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert_eq!(state.snakes[0].head(), Position::new(9, 10));
    assert!(events.iter().any(|e| matches!(e, GameEvent::TrailSample { ghost: true, .. })));
}

#[test]
fn test_same_crossing_after_ghost_expires_ends_the_run() {
    let config = coiled_config();
    let mut state = running_state(&config);
    state.food = food(&config, FoodType::Normal, 0, 0);
    state.powerup.activate(Effect::Ghost, 0, 4_000);

    steer(&mut state, Direction::Up, 100);
    steer(&mut state, Direction::Left, 200);
    let events = steer(&mut state, Direction::Down, 4_001);

    assert!(events.contains(&GameEvent::PowerupExpired { effect: Effect::Ghost }));
    assert!(events.contains(&GameEvent::GameOver {
        score: 0,
        cause: CollisionCause::SelfCollision { snake_index: 0 },
    }));
    assert!(!state.running);

    let tick_before = state.tick;
    assert!(tick(&mut state, 4_100).is_empty());
    assert_eq!(state.tick, tick_before);
}

fn crossing_state(config: &GameConfig) -> GameState {
    let mut state = running_state(config);
    state.food = food(config, FoodType::Normal, 0, 0);
    let mut other = Snake::with_body(
        vec![
            Position::new(7, 7),
            Position::new(7, 6),
            Position::new(7, 5),
            Position::new(7, 4),
            Position::new(7, 3),
        ],
        Direction::Down.velocity(),
    );
    other.role = SnakeRole::Secondary;
    other.is_active = false;
    state.snakes = vec![Snake::new(Position::new(5, 5), 3, Direction::Right), other];
    state
}

#[test]
fn test_active_snake_hitting_another_ends_the_run() {
    let config = GameConfig::default();
    let mut state = crossing_state(&config);
    tick(&mut state, 100);
    let events = tick(&mut state, 200);
    assert!(events.contains(&GameEvent::GameOver {
        score: 0,
        cause: CollisionCause::CrossSnake { snake_index: 0, other_index: 1 },
    }));
}

#[test]
fn test_inactive_snake_passes_through_others() {
    let config = GameConfig::default();
    let mut state = crossing_state(&config);
    state.snakes[0].is_active = false;
    state.snakes[1].is_active = true;
    state.active_index = 1;

    tick(&mut state, 100);
    tick(&mut state, 200);
    assert!(state.running);
    assert_eq!(state.snakes[0].head(), Position::new(7, 5));
}

#[test]
fn test_ghost_ignores_other_snakes() {
    let config = GameConfig::default();
    let mut state = crossing_state(&config);
    state.powerup.activate(Effect::Ghost, 0, 4_000);
    tick(&mut state, 100);
    tick(&mut state, 200);
    assert!(state.running);
}

fn split_ready(config: &GameConfig) -> GameState {
    let mut state = running_state(config);
    state.food = food(config, FoodType::Split, 11, 10);
    state
}

#[test]
fn test_split_pickup_creates_second_snake() {
    let config = GameConfig { start_length: 6, ..Default::default() };
    let mut state = split_ready(&config);

    let events = tick(&mut state, 1_000);

    assert!(events.contains(&GameEvent::SnakeSplit {
        parent_index: 0,
        snake_index: 1,
        head: Position::new(5, 10),
    }));
    assert_eq!(state.snakes.len(), 2);
    assert_eq!(state.total_segments(), 7);
    assert_eq!(state.score, 45); // round(30 * 1.5)
    assert_eq!(state.powerup.active(), Some(Effect::Split));

    let parent: Vec<_> = state.snakes[0].body.iter().copied().collect();
    assert_eq!(parent, vec![Position::new(11, 10), Position::new(10, 10), Position::new(9, 10)]);

    let offspring = &state.snakes[1];
    assert_eq!(offspring.role, SnakeRole::Secondary);
    assert!(!offspring.is_active);
    assert_eq!(offspring.velocity, Direction::Left.velocity());
    assert_eq!(offspring.len(), 4);

    assert_eq!(state.hud.live_snakes, 2);
    assert_eq!(state.hud.active_ordinal, 1);

    // Both keep moving without growing
    state.food = food(&config, FoodType::Normal, 0, 0);
    tick(&mut state, 1_085);
    assert_eq!(state.snakes[0].head(), Position::new(12, 10));
    assert_eq!(state.snakes[1].head(), Position::new(4, 10));
    assert_eq!(state.total_segments(), 7);
}

#[test]
fn test_short_snake_does_not_split() {
    let config = GameConfig::default();
    let mut state = split_ready(&config);
    let events = tick(&mut state, 1_000);

    assert_eq!(state.snakes.len(), 1);
    assert_eq!(state.snakes[0].len(), 4);
    assert!(events.contains(&GameEvent::PowerupActivated { effect: Effect::Split, expires_at_ms: 9_000 }));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::SnakeSplit { .. })));
}

#[test]
fn test_switch_cycles_control_and_steering() {
    let config = GameConfig { start_length: 6, ..Default::default() };
    let mut state = split_ready(&config);
    tick(&mut state, 1_000);
    state.food = food(&config, FoodType::Normal, 0, 0);

    let events = state.exec_command(GameCommand::SwitchActive);
    assert_eq!(events, vec![GameEvent::ActiveSwitched { snake_index: 1, head: Position::new(5, 10) }]);
    assert_eq!(state.active_index, 1);
    assert!(state.snakes[1].is_active);
    assert!(!state.snakes[0].is_active);
    assert_eq!(state.snakes.iter().filter(|s| s.is_active).count(), 1);

    state.exec_command(GameCommand::Turn { direction: Direction::Up });
    tick(&mut state, 1_085);
    assert_eq!(state.snakes[1].head(), Position::new(5, 9));
    assert_eq!(state.snakes[0].head(), Position::new(12, 10));
    assert_eq!(state.hud.active_ordinal, 2);

    state.exec_command(GameCommand::SwitchActive);
    assert_eq!(state.active_index, 0);
    assert!(state.snakes[0].is_active);
}

#[test]
fn test_segments_only_grow_by_pickups() {
    let config = normal_food_only();
    let mut state = running_state(&config);
    let growth = config.food.config_for(FoodType::Normal).unwrap().growth;
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    for step in 0..400u64 {
        if step % 7 == 0 {
            let direction = turns[(step / 7) as usize % turns.len()];
            state.exec_command(GameCommand::Turn { direction });
        }
        let before = state.total_segments();
        let events = tick(&mut state, step * 85);
        if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            break;
        }

        let eaten = events.iter().filter(|e| matches!(e, GameEvent::FoodEaten { .. })).count();
        assert_eq!(state.total_segments(), before + eaten * (1 + growth));
        assert_eq!(state.hud.total_segments, state.total_segments());
        if let Some(food) = &state.food {
            assert!(state.snakes.iter().all(|s| !s.contains_point(&food.position)));
        }
        for snake in &state.snakes {
            assert!(snake.body.iter().all(|p| p.is_within(state.grid_size)));
        }
    }
}

#[test]
fn test_slow_frame_runs_several_ticks() {
    let mut engine = engine(normal_food_only());
    engine.start();
    let mut frames = FrameLog::default();

    engine.advance(1_000.0, &mut frames);
    let events = engine.advance(1_000.0 + 85.0 * 3.0 + 10.0, &mut frames);

    assert_eq!(engine.state().tick, 3);
    assert_eq!(events.iter().filter(|e| matches!(e, GameEvent::TrailSample { .. })).count(), 3);
    assert_eq!(engine.particles().trails().len(), 3);
    assert_eq!(frames.frames, 2);
    assert!((engine.accumulator_ms() - 10.0).abs() < 1e-9);
}

#[test]
fn test_speed_pickup_pays_for_its_tick_at_the_fast_rate() {
    let config = normal_food_only();
    let mut engine = engine(config.clone());
    engine.start();
    let mut frames = FrameLog::default();
    engine.advance(0.0, &mut frames);
    engine.state_mut().food = food(&config, FoodType::Speed, 11, 10);

    let events = engine.advance(170.0, &mut frames);

    assert!(events.iter().any(|e| matches!(e, GameEvent::PowerupActivated { effect: Effect::Speed, .. })));
    assert_eq!(engine.state().tick_rate_ms, 50);
    // 170 -> 120 -> 70 -> 20
    assert_eq!(engine.state().tick, 3);
    assert!((engine.accumulator_ms() - 20.0).abs() < 1e-9);
    assert!((frames.alphas[1] - 0.4).abs() < 1e-9);
}

#[test]
fn test_stopped_engine_ignores_banked_time() {
    let mut engine = engine(normal_food_only());
    engine.start();
    let mut frames = FrameLog::default();
    engine.advance(0.0, &mut frames);
    engine.advance(60.0, &mut frames);
    engine.stop();

    assert!(engine.advance(5_000.0, &mut frames).is_empty());
    assert_eq!(engine.state().tick, 0);
    assert_eq!(frames.frames, 2);
    assert!(engine.top_scores().is_empty());
}

#[test]
fn test_game_over_records_score_and_halts() {
    let config = GameConfig { start_length: 5, ..normal_food_only() };
    let mut engine = engine(config);
    engine.start();
    let mut frames = FrameLog::default();

    engine.advance(0.0, &mut frames);
    engine.turn(Direction::Up);
    engine.advance(85.0, &mut frames);
    engine.turn(Direction::Left);
    engine.advance(170.0, &mut frames);
    engine.turn(Direction::Down);
    let events = engine.advance(255.0, &mut frames);

    assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert!(!engine.is_running());
    assert_eq!(frames.frames, 4);
    assert_eq!(frames.alphas.last(), Some(&0.0));
    assert_eq!(engine.top_scores().len(), 1);
    assert_eq!(engine.top_scores()[0].score, engine.state().score);

    let tick = engine.state().tick;
    assert!(engine.advance(340.0, &mut frames).is_empty());
    assert_eq!(engine.state().tick, tick);
    assert_eq!(frames.frames, 4);

    engine.restart();
    assert!(engine.is_running());
    assert_eq!(engine.state().score, 0);
    assert_eq!(engine.top_scores().len(), 1);
    assert!(engine.particles().particles().is_empty());
}
