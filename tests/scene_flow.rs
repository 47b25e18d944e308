use glyph_invaders::clock::ManualClock;
use glyph_invaders::config::{Config, KeyBindings};
use glyph_invaders::game::{Game, GameState};
use glyph_invaders::grid::{Bounds, GridError, RenderSink};
use glyph_invaders::scenes::SceneKind;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingSink {
    frames: Vec<String>,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, frame: &str) {
        self.frames.push(frame.to_string());
    }
}

fn test_config() -> Config {
    Config {
        bomb_rate: 0.0,
        invader_columns: 3,
        invader_rows: 2,
        ..Config::default()
    }
}

fn make_game(config: Config) -> Game {
    Game::new(
        config,
        Bounds::from_cells(41, 21),
        Box::new(ManualClock::new()),
        StdRng::seed_from_u64(42),
    )
}

/// Runs frames every 500ms from `from` to `to` inclusive.
fn run_frames(game: &mut Game, sink: &mut RecordingSink, from: u32, to: u32) {
    for t in (from..=to).step_by(500) {
        game.frame(t as f64, sink).unwrap();
    }
}

fn start_play(game: &mut Game, sink: &mut RecordingSink) {
    let start = game.keys().start();
    game.key_up(start);
    run_frames(game, sink, 0, 3000);
    assert_eq!(game.current_scene(), Some(SceneKind::Play));
}

#[test]
fn new_game_waits_on_welcome() {
    let game = make_game(test_config());
    assert_eq!(game.current_scene(), Some(SceneKind::Welcome));
    assert_eq!(game.depth(), 1);
    assert_eq!(game.state(), GameState { score: 0, level: 1, lives: 3 });
}

#[test]
fn start_key_release_leaves_welcome() {
    let mut game = make_game(test_config());
    let start = game.keys().start();

    game.key_down(start);
    assert_eq!(game.current_scene(), Some(SceneKind::Welcome));

    game.key_up(start);
    assert_eq!(game.current_scene(), Some(SceneKind::LevelIntro));
    assert_eq!(game.depth(), 1);
}

#[test]
fn unknown_keys_are_ignored() {
    let mut game = make_game(test_config());
    game.key_down(9999);
    game.key_up(9999);
    assert_eq!(game.current_scene(), Some(SceneKind::Welcome));
}

#[test]
fn level_intro_counts_down_into_play() {
    let mut game = make_game(test_config());
    let mut sink = RecordingSink::default();
    let start = game.keys().start();
    game.key_up(start);

    run_frames(&mut game, &mut sink, 0, 2500);
    assert_eq!(game.current_scene(), Some(SceneKind::LevelIntro));

    game.frame(3000.0, &mut sink).unwrap();
    assert_eq!(game.current_scene(), Some(SceneKind::Play));
    let last = sink.frames.last().unwrap();
    assert!(last.starts_with("Level 1 - Lives 3 - Score 0"));
}

#[test]
fn first_frame_delta_is_ignored() {
    let mut game = make_game(test_config());
    let mut sink = RecordingSink::default();
    let start = game.keys().start();
    game.key_up(start);

    game.frame(1_000_000.0, &mut sink).unwrap();
    assert_eq!(game.current_scene(), Some(SceneKind::LevelIntro));
}

#[test]
fn clearing_a_level_awards_bonus_and_returns_to_intro() {
    let config = Config {
        invader_columns: 0,
        ..test_config()
    };
    let mut game = make_game(config);
    let mut sink = RecordingSink::default();
    start_play(&mut game, &mut sink);

    game.frame(3100.0, &mut sink).unwrap();
    assert_eq!(game.current_scene(), Some(SceneKind::LevelIntro));
    assert_eq!(game.state().score, 50);
    assert_eq!(game.state().level, 2);
}

#[test]
fn losing_all_lives_ends_the_game_and_restart_resets() {
    let mut game = make_game(test_config());
    let mut sink = RecordingSink::default();
    start_play(&mut game, &mut sink);

    game.context_mut().state.score = 120;
    game.context_mut().state.lives = 0;
    game.frame(3100.0, &mut sink).unwrap();
    assert_eq!(game.current_scene(), Some(SceneKind::GameOver));

    let restart = game.keys().restart;
    game.key_up(restart);
    assert_eq!(game.current_scene(), Some(SceneKind::Welcome));
    assert_eq!(game.depth(), 1);
    assert_eq!(game.state(), GameState { score: 0, level: 1, lives: 3 });
}

#[test]
fn pause_freezes_play_until_toggled() {
    let mut game = make_game(test_config());
    let mut sink = RecordingSink::default();
    start_play(&mut game, &mut sink);
    let pause = game.keys().pause;

    game.key_down(pause);
    game.key_up(pause);
    assert_eq!(game.current_scene(), Some(SceneKind::Paused));
    assert_eq!(game.depth(), 2);

    game.context_mut().state.lives = 0;
    run_frames(&mut game, &mut sink, 3500, 5000);
    assert_eq!(game.current_scene(), Some(SceneKind::Paused));

    game.key_down(pause);
    assert_eq!(game.current_scene(), Some(SceneKind::Play));
    assert_eq!(game.depth(), 1);
}

#[test]
fn unchanged_frames_are_flushed_once() {
    let mut game = make_game(test_config());
    let mut sink = RecordingSink::default();

    assert!(game.frame(0.0, &mut sink).unwrap());
    assert!(!game.frame(16.0, &mut sink).unwrap());
    assert_eq!(sink.frames.len(), 1);
    assert!(sink.frames[0].contains("Press SPACE to start"));
    assert_eq!(game.grid().row(10).unwrap().trim(), "GLYPH INVADERS");
}

#[test]
fn custom_bindings_drive_the_scenes() {
    let keys = KeyBindings {
        fire: 13,
        ..KeyBindings::default()
    };
    let mut game = make_game(test_config()).with_keys(keys);

    game.key_up(32);
    assert_eq!(game.current_scene(), Some(SceneKind::Welcome));
    game.key_up(13);
    assert_eq!(game.current_scene(), Some(SceneKind::LevelIntro));
}

#[test]
fn oversized_formation_fails_one_frame_then_recovers() {
    let config = Config {
        bomb_rate: 0.0,
        ..Config::default()
    };
    assert!(!config.formation_fits(Bounds::from_cells(40, 21)));
    let mut game = Game::new(
        config,
        Bounds::from_cells(40, 21),
        Box::new(ManualClock::new()),
        StdRng::seed_from_u64(42),
    );
    let mut sink = RecordingSink::default();
    let start = game.keys().start();
    game.key_up(start);
    run_frames(&mut game, &mut sink, 0, 2500);

    // Column 8 of the first row starts one cell past the right edge.
    let result = game.frame(3000.0, &mut sink);
    assert!(matches!(result, Err(GridError::OutOfBounds { x: 40, y: 2 })));
    assert_eq!(game.current_scene(), Some(SceneKind::Play));

    // Moving clamps the stray invaders back inside, so drawing works again.
    assert!(game.frame(3100.0, &mut sink).is_ok());
    assert_eq!(game.current_scene(), Some(SceneKind::Play));
    let last = sink.frames.last().unwrap();
    assert!(last.starts_with("Level 1 - Lives 3 - Score 0"));
}
