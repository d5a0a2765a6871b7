//! State machine and loop behaviour, driven through in-memory platform doubles

use std::collections::{HashSet, VecDeque};

use invaders::consts::*;
use invaders::platform::{AudioPlayer, Clock, InputEvent, InputSource, Key, Renderer, Screen};
use invaders::sim::{Direction, Entity, EntityKind, Formation, Outcome};
use invaders::{Game, GamePhase, Settings};

// ── Test doubles ────────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingRenderer {
    /// Kinds drawn since the last clear
    frame: Vec<EntityKind>,
    frames_presented: usize,
    screens: Vec<Screen>,
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.frame.clear();
    }

    fn draw(&mut self, entity: &Entity) {
        self.frame.push(entity.kind);
    }

    fn draw_screen(&mut self, screen: &Screen) {
        self.screens.push(*screen);
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

#[derive(Default)]
struct RecordingAudio {
    played: Vec<String>,
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, sound: &str, _looping: bool) {
        self.played.push(sound.to_string());
    }

    fn stop(&mut self, _sound: &str) {}
}

/// Hands out one scripted batch of events per poll, then nothing
#[derive(Default)]
struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
    held: HashSet<Key>,
}

impl ScriptedInput {
    fn with(batches: Vec<Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into(),
            ..Default::default()
        }
    }
}

impl InputSource for ScriptedInput {
    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.batches.pop_front().unwrap_or_default()
    }

    fn release_all(&mut self) {
        self.held.clear();
    }
}

/// Advances a fixed step on every wait
struct SteppedClock {
    now: u64,
    step: u64,
    waits: u64,
}

impl SteppedClock {
    fn new(step: u64) -> Self {
        Self {
            now: 0,
            step,
            waits: 0,
        }
    }
}

impl Clock for SteppedClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn wait_until_next_tick(&mut self, _fps: u32) {
        self.waits += 1;
        assert!(self.waits < 100_000, "loop never finished");
        self.now += self.step;
    }
}

type TestGame = Game<RecordingRenderer, RecordingAudio, ScriptedInput, SteppedClock>;

fn settings() -> Settings {
    Settings {
        seed: Some(1234),
        game_over_delay_ms: 0,
        ..Settings::default()
    }
}

fn game_with(settings: Settings, input: ScriptedInput) -> TestGame {
    Game::new(
        settings,
        RecordingRenderer::default(),
        RecordingAudio::default(),
        input,
        SteppedClock::new(16),
    )
}

fn confirm() -> Vec<InputEvent> {
    vec![InputEvent::KeyDown(Key::Confirm)]
}

/// Game that is already past the start screen
fn playing() -> TestGame {
    let mut game = game_with(settings(), ScriptedInput::with(vec![confirm()]));
    assert!(game.start_screen().is_continue());
    game
}

// ── Start screen ────────────────────────────────────────────────────────────

#[test]
fn start_screen_waits_for_confirm_and_ignores_other_keys() {
    let script = vec![
        vec![],
        vec![InputEvent::KeyDown(Key::Fire), InputEvent::KeyDown(Key::Left)],
        vec![],
        vec![InputEvent::KeyDown(Key::Confirm), InputEvent::KeyDown(Key::Fire)],
    ];
    let mut game = game_with(settings(), ScriptedInput::with(script));
    assert_eq!(game.phase(), GamePhase::Start);

    assert!(game.start_screen().is_continue());
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.renderer().screens, vec![Screen::Start]);
    // Nothing simulated while waiting
    assert_eq!(game.state().time_ticks, 0);
    assert!(game.state().shots.player_shot().is_none());
    assert_eq!(game.renderer().frames_presented, 0);
}

#[test]
fn first_wave_starts_from_a_fresh_run() {
    let mut game = game_with(settings(), ScriptedInput::with(vec![confirm()]));
    {
        let state = game.state_mut();
        state.score = 5;
        state.lives.lose_one();
        state.formation = Formation::from_invaders(Vec::new(), Direction::Right);
        state.player.move_to(0.0, 447.0);
    }

    assert!(game.start_screen().is_continue());
    let state = game.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.lives.count(), 3);
    assert_eq!(state.formation.len(), 50);
    assert_eq!(state.formation.direction(), Direction::Left);
    assert_eq!(state.player.pos().x, 375.0);
}

#[test]
fn keys_pressed_on_start_screen_are_not_held_in_play() {
    let script = vec![vec![InputEvent::KeyDown(Key::Fire)], confirm()];
    let mut input = ScriptedInput::with(script);
    // Space and an arrow went down while the title was showing
    input.held.extend([Key::Fire, Key::Left]);
    let mut game = game_with(settings(), input);

    assert!(game.start_screen().is_continue());
    let _ = game.step();
    assert!(game.state().shots.player_shot().is_none());
    assert_eq!(game.state().player.pos().x, 375.0);
    assert!(!game.renderer().frame.contains(&EntityKind::PlayerShot));
}

#[test]
fn escape_on_start_screen_quits() {
    let mut game = game_with(
        settings(),
        ScriptedInput::with(vec![vec![InputEvent::KeyDown(Key::Escape)]]),
    );
    assert!(game.start_screen().is_break());
    assert_eq!(game.phase(), GamePhase::Start);
}

#[test]
fn quit_event_on_start_screen_quits() {
    let mut game = game_with(settings(), ScriptedInput::with(vec![vec![InputEvent::Quit]]));
    assert!(game.start_screen().is_break());
}

// ── Playing ─────────────────────────────────────────────────────────────────

#[test]
fn step_draws_every_entity_then_presents() {
    let mut game = playing();
    assert_eq!(game.step(), std::ops::ControlFlow::Continue(None));

    let frame = &game.renderer().frame;
    assert_eq!(game.renderer().frames_presented, 1);
    assert_eq!(frame.iter().filter(|k| **k == EntityKind::Player).count(), 1);
    assert_eq!(frame.iter().filter(|k| **k == EntityKind::Invader).count(), 50);
    assert_eq!(frame.iter().filter(|k| **k == EntityKind::LifeIcon).count(), 3);
}

#[test]
fn held_keys_move_and_fire() {
    let mut game = playing();
    game.input_mut().held.extend([Key::Right, Key::Fire]);
    let _ = game.step();
    assert_eq!(game.state().player.pos().x, 380.0);
    assert!(game.state().shots.player_shot().is_some());
    assert!(game.renderer().frame.contains(&EntityKind::PlayerShot));
}

#[test]
fn held_escape_quits_mid_wave() {
    let mut game = playing();
    game.input_mut().held.insert(Key::Escape);
    assert!(game.step().is_break());
}

#[test]
fn quit_event_mid_wave_quits() {
    let mut game = playing();
    game.input_mut().batches.push_back(vec![InputEvent::Quit]);
    assert!(game.step().is_break());
}

#[test]
fn formation_timers_follow_the_clock_not_the_tick_count() {
    let mut game = playing();
    let start_x = game.state().formation.invaders()[0].pos().x;

    // Many ticks inside one horizontal interval: no movement
    for _ in 0..10 {
        let _ = game.step();
    }
    assert_eq!(game.state().formation.invaders()[0].pos().x, start_x);

    // Jump the clock past the horizontal interval
    game.clock_mut().now += INVADER_TIME_X_MS;
    let _ = game.step();
    assert_eq!(
        game.state().formation.invaders()[0].pos().x,
        start_x - INVADER_X_SPEED
    );
    assert_eq!(game.state().formation.invaders()[0].pos().y, 0.0);
}

#[test]
fn victory_when_formation_cleared_after_final_frame() {
    let mut game = playing();
    game.state_mut().formation = Formation::from_invaders(Vec::new(), Direction::Left);

    assert_eq!(game.step(), std::ops::ControlFlow::Continue(Some(Outcome::Victory)));
    assert_eq!(game.phase(), GamePhase::GameOver);
    // The deciding frame was drawn
    assert_eq!(game.renderer().frames_presented, 1);
    assert_eq!(game.audio().backend().played, vec!["victory".to_string()]);
}

#[test]
fn defeat_wins_over_victory_in_the_same_tick() {
    let mut game = playing();
    // Last invader rams the player on the final life
    let player_pos = game.state().player.pos();
    game.state_mut().formation = Formation::from_invaders(
        vec![Entity::new(EntityKind::Invader, player_pos.x, player_pos.y)],
        Direction::Left,
    );
    game.state_mut().lives.lose_one();
    game.state_mut().lives.lose_one();

    assert_eq!(game.step(), std::ops::ControlFlow::Continue(Some(Outcome::Defeat)));
    assert!(game.state().formation.is_empty());
    assert_eq!(game.state().lives.count(), 0);
    assert_eq!(
        game.audio().backend().played,
        vec!["hit_player".to_string(), "defeat".to_string()]
    );
}

#[test]
fn play_runs_until_outcome() {
    let mut game = playing();
    game.state_mut().formation = Formation::from_invaders(
        vec![Entity::new(EntityKind::Invader, 390.0, 300.0)],
        Direction::Left,
    );
    game.input_mut().held.insert(Key::Fire);
    assert_eq!(game.play(), std::ops::ControlFlow::Continue(Outcome::Victory));
    assert_eq!(game.state().score, 1);
}

// ── Game over and restart ───────────────────────────────────────────────────

#[test]
fn restart_rebuilds_everything() {
    let mut game = playing();
    {
        let state = game.state_mut();
        state.score = 7;
        state.lives.lose_one();
        state.lives.lose_one();
        state.formation = Formation::from_invaders(
            vec![Entity::new(EntityKind::Invader, 0.0, 100.0)],
            Direction::Left,
        );
        state.formation.advance_horizontal();
        assert_eq!(state.formation.direction(), Direction::Right);
        let player = state.player.clone();
        state.shots.fire(&player);
    }
    let old_seed = game.state().seed;

    game.input_mut().batches.push_back(vec![InputEvent::KeyDown(Key::Fire)]);
    game.input_mut().batches.push_back(confirm());
    assert!(game.game_over_screen(Outcome::Defeat).is_continue());

    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(
        game.renderer().screens.last(),
        Some(&Screen::GameOver {
            outcome: Outcome::Defeat,
            score: 7
        })
    );

    let state = game.state();
    assert_eq!(state.lives.count(), 3);
    assert_eq!(state.score, 0);
    assert_eq!(state.formation.len(), 50);
    assert_eq!(state.formation.direction(), Direction::Left);
    assert!(state.shots.player_shot().is_none());
    assert_eq!(state.time_ticks, 0);
    assert_ne!(state.seed, old_seed);
}

#[test]
fn escape_on_end_screen_quits_without_reset() {
    let mut game = playing();
    game.state_mut().score = 4;
    game.input_mut().batches.push_back(vec![InputEvent::KeyDown(Key::Escape)]);
    assert!(game.game_over_screen(Outcome::Victory).is_break());
    assert_eq!(game.state().score, 4);
}

#[test]
fn end_screen_waits_for_display_delay() {
    let settings = Settings {
        game_over_delay_ms: 160,
        ..settings()
    };
    let mut game = game_with(settings, ScriptedInput::with(vec![confirm()]));
    assert!(game.start_screen().is_continue());

    // Confirms pressed during the delay are swallowed; one polled after it counts
    for _ in 0..12 {
        game.input_mut().batches.push_back(confirm());
    }
    let before = game.clock_mut().now;
    assert!(game.game_over_screen(Outcome::Victory).is_continue());
    assert!(game.clock_mut().now - before >= 160);
    assert_eq!(game.phase(), GamePhase::Playing);
}

#[test]
fn quit_during_display_delay() {
    let settings = Settings {
        game_over_delay_ms: 1000,
        ..settings()
    };
    let mut game = game_with(settings, ScriptedInput::with(vec![confirm()]));
    assert!(game.start_screen().is_continue());
    game.input_mut().batches.push_back(vec![]);
    game.input_mut().batches.push_back(vec![InputEvent::Quit]);
    assert!(game.game_over_screen(Outcome::Defeat).is_break());
    assert_eq!(game.renderer().screens, vec![Screen::Start]);
}

#[test]
fn fixed_seed_sessions_are_reproducible() {
    let run = || {
        let mut game = playing();
        game.clock_mut().now += INVADER_TIME_SHOOT_MS;
        let _ = game.step();
        game.state().shots.invader_shots().to_vec()
    };
    let a = run();
    assert_eq!(a.len(), 1);
    assert_eq!(a, run());
}

// ── Full session ────────────────────────────────────────────────────────────

#[test]
fn run_plays_until_quit() {
    let script = vec![confirm(), vec![], vec![], vec![InputEvent::Quit]];
    let mut game = game_with(settings(), ScriptedInput::with(script));
    game.run();
    assert_eq!(game.renderer().screens, vec![Screen::Start]);
    assert_eq!(game.renderer().frames_presented, 2);
}

#[test]
fn run_restarts_after_game_over() {
    // One life and a formation that drops every tick: the wave ends by contact
    let settings = Settings {
        starting_lives: 1,
        move_y_interval_ms: 1,
        ..settings()
    };
    let mut script = vec![confirm()];
    script.extend(std::iter::repeat_n(Vec::new(), 400));
    script.push(confirm());
    script.push(vec![InputEvent::Quit]);
    let mut game = game_with(settings, ScriptedInput::with(script));
    game.run();

    assert_eq!(
        game.renderer().screens,
        vec![
            Screen::Start,
            Screen::GameOver {
                outcome: Outcome::Defeat,
                score: 0
            }
        ]
    );
    // Fresh run after the restart
    let state = game.state();
    assert_eq!(state.formation.len(), 50);
    assert_eq!(state.lives.count(), 1);
    assert_eq!(state.time_ticks, 0);
}
