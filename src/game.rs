//! Game state machine and fixed-rate loop
//!
//! Start -> Playing -> GameOver -> Playing -> ... until the player quits.
//! The two blocking screens poll input without touching the simulation.
//! A restart swaps in a brand new `GameState`.

use std::ops::ControlFlow::{self, Break, Continue};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, SoundEffect};
use crate::platform::{AudioPlayer, Clock, InputEvent, InputSource, Key, Renderer, Screen};
use crate::settings::Settings;
use crate::sim::{GameState, Outcome, Scheduler, TickInput, tick};

/// `Break` means the player asked to quit
pub type Flow<T = ()> = ControlFlow<(), T>;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Simulation running
    Playing,
    /// Wave over, end screen showing
    GameOver,
}

fn is_quit(event: InputEvent) -> bool {
    matches!(event, InputEvent::Quit | InputEvent::KeyDown(Key::Escape))
}

/// Seed derived from wall-clock time
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Game instance holding the run state and the platform capabilities
pub struct Game<R, A, I, C> {
    settings: Settings,
    renderer: R,
    audio: AudioManager<A>,
    input: I,
    clock: C,
    phase: GamePhase,
    state: GameState,
    scheduler: Scheduler,
    /// Hands out one seed per run
    seeds: Pcg32,
}

impl<R, A, I, C> Game<R, A, I, C>
where
    R: Renderer,
    A: AudioPlayer,
    I: InputSource,
    C: Clock,
{
    pub fn new(settings: Settings, renderer: R, audio: A, input: I, clock: C) -> Self {
        let settings = settings.sanitized();
        let session_seed = settings.seed.unwrap_or_else(time_seed);
        let mut seeds = Pcg32::seed_from_u64(session_seed);
        let state = GameState::new(seeds.random(), settings.starting_lives);
        let scheduler = Scheduler::new(settings.timer_intervals(), clock.now_ms());
        let audio = AudioManager::from_settings(audio, &settings);

        log::info!("Game initialized with session seed {}", session_seed);

        Self {
            settings,
            renderer,
            audio,
            input,
            clock,
            phase: GamePhase::Start,
            state,
            scheduler,
            seeds,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Run the whole session; returns once the player quits
    pub fn run(&mut self) {
        if self.start_screen().is_break() {
            log::info!("Quit from start screen");
            return;
        }
        loop {
            let Continue(outcome) = self.play() else {
                log::info!("Quit during play");
                return;
            };
            if self.game_over_screen(outcome).is_break() {
                log::info!("Quit from end screen");
                return;
            }
        }
    }

    /// Show the title screen and block until confirm
    pub fn start_screen(&mut self) -> Flow {
        self.phase = GamePhase::Start;
        self.renderer.draw_screen(&Screen::Start);
        self.wait_for_confirm()?;
        self.begin_playing();
        Continue(())
    }

    /// Tick until the wave ends
    pub fn play(&mut self) -> Flow<Outcome> {
        loop {
            if let Some(outcome) = self.step()? {
                return Continue(outcome);
            }
            self.clock.wait_until_next_tick(self.settings.fps);
        }
    }

    /// One master tick: timers, input, shots, collisions, draw, then the
    /// win/lose check (so the deciding frame is always drawn).
    pub fn step(&mut self) -> Flow<Option<Outcome>> {
        if self.input.poll_events().into_iter().any(is_quit) || self.input.is_pressed(Key::Escape) {
            return Break(());
        }

        let due = self.scheduler.poll(self.clock.now_ms());
        let input = TickInput {
            left: self.input.is_pressed(Key::Left),
            right: self.input.is_pressed(Key::Right),
            fire: self.input.is_pressed(Key::Fire),
        };
        tick(&mut self.state, &input, &due);

        let events = self.state.drain_events();
        self.audio.play_events(&events);

        self.render();

        let outcome = self.state.outcome();
        if let Some(outcome) = outcome {
            log::info!("Wave over: {:?} with score {}", outcome, self.state.score);
            self.audio.play(SoundEffect::for_outcome(outcome));
            self.phase = GamePhase::GameOver;
        }
        Continue(outcome)
    }

    /// Pause on the last frame, show the result, block until confirm, then
    /// start a fresh run
    pub fn game_over_screen(&mut self, outcome: Outcome) -> Flow {
        self.phase = GamePhase::GameOver;
        self.hold(self.settings.game_over_delay_ms)?;
        self.renderer.draw_screen(&Screen::GameOver {
            outcome,
            score: self.state.score,
        });
        self.wait_for_confirm()?;
        self.begin_playing();
        Continue(())
    }

    /// Replace the run state with a fresh one
    pub fn reset(&mut self) {
        self.state = GameState::new(self.seeds.random(), self.settings.starting_lives);
        log::info!("New run with seed {}", self.state.seed);
    }

    /// Every wave starts from a brand new run; keys pressed on the blocking
    /// screens do not count as held.
    fn begin_playing(&mut self) {
        self.reset();
        self.input.release_all();
        self.scheduler.restart(self.clock.now_ms());
        self.phase = GamePhase::Playing;
        log::info!("Playing");
    }

    fn render(&mut self) {
        self.renderer.clear();
        for entity in self.state.drawables() {
            self.renderer.draw(entity);
        }
        self.renderer.present();
    }

    /// Let `ms` pass without advancing the simulation; quit is still honoured
    fn hold(&mut self, ms: u64) -> Flow {
        let start = self.clock.now_ms();
        while self.clock.now_ms().saturating_sub(start) < ms {
            if self.input.poll_events().into_iter().any(is_quit) {
                return Break(());
            }
            self.clock.wait_until_next_tick(self.settings.fps);
        }
        Continue(())
    }

    /// Block until confirm; everything else is discarded
    fn wait_for_confirm(&mut self) -> Flow {
        loop {
            for event in self.input.poll_events() {
                match event {
                    e if is_quit(e) => return Break(()),
                    InputEvent::KeyDown(Key::Confirm) => return Continue(()),
                    _ => {}
                }
            }
            self.clock.wait_until_next_tick(self.settings.fps);
        }
    }
}
