//! Platform abstraction layer
//!
//! The game core talks to the outside world only through these traits:
//! - `Renderer`: draw entities and full screens, flush frames
//! - `AudioPlayer`: fire-and-forget named sounds
//! - `InputSource`: held-key queries and discrete key/quit events
//! - `Clock`: millisecond time and tick pacing
//!
//! Native implementations live in the submodules.

pub mod clock;
pub mod terminal_input;

pub use clock::SystemClock;
pub use terminal_input::TerminalInput;

use crate::sim::{Entity, Outcome};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Confirm,
    Escape,
}

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed / interrupt
    Quit,
    KeyDown(Key),
}

/// Full-screen overlays shown outside of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    GameOver { outcome: Outcome, score: u32 },
}

/// Draws frames. Failures are the implementation's problem; the core never
/// observes them.
pub trait Renderer {
    fn clear(&mut self);
    fn draw(&mut self, entity: &Entity);
    fn draw_screen(&mut self, screen: &Screen);
    /// Flush the frame
    fn present(&mut self);
}

/// Plays named sounds
pub trait AudioPlayer {
    fn play(&mut self, sound: &str, looping: bool);
    fn stop(&mut self, sound: &str);
    /// Effective output volume in 0.0..=1.0
    fn set_volume(&mut self, _volume: f32) {}
}

/// Keyboard state
pub trait InputSource {
    /// Whether `key` is currently held
    fn is_pressed(&self, key: Key) -> bool;
    /// Drain pending discrete events
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Forget every held key
    fn release_all(&mut self) {}
}

/// Time source and frame pacing
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
    /// Block until the next tick at `fps` ticks per second is due
    fn wait_until_next_tick(&mut self, fps: u32);
}
