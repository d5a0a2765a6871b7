//! Keyboard input from the terminal
//!
//! Terminals report key presses, not key state. Held keys are tracked by the
//! time they were last seen:
//! * With keyboard enhancement (kitty protocol and friends) the terminal sends
//!   real `Release` events and a key stays held until released.
//! * Classic terminals only send `Press` (OS auto-repeat shows up as repeated
//!   presses); a key counts as held for `HOLD_WINDOW` after its last press.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{InputEvent, InputSource, Key};

/// How long a key stays "held" after its last press/repeat on terminals
/// without release events. Longer than the OS repeat interval.
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Map a terminal key code to a game key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Escape),
        _ => None,
    }
}

/// Crossterm-backed `InputSource`
#[derive(Debug)]
pub struct TerminalInput {
    /// Key -> when it was last pressed or repeated
    held: HashMap<Key, Instant>,
    /// Terminal delivers release events
    release_events: bool,
}

impl TerminalInput {
    pub fn new(release_events: bool) -> Self {
        Self {
            held: HashMap::new(),
            release_events,
        }
    }

    /// Fold one terminal event into the held-key map; returns the discrete
    /// event it represents, if any.
    pub fn handle(&mut self, event: Event, now: Instant) -> Option<InputEvent> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event
        else {
            return None;
        };

        if kind == KeyEventKind::Press
            && code == KeyCode::Char('c')
            && modifiers.contains(KeyModifiers::CONTROL)
        {
            return Some(InputEvent::Quit);
        }

        let key = map_key(code)?;
        match kind {
            KeyEventKind::Press => {
                self.held.insert(key, now);
                Some(InputEvent::KeyDown(key))
            }
            KeyEventKind::Repeat => {
                self.held.insert(key, now);
                None
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
                None
            }
        }
    }

    /// Whether `key` counts as held at `now`
    pub fn is_held_at(&self, key: Key, now: Instant) -> bool {
        self.held.get(&key).is_some_and(|&last| {
            self.release_events || now.saturating_duration_since(last) <= HOLD_WINDOW
        })
    }
}

impl InputSource for TerminalInput {
    fn is_pressed(&self, key: Key) -> bool {
        self.is_held_at(key, Instant::now())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    log::warn!("Input poll failed: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(ev) => events.extend(self.handle(ev, Instant::now())),
                Err(e) => {
                    log::warn!("Input read failed: {}", e);
                    break;
                }
            }
        }
        events
    }

    fn release_all(&mut self) {
        self.held.clear();
    }
}
