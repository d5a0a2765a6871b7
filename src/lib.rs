//! Invaders - a descending-formation arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, shots, collisions)
//! - `game`: Start / Playing / GameOver state machine and the fixed-rate loop
//! - `platform`: Renderer, audio, input and clock capabilities plus native impls
//! - `renderer`: Terminal renderer
//! - `audio`: Sound effect catalogue and volume handling
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Flow, Game, GamePhase};
pub use platform::Screen;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 700.0;
    pub const SCREEN_HEIGHT: f32 = 497.0;

    /// Master tick rate
    pub const FPS: u32 = 60;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Horizontal step per tick while a direction key is held
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Shots (player and invader share a size)
    pub const SHOT_WIDTH: f32 = 3.0;
    pub const SHOT_HEIGHT: f32 = 5.0;
    pub const SHOT_PLAYER_SPEED: f32 = 10.0;
    pub const SHOT_INVADER_SPEED: f32 = 3.0;

    /// Invaders
    pub const INVADER_WIDTH: f32 = 25.0;
    pub const INVADER_HEIGHT: f32 = 18.0;
    /// Step per horizontal timer firing
    pub const INVADER_X_SPEED: f32 = 3.0;
    /// Step per vertical timer firing
    pub const INVADER_Y_SPEED: f32 = 3.0;

    /// Starting formation layout
    pub const FORMATION_COLUMNS: usize = 10;
    pub const FORMATION_ROWS: usize = 5;
    pub const FORMATION_LEFT: f32 = 100.0;
    pub const FORMATION_SPACING: f32 = 50.0;

    /// Formation timers (milliseconds)
    pub const INVADER_TIME_X_MS: u64 = 500;
    pub const INVADER_TIME_Y_MS: u64 = 2000;
    pub const INVADER_TIME_SHOOT_MS: u64 = 1000;

    /// Life icons, laid out right to left from the top-right corner
    pub const LIFE_ICON_SIZE: f32 = 20.0;
    pub const LIFE_ICON_MARGIN: f32 = 5.0;

    /// Pause between the last frame of a wave and the end screen
    pub const GAME_OVER_DELAY_MS: u64 = 1000;
}
