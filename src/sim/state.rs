//! Per-run game state and core simulation types
//!
//! Everything that belongs to one wave lives in `GameState`. A restart builds
//! a brand new `GameState`; nothing is carried over.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind};
use super::formation::Formation;
use super::shots::Shots;
use crate::consts::*;

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player launched a shot
    PlayerFired,
    /// An invader launched a shot
    InvaderFired,
    /// Player lost a life (shot or rammed)
    PlayerHit,
    /// Player shot destroyed an invader
    InvaderHit,
    /// An invader fell off the bottom of the screen
    InvaderEscaped,
}

/// How a wave ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Remaining lives, shown as a row of icons
#[derive(Debug, Clone)]
pub struct Lives {
    icons: Vec<Entity>,
}

impl Lives {
    pub fn new(count: u8) -> Self {
        let icons = (0..count)
            .map(|i| {
                let x = SCREEN_WIDTH - (i as f32 + 1.0) * (LIFE_ICON_SIZE + LIFE_ICON_MARGIN);
                Entity::new(EntityKind::LifeIcon, x, LIFE_ICON_MARGIN)
            })
            .collect();
        Self { icons }
    }

    pub fn count(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn icons(&self) -> &[Entity] {
        &self.icons
    }

    /// Drop one icon; no-op once none are left
    pub fn lose_one(&mut self) {
        self.icons.pop();
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Player avatar
    pub player: Entity,
    /// Live invaders
    pub formation: Formation,
    /// Shots in flight
    pub shots: Shots,
    /// Remaining lives
    pub lives: Lives,
    /// Invaders destroyed by the player
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Drives invader target selection
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh run: new player, full formation, full lives, zero score
    pub fn new(seed: u64, starting_lives: u8) -> Self {
        Self {
            seed,
            player: Entity::new(
                EntityKind::Player,
                (SCREEN_WIDTH + PLAYER_WIDTH) / 2.0,
                SCREEN_HEIGHT - PLAYER_HEIGHT,
            ),
            formation: Formation::new(),
            shots: Shots::new(),
            lives: Lives::new(starting_lives),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every entity that should be drawn this frame, back to front
    pub fn drawables(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.player)
            .chain(self.formation.invaders())
            .chain(self.shots.invader_shots())
            .chain(self.shots.player_shot())
            .chain(self.lives.icons())
    }

    /// Defeat takes precedence over victory when both hold
    pub fn outcome(&self) -> Option<Outcome> {
        if self.lives.is_empty() {
            Some(Outcome::Defeat)
        } else if self.formation.is_empty() {
            Some(Outcome::Victory)
        } else {
            None
        }
    }
}
