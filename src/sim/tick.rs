//! Fixed-rate simulation tick
//!
//! Advances one run by one master tick: formation timers, player input,
//! shot motion and collisions. Rendering and the win/lose check happen in
//! the game loop after this returns.

use glam::Vec2;

use super::collision::{CollisionReport, resolve_collisions};
use super::schedule::{DueTimers, TimerId};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Held-key snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, due: &DueTimers) -> CollisionReport {
    state.time_ticks += 1;

    // Formation timers
    if due.is_due(TimerId::MoveX) {
        state.formation.advance_horizontal();
    }
    if due.is_due(TimerId::MoveY) {
        let escaped = state.formation.advance_vertical();
        for _ in 0..escaped {
            state.events.push(GameEvent::InvaderEscaped);
        }
        if escaped > 0 {
            log::debug!("{} invader(s) escaped off the bottom", escaped);
        }
    }
    if due.is_due(TimerId::Shoot) {
        if let Some(shot) = state.formation.shoot(&mut state.rng) {
            state.shots.spawn_invader_shot(shot);
            state.events.push(GameEvent::InvaderFired);
        }
    }

    // Player input; opposite keys cancel out
    if input.left {
        state.player.step(Vec2::new(-PLAYER_SPEED, 0.0));
    }
    if input.right {
        state.player.step(Vec2::new(PLAYER_SPEED, 0.0));
    }
    if input.fire && state.shots.fire(&state.player) {
        state.events.push(GameEvent::PlayerFired);
    }

    state.shots.advance();

    resolve_collisions(state)
}
