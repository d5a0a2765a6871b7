//! Per-tick collision resolution
//!
//! Runs after motion, in a fixed order; each rule sees the removals made by
//! the rules before it:
//! 1. Invader shots hitting the player cost a life each.
//! 2. Invaders touching the player cost a life each (ramming is as costly as
//!    being shot).
//! 3. The player shot destroys at most one invader and scores a point.

use super::state::{GameEvent, GameState};

/// What collision resolution did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Invader shots that hit the player
    pub shots_on_player: usize,
    /// Invaders that rammed the player
    pub invaders_on_player: usize,
    /// Whether the player shot destroyed an invader
    pub invader_destroyed: bool,
}

impl CollisionReport {
    /// Lives lost this tick
    pub fn lives_lost(&self) -> usize {
        self.shots_on_player + self.invaders_on_player
    }
}

/// Resolve every collision for this tick
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    // 1. Invader shots vs player
    let hits: Vec<usize> = state
        .shots
        .invader_shots()
        .iter()
        .enumerate()
        .filter(|(_, shot)| shot.collides(&state.player))
        .map(|(i, _)| i)
        .collect();
    state.shots.remove_invader_shots(&hits);
    for _ in &hits {
        damage_player(state);
    }
    report.shots_on_player = hits.len();

    // 2. Invaders vs player
    let rams: Vec<usize> = state
        .formation
        .invaders()
        .iter()
        .enumerate()
        .filter(|(_, invader)| invader.collides(&state.player))
        .map(|(i, _)| i)
        .collect();
    state.formation.remove_indices(&rams);
    for _ in &rams {
        damage_player(state);
    }
    report.invaders_on_player = rams.len();

    // 3. Player shot vs invaders (first match only)
    if let Some(shot) = state.shots.player_shot() {
        let target = state
            .formation
            .invaders()
            .iter()
            .position(|invader| invader.collides(shot));
        if let Some(index) = target {
            state.formation.remove(index);
            state.shots.take_player_shot();
            state.score += 1;
            state.events.push(GameEvent::InvaderHit);
            report.invader_destroyed = true;
            log::debug!("Invader destroyed, score {}", state.score);
        }
    }

    report
}

fn damage_player(state: &mut GameState) {
    state.lives.lose_one();
    state.events.push(GameEvent::PlayerHit);
    log::debug!("Player hit, {} lives left", state.lives.count());
}
