//! In-flight shots: the single player shot and the invader shot pool

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use crate::consts::*;

/// Shots currently on the playfield
#[derive(Debug, Clone, Default)]
pub struct Shots {
    /// At most one player shot at a time
    player: Option<Entity>,
    /// Invader shots, unordered
    invaders: Vec<Entity>,
}

impl Shots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_shot(&self) -> Option<&Entity> {
        self.player.as_ref()
    }

    pub fn invader_shots(&self) -> &[Entity] {
        &self.invaders
    }

    /// Fire from the player's cannon. Returns `false` (and does nothing)
    /// while a player shot is already in flight.
    pub fn fire(&mut self, player: &Entity) -> bool {
        if self.player.is_some() {
            return false;
        }
        self.player = Some(Entity::new(
            EntityKind::PlayerShot,
            player.rect.center_x(),
            SCREEN_HEIGHT - PLAYER_HEIGHT - SHOT_HEIGHT,
        ));
        true
    }

    /// Add an invader shot to the pool
    pub fn spawn_invader_shot(&mut self, shot: Entity) {
        debug_assert_eq!(shot.kind, EntityKind::InvaderShot);
        self.invaders.push(shot);
    }

    /// Move every shot one tick and drop the ones that left the screen.
    /// Returns the number of shots removed.
    pub fn advance(&mut self) -> usize {
        let mut removed = 0;

        if let Some(shot) = &mut self.player {
            shot.step(Vec2::new(0.0, -SHOT_PLAYER_SPEED));
            if shot.rect.top() <= 0.0 {
                self.player = None;
                removed += 1;
            }
        }

        for shot in &mut self.invaders {
            shot.step(Vec2::new(0.0, SHOT_INVADER_SPEED));
        }
        let before = self.invaders.len();
        self.invaders.retain(|shot| shot.rect.top() < SCREEN_HEIGHT);
        removed + (before - self.invaders.len())
    }

    /// Clear the player shot (it hit something)
    pub(crate) fn take_player_shot(&mut self) -> Option<Entity> {
        self.player.take()
    }

    /// Remove every invader shot whose index is listed
    pub(crate) fn remove_invader_shots(&mut self, indices: &[usize]) {
        super::retain_unlisted(&mut self.invaders, indices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Entity {
        Entity::new(
            EntityKind::Player,
            (SCREEN_WIDTH + PLAYER_WIDTH) / 2.0,
            SCREEN_HEIGHT - PLAYER_HEIGHT,
        )
    }

    #[test]
    fn test_fire_spawns_above_player_center() {
        let mut shots = Shots::new();
        assert!(shots.fire(&player()));
        let shot = shots.player_shot().unwrap();
        assert_eq!(shot.pos(), Vec2::new(400.0, 442.0));
    }

    #[test]
    fn test_fire_while_in_flight_is_noop() {
        let mut shots = Shots::new();
        assert!(shots.fire(&player()));
        shots.advance();
        let y = shots.player_shot().unwrap().pos().y;

        let mut moved = player();
        moved.move_to(0.0, moved.pos().y);
        assert!(!shots.fire(&moved));
        // First shot untouched
        assert_eq!(shots.player_shot().unwrap().pos(), Vec2::new(400.0, y));
    }

    #[test]
    fn test_player_shot_lifetime() {
        let mut shots = Shots::new();
        shots.fire(&player());
        // y = 442, speed 10: gone after ceil(44.2) = 45 advances
        for _ in 0..44 {
            shots.advance();
            assert!(shots.player_shot().is_some());
        }
        assert_eq!(shots.advance(), 1);
        assert!(shots.player_shot().is_none());
    }

    #[test]
    fn test_player_shot_at_top_removed_same_tick() {
        let mut shots = Shots::new();
        shots.fire(&player());
        shots.player.as_mut().unwrap().move_to(400.0, 0.0);
        shots.advance();
        assert!(shots.player_shot().is_none());
    }

    #[test]
    fn test_invader_shots_pruned_independently() {
        let mut shots = Shots::new();
        shots.spawn_invader_shot(Entity::new(EntityKind::InvaderShot, 10.0, SCREEN_HEIGHT - 2.0));
        shots.spawn_invader_shot(Entity::new(EntityKind::InvaderShot, 20.0, 100.0));
        shots.spawn_invader_shot(Entity::new(EntityKind::InvaderShot, 30.0, SCREEN_HEIGHT - 1.0));
        shots.spawn_invader_shot(Entity::new(EntityKind::InvaderShot, 40.0, 200.0));

        assert_eq!(shots.advance(), 2);
        let xs: Vec<f32> = shots.invader_shots().iter().map(|s| s.pos().x).collect();
        assert_eq!(xs, vec![20.0, 40.0]);
        assert_eq!(shots.invader_shots()[0].pos().y, 103.0);
        assert_eq!(shots.invader_shots()[1].pos().y, 203.0);
    }

    #[test]
    fn test_remove_invader_shots() {
        let mut shots = Shots::new();
        for i in 0..4 {
            shots.spawn_invader_shot(Entity::new(EntityKind::InvaderShot, i as f32, 0.0));
        }
        shots.remove_invader_shots(&[1, 2]);
        let xs: Vec<f32> = shots.invader_shots().iter().map(|s| s.pos().x).collect();
        assert_eq!(xs, vec![0.0, 3.0]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn player_shot_lives_ceil_y_over_speed_ticks(y in 1u32..=442, x in 0u32..650) {
                let mut shots = Shots::new();
                shots.fire(&player());
                shots.player.as_mut().unwrap().move_to(x as f32, y as f32);

                let expected = y.div_ceil(SHOT_PLAYER_SPEED as u32);
                let mut advances = 0;
                while shots.player_shot().is_some() {
                    shots.advance();
                    advances += 1;
                    prop_assert!(advances <= expected);
                }
                prop_assert_eq!(advances, expected);
            }
        }
    }
}
