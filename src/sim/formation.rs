//! Invader formation: the swarm that marches sideways and creeps down
//!
//! Horizontal steps, vertical steps and shooting are driven by three
//! independent timers, not by the master tick.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityKind};
use crate::consts::*;

/// Shared horizontal heading of the formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Left,
    Right,
}

/// Ordered set of live invaders plus their shared direction.
///
/// Order is spawn order. The first invader is treated as the leftmost and the
/// last as the rightmost when checking for an edge bounce.
#[derive(Debug, Clone)]
pub struct Formation {
    invaders: Vec<Entity>,
    direction: Direction,
}

impl Default for Formation {
    fn default() -> Self {
        Self::new()
    }
}

impl Formation {
    /// Full starting layout, column-major, heading left
    pub fn new() -> Self {
        let mut invaders = Vec::with_capacity(FORMATION_COLUMNS * FORMATION_ROWS);
        for col in 0..FORMATION_COLUMNS {
            for row in 0..FORMATION_ROWS {
                invaders.push(Entity::new(
                    EntityKind::Invader,
                    FORMATION_LEFT + col as f32 * FORMATION_SPACING,
                    row as f32 * FORMATION_SPACING,
                ));
            }
        }
        Self::from_invaders(invaders, Direction::Left)
    }

    /// Build a formation from an explicit invader list
    pub fn from_invaders(invaders: Vec<Entity>, direction: Direction) -> Self {
        Self {
            invaders,
            direction,
        }
    }

    pub fn invaders(&self) -> &[Entity] {
        &self.invaders
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    /// Step every invader sideways, then bounce off the screen edges.
    ///
    /// The right edge is checked first; the left edge is only checked when
    /// the right one did not trigger.
    pub fn advance_horizontal(&mut self) {
        let dx = match self.direction {
            Direction::Left => -INVADER_X_SPEED,
            Direction::Right => INVADER_X_SPEED,
        };
        for invader in &mut self.invaders {
            invader.step(Vec2::new(dx, 0.0));
        }

        let (Some(leftmost), Some(rightmost)) = (self.invaders.first(), self.invaders.last()) else {
            return;
        };
        if rightmost.rect.right() >= SCREEN_WIDTH {
            self.direction = Direction::Left;
        } else if leftmost.rect.left() <= 0.0 {
            self.direction = Direction::Right;
        }
    }

    /// Step every invader down; invaders that have fallen off the bottom
    /// escape and are dropped. Returns the number that escaped.
    pub fn advance_vertical(&mut self) -> usize {
        for invader in &mut self.invaders {
            invader.step(Vec2::new(0.0, INVADER_Y_SPEED));
        }

        let before = self.invaders.len();
        self.invaders
            .retain(|inv| inv.rect.top() < SCREEN_HEIGHT + inv.rect.size.y);
        before - self.invaders.len()
    }

    /// Pick a random invader and spawn a shot just below its center.
    /// `None` when the formation is empty.
    pub fn shoot(&self, rng: &mut impl Rng) -> Option<Entity> {
        if self.invaders.is_empty() {
            return None;
        }
        let shooter = &self.invaders[rng.random_range(0..self.invaders.len())];
        Some(Entity::new(
            EntityKind::InvaderShot,
            shooter.rect.center_x(),
            shooter.rect.bottom(),
        ))
    }

    /// Remove the invader at `index`, keeping the order of the rest
    pub(crate) fn remove(&mut self, index: usize) -> Option<Entity> {
        (index < self.invaders.len()).then(|| self.invaders.remove(index))
    }

    /// Remove every invader whose index is listed, keeping the order of the rest
    pub(crate) fn remove_indices(&mut self, indices: &[usize]) {
        super::retain_unlisted(&mut self.invaders, indices);
    }
}
