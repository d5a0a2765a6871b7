//! Positioned, sized game objects
//!
//! Every object on the playfield is an `Entity`: a kind tag plus a rectangle.
//! Kinds differ only in size and in how a proposed move is constrained.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::*;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    PlayerShot,
    Invader,
    InvaderShot,
    LifeIcon,
}

impl EntityKind {
    /// Fixed size for this kind
    pub fn size(self) -> Vec2 {
        match self {
            EntityKind::Player => Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            EntityKind::PlayerShot | EntityKind::InvaderShot => Vec2::new(SHOT_WIDTH, SHOT_HEIGHT),
            EntityKind::Invader => Vec2::new(INVADER_WIDTH, INVADER_HEIGHT),
            EntityKind::LifeIcon => Vec2::splat(LIFE_ICON_SIZE),
        }
    }
}

/// Apply the per-kind movement rule to a proposed position.
///
/// - Player: a move that would leave `[0, SCREEN_WIDTH - PLAYER_WIDTH]` is
///   rejected and the current position kept.
/// - PlayerShot: y never goes above the top edge.
/// - InvaderShot: y never goes below the bottom edge.
/// - Invader, LifeIcon: unconstrained.
pub fn constrain(kind: EntityKind, current: Vec2, proposed: Vec2) -> Vec2 {
    match kind {
        EntityKind::Player => {
            if proposed.x >= 0.0 && proposed.x <= SCREEN_WIDTH - PLAYER_WIDTH {
                proposed
            } else {
                current
            }
        }
        EntityKind::PlayerShot => Vec2::new(proposed.x, proposed.y.max(0.0)),
        EntityKind::InvaderShot => Vec2::new(proposed.x, proposed.y.min(SCREEN_HEIGHT)),
        EntityKind::Invader | EntityKind::LifeIcon => proposed,
    }
}

/// A game object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub rect: Rect,
}

impl Entity {
    /// Create an entity of `kind` with its top-left corner at (x, y)
    pub fn new(kind: EntityKind, x: f32, y: f32) -> Self {
        let size = kind.size();
        Self {
            kind,
            rect: Rect::new(x, y, size.x, size.y),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }

    /// AABB collision with another entity
    #[inline]
    pub fn collides(&self, other: &Entity) -> bool {
        self.rect.overlaps(&other.rect)
    }

    /// Replace the position outright
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.rect.pos = Vec2::new(x, y);
    }

    /// Move by an offset, subject to this kind's movement rule
    pub fn step(&mut self, delta: Vec2) {
        let current = self.rect.pos;
        self.rect.pos = constrain(self.kind, current, current + delta);
    }
}
