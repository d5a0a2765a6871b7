//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven by the master tick plus caller-supplied timer firings
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod formation;
pub mod rect;
pub mod schedule;
pub mod shots;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve_collisions};
pub use entity::{Entity, EntityKind, constrain};
pub use formation::{Direction, Formation};
pub use rect::Rect;
pub use schedule::{DueTimers, Scheduler, TimerId, TimerIntervals};
pub use shots::Shots;
pub use state::{GameEvent, GameState, Lives, Outcome};
pub use tick::{TickInput, tick};

/// Drop the elements at `indices` in one pass, keeping the rest in order.
///
/// Matches are collected first and filtered afterwards so removal never
/// skips a neighbour.
pub(crate) fn retain_unlisted<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !indices.contains(&index);
        index += 1;
        keep
    });
}
