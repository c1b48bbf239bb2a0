//! CollisionIndex: "would this rect, moved by (dx, dy), hit anything?"
//!
//! Two obstacle sets:
//! - static: level geometry (+ encounter barriers while the gate is closed)
//! - dynamic: hitboxes of live enemies, wholly replaced once per frame
//!
//! Movers read whatever snapshot the previous rebuild left, so an enemy
//! moving this frame is tested against the others' positions from last frame.

use bevy::prelude::*;

use super::rect::{overlaps, translated};
use crate::enemy::Enemy;

#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionIndex {
    static_obstacles: Vec<IRect>,
    dynamic: Vec<(Entity, IRect)>,
}

impl CollisionIndex {
    pub fn new(static_obstacles: Vec<IRect>) -> Self {
        Self {
            static_obstacles,
            dynamic: Vec::new(),
        }
    }

    pub fn set_static(&mut self, obstacles: Vec<IRect>) {
        self.static_obstacles = obstacles;
    }

    pub fn static_obstacles(&self) -> &[IRect] {
        &self.static_obstacles
    }

    /// Replace the whole dynamic set
    pub fn replace_dynamic(&mut self, dynamic: impl IntoIterator<Item = (Entity, IRect)>) {
        self.dynamic.clear();
        self.dynamic.extend(dynamic);
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.len()
    }

    /// True iff `rect` translated by (dx, dy) overlaps any obstacle
    pub fn blocked(&self, rect: IRect, dx: i32, dy: i32) -> bool {
        let moved = translated(rect, dx, dy);
        self.static_obstacles.iter().any(|obstacle| overlaps(moved, *obstacle))
            || self.dynamic.iter().any(|(_, obstacle)| overlaps(moved, *obstacle))
    }

    /// Same as `blocked`, skipping the dynamic entry contributed by `owner`
    ///
    /// An enemy's own hitbox is in the dynamic set; without this it would
    /// block itself on every step.
    pub fn blocked_ignoring(&self, rect: IRect, dx: i32, dy: i32, owner: Entity) -> bool {
        let moved = translated(rect, dx, dy);
        self.static_obstacles.iter().any(|obstacle| overlaps(moved, *obstacle))
            || self
                .dynamic
                .iter()
                .any(|(entity, obstacle)| *entity != owner && overlaps(moved, *obstacle))
    }
}

/// System: rebuild the dynamic set from enemies that still occupy space
///
/// Dying and dead enemies have a zeroed hitbox and are skipped.
pub fn rebuild_dynamic_collision(enemies: Query<(Entity, &Enemy)>, mut index: ResMut<CollisionIndex>) {
    index.replace_dynamic(
        enemies
            .iter()
            .filter(|(_, enemy)| enemy.occupies_space())
            .map(|(entity, enemy)| (entity, enemy.hitbox)),
    );
}
