//! Enemy as an effect hit target

use bevy::prelude::*;

use super::components::Enemy;
use crate::effects::{DamageOutcome, HitTarget};

/// Borrowed view of an enemy for `SkillEffectEngine::resolve_hits`
pub struct EnemyTarget<'w> {
    pub entity: Entity,
    enemy: Mut<'w, Enemy>,
}

impl<'w> EnemyTarget<'w> {
    pub fn new(entity: Entity, enemy: Mut<'w, Enemy>) -> Self {
        Self { entity, enemy }
    }
}

impl HitTarget for EnemyTarget<'_> {
    fn entity(&self) -> Entity {
        self.entity
    }

    fn hitbox(&self) -> IRect {
        self.enemy.hitbox
    }

    fn center(&self) -> Vec2 {
        self.enemy.center()
    }

    fn is_targetable(&self) -> bool {
        self.enemy.occupies_space()
    }

    fn receive_damage(&mut self, amount: u32) -> DamageOutcome {
        self.enemy.take_damage(amount)
    }
}
