//! EnemyRoster: the enemies of the active encounter.
//!
//! Spawning is per-record: a bad record is skipped and reported, the rest of
//! the level still spawns.

use bevy::prelude::*;

use super::components::Enemy;
use super::profile::{EnemyArchetype, EnemyProfiles, SpawnError, SpawnRecord};

/// A record that did not spawn, and why
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSpawn {
    pub index: usize,
    pub record: SpawnRecord,
    pub reason: SpawnError,
}

/// Outcome of a bulk spawn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnReport {
    pub spawned: Vec<Entity>,
    pub skipped: Vec<SkippedSpawn>,
}

impl SpawnReport {
    pub fn succeeded(&self) -> usize {
        self.spawned.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Build one enemy from a record
pub fn build_enemy(record: &SpawnRecord, profiles: &EnemyProfiles) -> Result<Enemy, SpawnError> {
    if !record.x.is_finite() || !record.y.is_finite() {
        return Err(SpawnError::InvalidPosition {
            x: record.x,
            y: record.y,
        });
    }
    let archetype = EnemyArchetype::parse(&record.archetype)?;
    let profile = profiles
        .get(&record.profile)
        .ok_or_else(|| SpawnError::UnknownProfile(record.profile.clone()))?;

    Ok(Enemy::new(&record.profile, archetype, profile, record.x, record.y))
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EnemyRoster {
    members: Vec<Entity>,
}

impl EnemyRoster {
    /// Replace the roster with enemies built from `records`.
    ///
    /// `spawn` places a built enemy in the world and returns its entity
    /// (`World::spawn` or `Commands::spawn`).
    pub fn spawn_from_records(
        &mut self,
        records: &[SpawnRecord],
        profiles: &EnemyProfiles,
        mut spawn: impl FnMut(Enemy) -> Entity,
    ) -> SpawnReport {
        self.members.clear();
        let mut report = SpawnReport::default();

        for (index, record) in records.iter().enumerate() {
            match build_enemy(record, profiles) {
                Ok(enemy) => {
                    let entity = spawn(enemy);
                    self.members.push(entity);
                    report.spawned.push(entity);
                    crate::log(&format!(
                        "👾 Spawned {} '{}' at ({}, {}) → {:?}",
                        record.archetype, record.profile, record.x, record.y, entity
                    ));
                }
                Err(reason) => {
                    crate::log_error(&format!("Skipped enemy record #{} {:?}: {}", index, record, reason));
                    report.skipped.push(SkippedSpawn {
                        index,
                        record: record.clone(),
                        reason,
                    });
                }
            }
        }

        report
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// True iff every member finished its death animation.
    ///
    /// `death_finished` returns `None` for an entity that no longer exists,
    /// which counts as defeated.
    pub fn all_defeated(&self, death_finished: impl Fn(Entity) -> Option<bool>) -> bool {
        self.members.iter().all(|entity| death_finished(*entity).unwrap_or(true))
    }
}
