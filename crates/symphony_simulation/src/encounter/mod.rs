//! Encounter: one level's fight, from spawn to barrier drop.
//!
//! Architecture:
//! - `level`: LevelDefinition content (obstacles, barriers, spawn records)
//! - `begin_encounter`: (re)builds player, roster, effects, pickups, collision
//! - `check_encounter_cleared`: Present-set system dropping the barriers

use bevy::prelude::*;

pub mod level;

pub use level::LevelDefinition;

use crate::config::CombatConfig;
use crate::effects::{EncounterCleared, SkillEffectEngine};
use crate::enemy::{Enemy, EnemyProfiles, EnemyRoster, SpawnReport};
use crate::physics::CollisionIndex;
use crate::pickups::ExpPickupPool;
use crate::player::{spawn_player, KeyEdges, Player};
use crate::CombatSet;

/// Active encounter
#[derive(Resource, Debug, Clone, Default)]
pub struct Encounter {
    pub level: LevelDefinition,
    pub player: Option<Entity>,
    pub cleared: bool,
}

/// Start `level` from scratch. Also the retry path.
///
/// Despawns the previous player and enemies, then recreates the player,
/// the roster, an empty effect set and pickup pool, and the sealed
/// obstacle set.
pub fn begin_encounter(world: &mut World, level: LevelDefinition) -> SpawnReport {
    let stale: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Player>, With<Enemy>)>>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    let config = world.get_resource_or_init::<CombatConfig>().clone();
    let profiles = world.get_resource_or_init::<EnemyProfiles>().clone();

    world.get_resource_or_init::<EnemyRoster>();
    let report = world.resource_scope(|world, mut roster: Mut<EnemyRoster>| {
        roster.spawn_from_records(&level.enemies, &profiles, |enemy| world.spawn(enemy).id())
    });

    let player = spawn_player(world, level.start(), &config);

    let dynamic: Vec<(Entity, IRect)> = report
        .spawned
        .iter()
        .filter_map(|entity| world.get::<Enemy>(*entity).map(|enemy| (*entity, enemy.hitbox)))
        .collect();
    let mut collision = CollisionIndex::new(level.sealed_obstacles());
    collision.replace_dynamic(dynamic);
    world.insert_resource(collision);

    world.insert_resource(SkillEffectEngine::new(config.effects.clone()));
    world.insert_resource(ExpPickupPool::default());
    world.get_resource_or_init::<KeyEdges>().reset();

    crate::log_info(&format!(
        "⚔️ Encounter '{}' begins: {} enemies ({} skipped)",
        level.name,
        report.succeeded(),
        report.skipped.len()
    ));

    world.insert_resource(Encounter {
        level,
        player: Some(player),
        cleared: false,
    });

    report
}

/// Restart the current level
pub fn retry_encounter(world: &mut World) -> SpawnReport {
    let level = world.get_resource_or_init::<Encounter>().level.clone();
    begin_encounter(world, level)
}

/// System: once every enemy finished dying, drop the barriers
pub fn check_encounter_cleared(
    mut encounter: ResMut<Encounter>,
    roster: Res<EnemyRoster>,
    enemies: Query<&Enemy>,
    mut collision: ResMut<CollisionIndex>,
    mut cleared_events: EventWriter<EncounterCleared>,
) {
    if encounter.cleared || encounter.player.is_none() {
        return;
    }
    if !roster.all_defeated(|entity| enemies.get(entity).ok().map(|enemy| enemy.death_finished())) {
        return;
    }

    encounter.cleared = true;
    collision.set_static(encounter.level.static_obstacles());
    crate::log_info(&format!("🏁 Encounter '{}' cleared, barriers down", encounter.level.name));
    cleared_events.write(EncounterCleared {
        level: encounter.level.name.clone(),
    });
}

/// Encounter Plugin
pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, check_encounter_cleared.in_set(CombatSet::Present));
    }
}
