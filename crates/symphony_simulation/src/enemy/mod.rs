//! Enemies: profiles, roster, animation-driven AI.
//!
//! Architecture:
//! - `profile`: content (EnemyProfiles, SpawnRecord, SpawnError)
//! - `components`: Enemy actor (state machine + movement)
//! - `roster`: EnemyRoster resource (bulk spawn → SpawnReport, all_defeated)
//! - `target`: Enemy as a HitTarget for the effect engine
//! - `systems`: think / strike / move

use bevy::prelude::*;

pub mod components;
pub mod profile;
pub mod roster;
pub mod systems;
pub mod target;

pub use components::{AnimationTick, Enemy, EnemyAnimation};
pub use profile::{EnemyArchetype, EnemyProfile, EnemyProfiles, FrameCounts, SpawnError, SpawnRecord};
pub use roster::{build_enemy, EnemyRoster, SkippedSpawn, SpawnReport};
pub use systems::{apply_enemy_movement, apply_enemy_strikes, enemy_think, EnemyDefeated, EnemyStrike};
pub use target::EnemyTarget;

use crate::physics::rebuild_dynamic_collision;
use crate::CombatSet;

/// Enemy Plugin
///
/// 1. enemy_think (Input): animation, strikes, decisions
/// 2. apply_enemy_strikes (Input): strikes land on the player
/// 3. apply_enemy_movement (Integrate)
/// 4. rebuild_dynamic_collision (Collision)
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyStrike>().add_event::<EnemyDefeated>();

        app.add_systems(
            FixedUpdate,
            (
                (enemy_think, apply_enemy_strikes)
                    .chain()
                    .in_set(CombatSet::Input)
                    .after(crate::player::player_input),
                apply_enemy_movement.in_set(CombatSet::Integrate),
                rebuild_dynamic_collision.in_set(CombatSet::Collision),
            ),
        );
    }
}
