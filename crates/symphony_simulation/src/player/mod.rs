//! Player actor: input, movement, skill casting, combo patterns.
//!
//! Architecture:
//! - `input`: InputSnapshot (held keys, written by the host) + KeyEdges
//! - `components`: Player component (cooldowns, buffs, dash, progression)
//! - `casting`: SkillDefinition → engine calls, shared by notes and patterns
//! - `systems`: per-tick systems registered by PlayerPlugin

use bevy::prelude::*;

pub mod casting;
pub mod components;
pub mod input;
pub mod systems;

pub use casting::{cast_skill, release_charge, CastOutcome};
pub use components::{AttackBuff, DashState, Player, PlayerHit};
pub use input::{track_key_edges, InputSnapshot, KeyEdges, LogicalKey};
pub use systems::{check_combo_patterns, move_player, player_input, update_combo_trackers, update_player_resources};

use crate::combo::ComboTracker;
use crate::components::{Health, Stamina};
use crate::config::CombatConfig;
use crate::CombatSet;

/// Spawn a fully equipped player at `top_left`
pub fn spawn_player(world: &mut World, top_left: IVec2, config: &CombatConfig) -> Entity {
    let player = &config.player;
    world
        .spawn((
            Player::new(top_left, player),
            Health::new(player.max_health),
            Stamina::new(player.stamina_max, player.stamina_regen_rate, player.stamina_regen_delay_ms),
            ComboTracker::new(config.combo.clone()),
        ))
        .id()
}

/// Player Plugin
///
/// Input set: key edges → input (dash, notes, charge release)
/// Integrate set: movement
/// Combo set: patterns → tracker update → dash/stamina
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                (track_key_edges, player_input).chain().in_set(CombatSet::Input),
                move_player.in_set(CombatSet::Integrate),
                (check_combo_patterns, update_combo_trackers, update_player_resources)
                    .chain()
                    .in_set(CombatSet::Combo),
            ),
        );
    }
}
