//! Skill effects: live instances, hit resolution, presentation events.
//!
//! Architecture:
//! - `engine`: SkillEffectEngine resource (tagged effect variants)
//! - `systems`: per-tick update + hit resolution against enemies
//! - `events`: everything the host presents (damage, heals, buffs, combo flashes)
//!
//! Order inside CombatSet::Effects: update → resolve hits.

use bevy::prelude::*;

pub mod engine;
pub mod events;
pub mod systems;

pub use engine::{
    Anchor, DamageOutcome, EffectId, EffectInstance, EffectKind, EffectOrigin, HitReport, HitTarget, SkillEffectEngine,
};
pub use events::{
    BuffActivated, ComboFeedback, ComboFeedbackKind, DamageAbsorbed, DamageDealt, EncounterCleared, EntityDied,
    ExpCollected, HealApplied, LevelUp,
};
pub use systems::{resolve_skill_hits, update_skill_effects};

use crate::CombatSet;

/// Effects Plugin
///
/// Registers presentation events and the effect pipeline:
/// 1. update_skill_effects: frames, flight, lifetimes
/// 2. resolve_skill_hits: damage + DamageDealt / EntityDied
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageDealt>()
            .add_event::<DamageAbsorbed>()
            .add_event::<EntityDied>()
            .add_event::<HealApplied>()
            .add_event::<BuffActivated>()
            .add_event::<ComboFeedback>()
            .add_event::<ExpCollected>()
            .add_event::<LevelUp>()
            .add_event::<EncounterCleared>();

        app.add_systems(
            FixedUpdate,
            (update_skill_effects, resolve_skill_hits)
                .chain()
                .in_set(CombatSet::Effects),
        );
    }
}

#[cfg(test)]
mod engine_tests;
