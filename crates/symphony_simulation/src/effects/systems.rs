//! Effect systems: advance the engine, then resolve hits against enemies.

use bevy::prelude::*;

use super::engine::{DamageOutcome, SkillEffectEngine};
use super::events::{DamageDealt, EntityDied};
use crate::clock::CombatClock;
use crate::enemy::{Enemy, EnemyTarget};
use crate::physics::center_of;
use crate::player::Player;

/// System: advance animations/flight/lifetimes and retire finished effects
pub fn update_skill_effects(
    clock: Res<CombatClock>,
    mut engine: ResMut<SkillEffectEngine>,
    players: Query<&Player>,
) {
    let now = clock.now_ms();
    engine.update(now, clock.delta_ms(), |owner| players.get(owner).ok().map(|player| center_of(player.rect)));
}

/// System: apply effect damage to enemies and report it
pub fn resolve_skill_hits(
    clock: Res<CombatClock>,
    mut engine: ResMut<SkillEffectEngine>,
    mut enemies: Query<(Entity, &mut Enemy)>,
    mut damage_events: EventWriter<DamageDealt>,
    mut death_events: EventWriter<EntityDied>,
) {
    if engine.is_empty() {
        return;
    }

    let mut targets: Vec<EnemyTarget<'_>> = enemies
        .iter_mut()
        .map(|(entity, enemy)| EnemyTarget::new(entity, enemy))
        .collect();
    // Stable order so "first target hit" does not depend on archetype layout
    targets.sort_by_key(|target| target.entity);

    let reports = engine.resolve_hits(&mut targets, clock.now_ms());

    for report in reports {
        if report.outcome == DamageOutcome::Ignored {
            continue;
        }

        let lethal = report.outcome == DamageOutcome::Killed;
        crate::log(&format!(
            "🎵 {:?} hit {:?} for {} ({})",
            report.effect,
            report.target,
            report.damage,
            if lethal { "killed" } else { "hurt" }
        ));

        damage_events.write(DamageDealt {
            source: report.owner,
            target: report.target,
            amount: report.damage,
            lethal,
            anchor: report.anchor,
        });

        if lethal {
            death_events.write(EntityDied {
                entity: report.target,
                killer: report.owner,
            });
        }
    }
}
