//! Skill casting: turns a SkillDefinition into engine calls for one caster.
//!
//! Shared by single note presses and combo patterns; patterns only differ
//! by the SkillModifier they pass in.

use bevy::prelude::*;

use super::components::{AttackBuff, Player};
use crate::components::Health;
use crate::effects::{BuffActivated, EffectOrigin, HealApplied, SkillEffectEngine};
use crate::physics::center_of;
use crate::skills::{BuffKind, SkillBehavior, SkillDefinition, SkillModifier};

/// What a cast produced (buff/heal carry the event to report)
#[derive(Debug, Clone, PartialEq)]
pub enum CastOutcome {
    /// Skill still cooling down
    NotReady,
    /// Nothing could be spawned (no animation, no projectile behavior)
    Fizzled,
    Spawned,
    ChargeStarted,
    Buffed(BuffActivated),
    Healed(HealApplied),
}

pub fn cast_skill(
    entity: Entity,
    player: &mut Player,
    health: &mut Health,
    definition: &SkillDefinition,
    modifier: SkillModifier,
    engine: &mut SkillEffectEngine,
    now_ms: u64,
) -> CastOutcome {
    if !player.skill_ready(definition.key, definition.cooldown_ms, now_ms) {
        return CastOutcome::NotReady;
    }

    let center = center_of(player.rect);
    let modifier = modifier.with_damage_multiplier(player.damage_multiplier(now_ms));

    let outcome = match &definition.behavior {
        SkillBehavior::Melee => {
            let origin = EffectOrigin::Caster { entity, center };
            match engine.spawn(definition, &modifier, origin, player.facing, now_ms) {
                Some(_) => CastOutcome::Spawned,
                None => CastOutcome::Fizzled,
            }
        }
        SkillBehavior::Projectile { .. } => {
            let ids = engine.cast_projectile(definition, &modifier, Some(entity), center.as_vec2(), player.facing, now_ms);
            if ids.is_empty() {
                CastOutcome::Fizzled
            } else {
                CastOutcome::Spawned
            }
        }
        SkillBehavior::Charge(_) => {
            // Cooldown starts on release
            player.charge_started_ms = Some(now_ms);
            return CastOutcome::ChargeStarted;
        }
        SkillBehavior::Buff {
            kind,
            duration_ms,
            multiplier,
        } => {
            let until_ms = now_ms + duration_ms;
            match kind {
                BuffKind::Barrier => player.barrier_until_ms = Some(until_ms),
                BuffKind::Crescendo => {
                    player.attack_buff = Some(AttackBuff {
                        multiplier: *multiplier,
                        until_ms,
                    })
                }
            }
            engine.spawn_buff(entity, *kind, center.as_vec2(), *duration_ms, now_ms);
            CastOutcome::Buffed(BuffActivated {
                target: entity,
                kind: *kind,
                until_ms,
            })
        }
        SkillBehavior::Heal { amount } => {
            let before = health.current;
            health.heal(*amount);
            engine.spawn_heal(Some(entity), center.as_vec2(), now_ms);
            CastOutcome::Healed(HealApplied {
                target: entity,
                amount: health.current - before,
                health_after: health.current,
            })
        }
    };

    if outcome != CastOutcome::Fizzled {
        player.mark_cast(definition.key, now_ms);
    }
    outcome
}

/// Release a held charge. `None` when nothing was charging.
pub fn release_charge(
    entity: Entity,
    player: &mut Player,
    definition: &SkillDefinition,
    engine: &mut SkillEffectEngine,
    now_ms: u64,
) -> Option<u64> {
    let started = player.charge_started_ms.take()?;
    let held_ms = now_ms.saturating_sub(started);
    let modifier = SkillModifier::IDENTITY.with_damage_multiplier(player.damage_multiplier(now_ms));

    engine.release_charge(
        definition,
        &modifier,
        Some(entity),
        center_of(player.rect).as_vec2(),
        held_ms,
        now_ms,
    )?;
    player.mark_cast(definition.key, now_ms);
    Some(held_ms)
}
