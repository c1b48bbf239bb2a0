//! Enemy systems.
//!
//! - enemy_think (Input): animation tick, strikes, death completion, next move
//! - apply_enemy_movement (Integrate): collision-gated movement
//! - apply_enemy_strikes (Input, after think): strikes land on the player

use bevy::prelude::*;

use super::components::Enemy;
use crate::clock::CombatClock;
use crate::components::Health;
use crate::config::CombatConfig;
use crate::effects::{DamageAbsorbed, DamageDealt, EntityDied};
use crate::physics::{center_of, CollisionIndex};
use crate::player::{Player, PlayerHit};

/// Attack animation reached its damage frame with the target in reach
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyStrike {
    pub enemy: Entity,
    pub damage: u32,
}

/// Death animation finished; experience is ready to drop
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyDefeated {
    pub enemy: Entity,
    pub exp: u32,
    pub center: Vec2,
}

/// System: per-enemy animation + AI decision
pub fn enemy_think(
    clock: Res<CombatClock>,
    config: Res<CombatConfig>,
    players: Query<&Player>,
    mut enemies: Query<(Entity, &mut Enemy)>,
    mut strikes: EventWriter<EnemyStrike>,
    mut defeated: EventWriter<EnemyDefeated>,
) {
    let target = players
        .iter()
        .find(|player| !player.dead)
        .map(|player| center_of(player.rect).as_vec2());
    let now = clock.now_ms();

    for (entity, mut enemy) in enemies.iter_mut() {
        if enemy.death_finished() {
            continue;
        }

        let tick = enemy.tick_animation(clock.delta_ms(), target, &config.enemy);

        if let Some(damage) = tick.strike {
            strikes.write(EnemyStrike { enemy: entity, damage });
        }

        if tick.death_completed {
            crate::log(&format!("💀 {:?} ({}) finished dying, dropping {} exp", entity, enemy.profile_key, enemy.exp));
            defeated.write(EnemyDefeated {
                enemy: entity,
                exp: enemy.exp,
                center: enemy.center(),
            });
            continue;
        }

        enemy.decide(target, now, &config.enemy);
    }
}

/// System: deliver enemy strikes to the player (barrier absorbs)
pub fn apply_enemy_strikes(
    clock: Res<CombatClock>,
    mut strikes: EventReader<EnemyStrike>,
    mut players: Query<(Entity, &mut Player, &mut Health)>,
    mut damage_events: EventWriter<DamageDealt>,
    mut absorbed_events: EventWriter<DamageAbsorbed>,
    mut death_events: EventWriter<EntityDied>,
) {
    let now = clock.now_ms();

    for strike in strikes.read() {
        let Ok((player_entity, mut player, mut health)) = players.single_mut() else {
            return;
        };

        match player.receive_hit(&mut health, strike.damage, now) {
            PlayerHit::Ignored => {}
            PlayerHit::Absorbed => {
                absorbed_events.write(DamageAbsorbed {
                    source: strike.enemy,
                    target: player_entity,
                    amount: strike.damage,
                });
            }
            PlayerHit::Damaged | PlayerHit::Killed => {
                let lethal = player.dead;
                crate::log(&format!(
                    "🩸 {:?} hit player for {} ({} hp left)",
                    strike.enemy, strike.damage, health.current
                ));
                damage_events.write(DamageDealt {
                    source: Some(strike.enemy),
                    target: player_entity,
                    amount: strike.damage,
                    lethal,
                    anchor: center_of(player.rect).as_vec2() - Vec2::new(0.0, 30.0),
                });
                if lethal {
                    crate::log_info("Player defeated");
                    death_events.write(EntityDied {
                        entity: player_entity,
                        killer: Some(strike.enemy),
                    });
                }
            }
        }
    }
}

/// System: move enemies against last frame's collision snapshot
pub fn apply_enemy_movement(index: Res<CollisionIndex>, mut enemies: Query<(Entity, &mut Enemy)>) {
    for (entity, mut enemy) in enemies.iter_mut() {
        if enemy.pending_move != Vec2::ZERO {
            enemy.apply_movement(entity, &index);
        }
    }
}
