//! Experience pickups.
//!
//! A defeated enemy scatters its experience into a handful of pieces that
//! home toward the player and are collected on contact. The pool belongs to
//! the encounter and is rebuilt with it.

use bevy::prelude::*;
use rand::Rng;

use crate::clock::CombatClock;
use crate::config::{CombatConfig, PickupConfig};
use crate::effects::{ExpCollected, LevelUp, SkillEffectEngine};
use crate::enemy::EnemyDefeated;
use crate::physics::center_of;
use crate::player::Player;
use crate::{CombatSet, DeterministicRng};

#[derive(Debug, Clone, PartialEq)]
pub struct ExpPickup {
    pub position: Vec2,
    pub amount: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ExpPickupPool {
    pickups: Vec<ExpPickup>,
}

impl ExpPickupPool {
    /// Split `exp` over 4–6 pieces around `center`. The pieces always sum to `exp`.
    pub fn scatter(&mut self, center: Vec2, exp: u32, rng: &mut impl Rng, config: &PickupConfig) -> usize {
        if exp == 0 {
            return 0;
        }

        let max_pieces = config.max_pieces.max(config.min_pieces).max(1);
        let pieces = rng.gen_range(config.min_pieces.max(1)..=max_pieces).min(exp);
        let share = exp / pieces;
        let remainder = exp % pieces;

        for i in 0..pieces {
            let jitter = if config.scatter > 0.0 {
                Vec2::new(
                    rng.gen_range(-config.scatter..=config.scatter),
                    rng.gen_range(-config.scatter..=config.scatter),
                )
            } else {
                Vec2::ZERO
            };
            self.pickups.push(ExpPickup {
                position: center + jitter,
                amount: share + u32::from(i < remainder),
            });
        }
        pieces as usize
    }

    /// Home toward `target` and collect what touches it. Returns the collected amount.
    pub fn update(&mut self, target: Option<Vec2>, config: &PickupConfig) -> u32 {
        let Some(target) = target else {
            return 0;
        };

        let reach = config.radius + config.collect_margin;
        let mut collected = 0;
        self.pickups.retain_mut(|pickup| {
            let to_target = target - pickup.position;
            let distance = to_target.length();
            if distance > 0.0 {
                pickup.position += to_target / distance * config.speed.min(distance);
            }

            if pickup.position.distance(target) < reach {
                collected += pickup.amount;
                false
            } else {
                true
            }
        });
        collected
    }

    pub fn pickups(&self) -> &[ExpPickup] {
        &self.pickups
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    /// Experience still lying on the ground
    pub fn pending_exp(&self) -> u32 {
        self.pickups.iter().map(|pickup| pickup.amount).sum()
    }

    pub fn clear(&mut self) {
        self.pickups.clear();
    }
}

// ============================================================================
// Systems
// ============================================================================

/// System: scatter experience where enemies finished dying
pub fn spawn_exp_pickups(
    config: Res<CombatConfig>,
    mut defeated: EventReader<EnemyDefeated>,
    mut rng: ResMut<DeterministicRng>,
    mut pool: ResMut<ExpPickupPool>,
) {
    for event in defeated.read() {
        let pieces = pool.scatter(event.center, event.exp, &mut rng.rng, &config.pickups);
        crate::log(&format!("✨ {} exp scattered into {} pickups", event.exp, pieces));
    }
}

/// System: home pickups toward the player, grant experience, level up
pub fn collect_exp_pickups(
    clock: Res<CombatClock>,
    config: Res<CombatConfig>,
    mut pool: ResMut<ExpPickupPool>,
    mut engine: ResMut<SkillEffectEngine>,
    mut players: Query<(Entity, &mut Player)>,
    mut collected_events: EventWriter<ExpCollected>,
    mut level_events: EventWriter<LevelUp>,
) {
    if pool.is_empty() {
        return;
    }
    let Some((entity, mut player)) = players.iter_mut().find(|(_, player)| !player.dead) else {
        return;
    };

    let center = center_of(player.rect).as_vec2();
    let amount = pool.update(Some(center), &config.pickups);
    if amount == 0 {
        return;
    }

    let levels = player.gain_exp(amount, config.player.exp_per_level);
    collected_events.write(ExpCollected {
        amount,
        total: player.exp,
    });

    for level in levels {
        crate::log_info(&format!("⭐ Level up! Now level {}", level));
        engine.spawn_heal(Some(entity), center, clock.now_ms());
        level_events.write(LevelUp { level });
    }
}

/// Pickups Plugin
///
/// Runs after hit resolution in the Effects set:
/// spawn_exp_pickups → collect_exp_pickups
pub struct PickupsPlugin;

impl Plugin for PickupsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (spawn_exp_pickups, collect_exp_pickups)
                .chain()
                .in_set(CombatSet::Effects)
                .after(crate::effects::resolve_skill_hits),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scatter_conserves_experience() {
        let config = PickupConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for exp in [1, 5, 17, 30, 101] {
            let mut pool = ExpPickupPool::default();
            let pieces = pool.scatter(Vec2::new(100.0, 100.0), exp, &mut rng, &config);

            assert_eq!(pool.pending_exp(), exp);
            assert_eq!(pool.len(), pieces);
            assert!(pieces <= 6);
            if exp >= 4 {
                assert!(pieces >= 4);
            }
            for pickup in pool.pickups() {
                assert!((pickup.position.x - 100.0).abs() <= 10.0);
                assert!((pickup.position.y - 100.0).abs() <= 10.0);
            }
        }
    }

    #[test]
    fn test_zero_exp_drops_nothing() {
        let mut pool = ExpPickupPool::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(pool.scatter(Vec2::ZERO, 0, &mut rng, &PickupConfig::default()), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pickups_home_and_collect() {
        let config = PickupConfig::default();
        let mut pool = ExpPickupPool::default();
        pool.pickups.push(ExpPickup {
            position: Vec2::new(100.0, 0.0),
            amount: 5,
        });

        // 3 px per frame
        assert_eq!(pool.update(Some(Vec2::ZERO), &config), 0);
        assert_eq!(pool.pickups()[0].position, Vec2::new(97.0, 0.0));

        // 97 → collected once closer than 26
        let mut total = 0;
        let mut frames = 0;
        while !pool.is_empty() {
            total += pool.update(Some(Vec2::ZERO), &config);
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(total, 5);
    }

    #[test]
    fn test_no_target_freezes_pickups() {
        let mut pool = ExpPickupPool::default();
        pool.pickups.push(ExpPickup {
            position: Vec2::new(3.0, 0.0),
            amount: 2,
        });
        assert_eq!(pool.update(None, &PickupConfig::default()), 0);
        assert_eq!(pool.len(), 1);
    }
}
