//! RenderSnapshot: immutable per-tick view for the presentation layer.
//!
//! Rebuilt at the end of every tick (CombatSet::Present). The host draws
//! from it and never touches simulation state directly.

use bevy::prelude::*;

use crate::clock::CombatClock;
use crate::combo::ComboTracker;
use crate::components::{Facing, Health, Stamina};
use crate::effects::{EffectId, EffectKind, SkillEffectEngine};
use crate::enemy::{Enemy, EnemyAnimation};
use crate::pickups::ExpPickupPool;
use crate::player::Player;
use crate::skills::{BuffKind, SkillCatalog, SkillKey};
use crate::CombatSet;

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyView {
    pub entity: Entity,
    pub profile: String,
    pub rect: IRect,
    pub hitbox: IRect,
    pub animation: EnemyAnimation,
    /// Death frame stays frozen once the enemy is inert
    pub frame: u32,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub dead: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub entity: Entity,
    pub rect: IRect,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub exp: u32,
    pub level: u32,
    pub dead: bool,
    pub dashing: bool,
    /// Held charge duration
    pub charging_ms: Option<u64>,
    pub barrier: bool,
    pub attack_multiplier: f32,
}

/// Drawable shape of one effect
#[derive(Debug, Clone, PartialEq)]
pub enum EffectShape {
    Sprite { rect: IRect, frame: u32 },
    Projectile { position: Vec2, direction: Vec2, amplified: bool },
    Ring { center: Vec2, radius: f32, intensity: f32 },
    Aura { position: Vec2, kind: BuffKind },
    HealBurst { position: Vec2 },
    Impact { position: Vec2 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectView {
    pub id: EffectId,
    pub skill: Option<SkillKey>,
    pub age_ms: u64,
    pub shape: EffectShape,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComboBarView {
    pub symbols: Vec<&'static str>,
    pub colors: Vec<[u8; 3]>,
    pub total_weight: f32,
    pub alert: bool,
    pub success: bool,
    pub cooldown_frames_left: u32,
}

#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct RenderSnapshot {
    pub now_ms: u64,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub effects: Vec<EffectView>,
    pub pickups: Vec<Vec2>,
    pub combo: ComboBarView,
    /// Remaining cooldown per skill, catalog order
    pub cooldowns: Vec<(SkillKey, u64)>,
}

fn effect_shape(kind: &EffectKind) -> EffectShape {
    match kind {
        EffectKind::Melee(melee) => EffectShape::Sprite {
            rect: melee.rect,
            frame: melee.frame,
        },
        EffectKind::Projectile(projectile) => EffectShape::Projectile {
            position: projectile.position,
            direction: projectile.direction,
            amplified: projectile.amplified,
        },
        EffectKind::ChargeRelease(charge) => EffectShape::Ring {
            center: charge.origin,
            radius: charge.visual_radius,
            intensity: charge.intensity,
        },
        EffectKind::Buff(buff) => EffectShape::Aura {
            position: buff.position,
            kind: buff.kind,
        },
        EffectKind::Heal(particle) => EffectShape::HealBurst {
            position: particle.position,
        },
        EffectKind::Impact(particle) => EffectShape::Impact {
            position: particle.position,
        },
    }
}

/// System: rebuild the snapshot from the finished tick
#[allow(clippy::too_many_arguments)]
pub fn build_render_snapshot(
    clock: Res<CombatClock>,
    catalog: Res<SkillCatalog>,
    engine: Res<SkillEffectEngine>,
    pickups: Res<ExpPickupPool>,
    players: Query<(Entity, &Player, &Health, &Stamina, &ComboTracker)>,
    enemies: Query<(Entity, &Enemy)>,
    mut snapshot: ResMut<RenderSnapshot>,
) {
    let now = clock.now_ms();

    let mut enemy_views: Vec<EnemyView> = enemies
        .iter()
        .map(|(entity, enemy)| EnemyView {
            entity,
            profile: enemy.profile_key.clone(),
            rect: enemy.rect,
            hitbox: enemy.hitbox,
            animation: enemy.animation,
            frame: enemy.frame,
            facing: enemy.facing,
            health: enemy.health.current,
            max_health: enemy.health.max,
            dead: enemy.death_finished(),
        })
        .collect();
    enemy_views.sort_by_key(|view| view.entity);

    let mut player_view = None;
    let mut combo = ComboBarView::default();
    let mut cooldowns = Vec::new();

    if let Some((entity, player, health, stamina, tracker)) = players.iter().min_by_key(|(entity, ..)| *entity) {
        player_view = Some(PlayerView {
            entity,
            rect: player.rect,
            facing: player.facing,
            health: health.current,
            max_health: health.max,
            stamina: stamina.current,
            max_stamina: stamina.max,
            exp: player.exp,
            level: player.level,
            dead: player.dead,
            dashing: player.dash.active,
            charging_ms: player.charge_started_ms.map(|started| now.saturating_sub(started)),
            barrier: player.barrier_active(now),
            attack_multiplier: player.damage_multiplier(now),
        });
        combo = ComboBarView {
            symbols: tracker.symbols(),
            colors: tracker.colors(),
            total_weight: tracker.total_weight(),
            alert: tracker.is_alerting(),
            success: tracker.is_success(),
            cooldown_frames_left: tracker.cooldown_frames_left(),
        };
        cooldowns = SkillKey::ALL
            .iter()
            .filter_map(|key| catalog.try_get(*key))
            .map(|def| (def.key, player.cooldown_remaining(def.key, def.cooldown_ms, now)))
            .collect();
    }

    *snapshot = RenderSnapshot {
        now_ms: now,
        player: player_view,
        enemies: enemy_views,
        effects: engine
            .effects()
            .map(|effect| EffectView {
                id: effect.id,
                skill: effect.skill,
                age_ms: now.saturating_sub(effect.spawned_at_ms),
                shape: effect_shape(&effect.kind),
            })
            .collect(),
        pickups: pickups.pickups().iter().map(|pickup| pickup.position).collect(),
        combo,
        cooldowns,
    };
}

pub struct RenderSnapshotPlugin;

impl Plugin for RenderSnapshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            build_render_snapshot
                .in_set(CombatSet::Present)
                .after(crate::encounter::check_encounter_cleared),
        );
    }
}
