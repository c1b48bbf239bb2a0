//! SkillEffectEngine: live, time-bounded skill occurrences.
//!
//! Every instance is a tagged `EffectKind`; update and hit resolution are one
//! closed `match` per tag:
//! - Melee: animated frame + hitbox, optionally glued to the caster
//! - Projectile: straight flight, point-in-hitbox test, retires on first hit
//! - ChargeRelease: AOE ring, one damage pulse measured from its origin
//! - Buff / Heal / Impact: presentation-only, never resolve hits
//!
//! Invariant: an instance damages a given target at most once (`hit_set`).

use bevy::prelude::*;
use std::collections::HashSet;

use crate::components::Facing;
use crate::config::EffectConfig;
use crate::physics::{center_of, centered_rect, contains_point, overlaps};
use crate::skills::{BuffKind, SkillBehavior, SkillDefinition, SkillKey, SkillModifier};

/// Stable handle of an effect instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u64);

/// Where a spawned effect is anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectOrigin {
    /// Caster entity and its current center
    Caster { entity: Entity, center: IVec2 },
    /// Frozen world point
    Point(IVec2),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    Follow(Entity),
    Fixed(IVec2),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeleeState {
    pub anchor: Anchor,
    pub offset: IVec2,
    pub hitbox_size: IVec2,
    pub extent: i32,
    pub frame: u32,
    pub frame_count: u32,
    pub frame_ms: f32,
    pub last_frame_ms: u64,
    pub linger_ms: Option<f32>,
    pub linger_started_ms: Option<u64>,
    /// Render frame (top-left = anchor center + offset)
    pub rect: IRect,
    pub hitbox: IRect,
}

impl MeleeState {
    fn place(&mut self, center: IVec2) {
        let min = center + self.offset;
        self.rect = IRect::from_corners(min, min + IVec2::splat(self.extent));
        self.hitbox = centered_rect(center_of(self.rect), self.hitbox_size);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileState {
    pub start: Vec2,
    pub position: Vec2,
    pub direction: Vec2,
    /// Pixels per 16 ms
    pub speed: f32,
    pub max_range: f32,
    pub amplified: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeReleaseState {
    pub origin: Vec2,
    /// Damage radius
    pub radius: f32,
    pub charge_ratio: f32,
    pub duration_ms: f32,
    /// Drawn ring radius, grows toward `radius`
    pub visual_radius: f32,
    /// 1.0 at release, decays to 0.0
    pub intensity: f32,
    pub pulsed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuffState {
    pub kind: BuffKind,
    pub duration_ms: f32,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    pub position: Vec2,
    pub duration_ms: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectKind {
    Melee(MeleeState),
    Projectile(ProjectileState),
    ChargeRelease(ChargeReleaseState),
    Buff(BuffState),
    Heal(ParticleState),
    Impact(ParticleState),
}

#[derive(Debug, Clone)]
pub struct EffectInstance {
    pub id: EffectId,
    pub skill: Option<SkillKey>,
    pub owner: Option<Entity>,
    pub direction: Facing,
    pub spawned_at_ms: u64,
    pub damage: u32,
    pub finished: bool,
    pub kind: EffectKind,
    hit_set: HashSet<Entity>,
}

impl EffectInstance {
    pub fn has_hit(&self, target: Entity) -> bool {
        self.hit_set.contains(&target)
    }

    pub fn hit_count(&self) -> usize {
        self.hit_set.len()
    }

    fn record_hit(&mut self, target: Entity) {
        let inserted = self.hit_set.insert(target);
        assert!(inserted, "effect {:?} hit {:?} twice", self.id, target);
    }

    /// Current damage hitbox (melee only)
    pub fn hitbox(&self) -> Option<IRect> {
        match &self.kind {
            EffectKind::Melee(melee) => Some(melee.hitbox),
            _ => None,
        }
    }
}

/// Outcome of damage applied to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was hurt/dying; nothing applied
    Ignored,
    Hurt,
    Killed,
}

/// Anything an effect can damage
pub trait HitTarget {
    fn entity(&self) -> Entity;
    fn hitbox(&self) -> IRect;
    /// Render center, used for AOE distance and damage-text anchors
    fn center(&self) -> Vec2;
    fn is_targetable(&self) -> bool;
    fn receive_damage(&mut self, amount: u32) -> DamageOutcome;
}

/// One damage application produced by `resolve_hits`
#[derive(Debug, Clone, PartialEq)]
pub struct HitReport {
    pub effect: EffectId,
    pub owner: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
    pub outcome: DamageOutcome,
    /// Where a floating damage number belongs (30 px above the target center)
    pub anchor: Vec2,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SkillEffectEngine {
    effects: Vec<EffectInstance>,
    next_id: u64,
    config: EffectConfig,
}

impl SkillEffectEngine {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            effects: Vec::new(),
            next_id: 0,
            config,
        }
    }

    pub fn effects(&self) -> impl Iterator<Item = &EffectInstance> {
        self.effects.iter()
    }

    pub fn get(&self, id: EffectId) -> Option<&EffectInstance> {
        self.effects.iter().find(|effect| effect.id == id)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Active buff visuals of a kind (finished ones are already retired)
    pub fn count_kind(&self, predicate: impl Fn(&EffectKind) -> bool) -> usize {
        self.effects.iter().filter(|effect| predicate(&effect.kind)).count()
    }

    fn push(
        &mut self,
        skill: Option<SkillKey>,
        owner: Option<Entity>,
        direction: Facing,
        now_ms: u64,
        damage: u32,
        kind: EffectKind,
    ) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.effects.push(EffectInstance {
            id,
            skill,
            owner,
            direction,
            spawned_at_ms: now_ms,
            damage,
            finished: false,
            kind,
            hit_set: HashSet::new(),
        });
        id
    }

    // ========================================================================
    // Spawning
    // ========================================================================

    /// Animated melee effect. `None` when the definition has no animation.
    pub fn spawn(
        &mut self,
        definition: &SkillDefinition,
        modifier: &SkillModifier,
        origin: EffectOrigin,
        direction: Facing,
        now_ms: u64,
    ) -> Option<EffectId> {
        definition.animation.as_ref()?;

        let (anchor, center, owner) = match origin {
            EffectOrigin::Caster { entity, center } if definition.follows_caster => {
                (Anchor::Follow(entity), center, Some(entity))
            }
            EffectOrigin::Caster { entity, center } => (Anchor::Fixed(center), center, Some(entity)),
            EffectOrigin::Point(point) => (Anchor::Fixed(point), point, None),
        };

        let extent = definition.frame_extent();
        let mut melee = MeleeState {
            anchor,
            offset: modifier.offset(definition.spawn_offset(direction), extent),
            hitbox_size: modifier.hitbox(definition.hitbox_size(direction)),
            extent: modifier.extent(extent),
            frame: 0,
            frame_count: definition.frames,
            frame_ms: definition.animation_speed_ms,
            last_frame_ms: now_ms,
            linger_ms: definition.duration_override_ms,
            linger_started_ms: None,
            rect: IRect::default(),
            hitbox: IRect::default(),
        };
        melee.place(center);

        Some(self.push(
            Some(definition.key),
            owner,
            direction,
            now_ms,
            modifier.damage(definition.damage),
            EffectKind::Melee(melee),
        ))
    }

    /// Straight projectile(s) from `from`. Extra projectiles fly in parallel
    /// lanes 20 px apart. Empty when the definition is not a projectile skill.
    pub fn cast_projectile(
        &mut self,
        definition: &SkillDefinition,
        modifier: &SkillModifier,
        owner: Option<Entity>,
        from: Vec2,
        direction: Facing,
        now_ms: u64,
    ) -> Vec<EffectId> {
        let SkillBehavior::Projectile { speed, max_range } = definition.behavior else {
            return Vec::new();
        };

        let heading = direction.unit();
        let lateral = heading.perp();
        let lanes = 1 + modifier.extra_projectiles as i32;
        let damage = modifier.damage(definition.damage);

        (0..lanes)
            .map(|lane| {
                // 0, +1, -1, +2, -2 ...
                let step = (lane + 1) / 2 * if lane % 2 == 1 { 1 } else { -1 };
                let start = from + lateral * (step as f32 * 20.0);
                self.push(
                    Some(definition.key),
                    owner,
                    direction,
                    now_ms,
                    damage,
                    EffectKind::Projectile(ProjectileState {
                        start,
                        position: start,
                        direction: heading,
                        speed,
                        max_range,
                        amplified: modifier.extra_projectiles > 0,
                    }),
                )
            })
            .collect()
    }

    /// AOE release of a held charge. `None` when the skill has no charge.
    pub fn release_charge(
        &mut self,
        definition: &SkillDefinition,
        modifier: &SkillModifier,
        owner: Option<Entity>,
        origin: Vec2,
        held_ms: u64,
        now_ms: u64,
    ) -> Option<EffectId> {
        let charge = definition.charge()?;
        let ratio = charge.ratio(held_ms);

        Some(self.push(
            Some(definition.key),
            owner,
            Facing::default(),
            now_ms,
            modifier.damage(charge.damage(ratio)),
            EffectKind::ChargeRelease(ChargeReleaseState {
                origin,
                radius: charge.radius(ratio) * modifier.scale,
                charge_ratio: ratio,
                duration_ms: self.config.soundquake_duration_ms,
                visual_radius: 0.0,
                intensity: 1.0,
                pulsed: false,
            }),
        ))
    }

    pub fn spawn_buff(&mut self, owner: Entity, kind: BuffKind, at: Vec2, duration_ms: u64, now_ms: u64) -> EffectId {
        self.push(
            None,
            Some(owner),
            Facing::default(),
            now_ms,
            0,
            EffectKind::Buff(BuffState {
                kind,
                duration_ms: duration_ms as f32,
                position: at,
            }),
        )
    }

    pub fn spawn_heal(&mut self, owner: Option<Entity>, at: Vec2, now_ms: u64) -> EffectId {
        let duration_ms = self.config.heal_duration_ms;
        self.push(
            None,
            owner,
            Facing::default(),
            now_ms,
            0,
            EffectKind::Heal(ParticleState { position: at, duration_ms }),
        )
    }

    pub fn spawn_impact(&mut self, at: Vec2, now_ms: u64) -> EffectId {
        let duration_ms = self.config.impact_duration_ms;
        self.push(
            None,
            None,
            Facing::default(),
            now_ms,
            0,
            EffectKind::Impact(ParticleState { position: at, duration_ms }),
        )
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Advance every effect, then retire finished ones.
    ///
    /// `owner_center` resolves a followed caster; a caster that vanished
    /// retires the effects glued to it.
    pub fn update(&mut self, now_ms: u64, delta_ms: f32, owner_center: impl Fn(Entity) -> Option<IVec2>) {
        for effect in &mut self.effects {
            let elapsed = now_ms.saturating_sub(effect.spawned_at_ms) as f32;

            match &mut effect.kind {
                EffectKind::Melee(melee) => {
                    effect.finished = advance_melee(melee, now_ms, &owner_center);
                }
                EffectKind::Projectile(projectile) => {
                    projectile.position += projectile.direction * projectile.speed * delta_ms / 16.0;
                    if projectile.position.distance(projectile.start) > projectile.max_range {
                        effect.finished = true;
                    }
                }
                EffectKind::ChargeRelease(ring) => {
                    let progress = if ring.duration_ms > 0.0 { elapsed / ring.duration_ms } else { 1.0 };
                    ring.intensity = (1.0 - progress).clamp(0.0, 1.0);
                    ring.visual_radius = ring.radius * progress.clamp(0.0, 1.0);
                    if elapsed > ring.duration_ms {
                        effect.finished = true;
                    }
                }
                EffectKind::Buff(buff) => {
                    if let Some(center) = effect.owner.and_then(&owner_center) {
                        buff.position = center.as_vec2();
                    }
                    if elapsed >= buff.duration_ms {
                        effect.finished = true;
                    }
                }
                EffectKind::Heal(particles) | EffectKind::Impact(particles) => {
                    if elapsed >= particles.duration_ms {
                        effect.finished = true;
                    }
                }
            }
        }

        self.effects.retain(|effect| !effect.finished);
    }

    // ========================================================================
    // Hit resolution
    // ========================================================================

    /// Apply damage from every live effect to `targets`.
    ///
    /// Targets already in an effect's hit set are skipped. Projectiles stop at
    /// the first target and leave an impact behind.
    pub fn resolve_hits<T: HitTarget>(&mut self, targets: &mut [T], now_ms: u64) -> Vec<HitReport> {
        let mut reports = Vec::new();
        let mut impacts = Vec::new();

        for effect in &mut self.effects {
            if effect.finished {
                continue;
            }

            match &effect.kind {
                EffectKind::Melee(melee) => {
                    let hitbox = melee.hitbox;
                    for target in targets.iter_mut() {
                        if !target.is_targetable() || effect.has_hit(target.entity()) {
                            continue;
                        }
                        if overlaps(hitbox, target.hitbox()) {
                            reports.push(strike(effect, target));
                        }
                    }
                }
                EffectKind::Projectile(projectile) => {
                    let position = projectile.position;
                    let hit = targets.iter_mut().find(|target| {
                        target.is_targetable()
                            && !effect.has_hit(target.entity())
                            && contains_point(target.hitbox(), position)
                    });
                    if let Some(target) = hit {
                        reports.push(strike(effect, target));
                        effect.finished = true;
                        impacts.push(position);
                    }
                }
                EffectKind::ChargeRelease(ring) => {
                    if ring.pulsed {
                        continue;
                    }
                    let (origin, radius) = (ring.origin, ring.radius);
                    for target in targets.iter_mut() {
                        if !target.is_targetable() || effect.has_hit(target.entity()) {
                            continue;
                        }
                        if target.center().distance(origin) < radius {
                            reports.push(strike(effect, target));
                        }
                    }
                    if let EffectKind::ChargeRelease(ring) = &mut effect.kind {
                        ring.pulsed = true;
                    }
                }
                EffectKind::Buff(_) | EffectKind::Heal(_) | EffectKind::Impact(_) => {}
            }
        }

        for at in impacts {
            self.spawn_impact(at, now_ms);
        }

        reports
    }
}

/// Returns true when the melee effect is done
fn advance_melee(melee: &mut MeleeState, now_ms: u64, owner_center: &impl Fn(Entity) -> Option<IVec2>) -> bool {
    if now_ms.saturating_sub(melee.last_frame_ms) as f32 >= melee.frame_ms {
        if melee.frame + 1 >= melee.frame_count {
            let Some(linger) = melee.linger_ms else {
                return true;
            };
            match melee.linger_started_ms {
                None => melee.linger_started_ms = Some(now_ms),
                Some(started) if now_ms.saturating_sub(started) as f32 >= linger => return true,
                Some(_) => {}
            }
            return false;
        }
        melee.frame += 1;
        melee.last_frame_ms = now_ms;
    }

    if let Anchor::Follow(owner) = melee.anchor {
        match owner_center(owner) {
            Some(center) => melee.place(center),
            None => return true,
        }
    }
    false
}

fn strike<T: HitTarget>(effect: &mut EffectInstance, target: &mut T) -> HitReport {
    let entity = target.entity();
    effect.record_hit(entity);
    let outcome = target.receive_damage(effect.damage);

    HitReport {
        effect: effect.id,
        owner: effect.owner,
        target: entity,
        damage: effect.damage,
        outcome,
        anchor: target.center() - Vec2::new(0.0, 30.0),
    }
}
