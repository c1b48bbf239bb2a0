//! Tests for SkillEffectEngine.

use bevy::prelude::*;

use super::engine::{DamageOutcome, EffectKind, EffectOrigin, HitTarget, SkillEffectEngine};
use crate::components::Facing;
use crate::config::EffectConfig;
use crate::physics::{center_of, rect_at};
use crate::skills::{BuffKind, SkillCatalog, SkillKey, SkillModifier};

/// Minimal damageable dummy
#[derive(Debug, Clone)]
struct Dummy {
    entity: Entity,
    hitbox: IRect,
    hp: i32,
    hits_taken: u32,
    invulnerable: bool,
}

impl Dummy {
    fn new(index: u32, hitbox: IRect, hp: i32) -> Self {
        Self {
            entity: Entity::from_raw(index),
            hitbox,
            hp,
            hits_taken: 0,
            invulnerable: false,
        }
    }
}

impl HitTarget for Dummy {
    fn entity(&self) -> Entity {
        self.entity
    }

    fn hitbox(&self) -> IRect {
        self.hitbox
    }

    fn center(&self) -> Vec2 {
        center_of(self.hitbox).as_vec2()
    }

    fn is_targetable(&self) -> bool {
        self.hp > 0
    }

    fn receive_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.invulnerable {
            return DamageOutcome::Ignored;
        }
        self.hits_taken += 1;
        self.hp -= amount as i32;
        if self.hp <= 0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }
}

fn engine() -> SkillEffectEngine {
    SkillEffectEngine::new(EffectConfig::default())
}

const CASTER: u32 = 900;

fn caster_origin(center: IVec2) -> EffectOrigin {
    EffectOrigin::Caster {
        entity: Entity::from_raw(CASTER),
        center,
    }
}

#[test]
fn test_spawn_without_animation_is_noop() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();

    let id = engine.spawn(
        catalog.get(SkillKey::NoteFlurry),
        &SkillModifier::IDENTITY,
        EffectOrigin::Point(IVec2::ZERO),
        Facing::Right,
        0,
    );

    assert!(id.is_none());
    assert!(engine.is_empty());
}

#[test]
fn test_strike_hitbox_sits_in_front_of_caster() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    let center = IVec2::new(500, 500);

    let id = engine
        .spawn(catalog.get(SkillKey::StrikeBeat), &SkillModifier::IDENTITY, caster_origin(center), Facing::Right, 0)
        .unwrap();
    let hitbox = engine.get(id).unwrap().hitbox().unwrap();

    // Frame top-left (464, 404), 192 wide → center (560, 500); hitbox 60×40 around it
    assert_eq!(hitbox, rect_at(530, 480, 60, 40));
}

#[test]
fn test_melee_never_hits_same_target_twice() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    engine.spawn(
        catalog.get(SkillKey::StrikeBeat),
        &SkillModifier::IDENTITY,
        caster_origin(IVec2::new(500, 500)),
        Facing::Right,
        0,
    );

    let mut targets = vec![Dummy::new(1, rect_at(540, 470, 40, 40), 100)];

    for tick in 0..6u64 {
        let reports = engine.resolve_hits(&mut targets, tick * 16);
        if tick == 0 {
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].damage, 10);
            assert_eq!(reports[0].outcome, DamageOutcome::Hurt);
        } else {
            assert!(reports.is_empty(), "tick {} re-hit the target", tick);
        }
    }
    assert_eq!(targets[0].hits_taken, 1);
}

#[test]
fn test_ignored_hit_still_consumes_the_hit_slot() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    let id = engine
        .spawn(
            catalog.get(SkillKey::StrikeBeat),
            &SkillModifier::IDENTITY,
            caster_origin(IVec2::new(500, 500)),
            Facing::Right,
            0,
        )
        .unwrap();

    let mut targets = vec![Dummy::new(1, rect_at(540, 470, 40, 40), 100)];
    targets[0].invulnerable = true;
    let reports = engine.resolve_hits(&mut targets, 0);
    assert_eq!(reports[0].outcome, DamageOutcome::Ignored);

    targets[0].invulnerable = false;
    assert!(engine.resolve_hits(&mut targets, 16).is_empty());
    assert!(engine.get(id).unwrap().has_hit(targets[0].entity));
}

#[test]
fn test_melee_skips_untargetable_and_distant() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    engine.spawn(
        catalog.get(SkillKey::StrikeBeat),
        &SkillModifier::IDENTITY,
        caster_origin(IVec2::new(500, 500)),
        Facing::Right,
        0,
    );

    let mut targets = vec![
        Dummy::new(1, rect_at(540, 470, 40, 40), 0), // already dead
        Dummy::new(2, rect_at(900, 900, 40, 40), 5), // far away
        Dummy::new(3, rect_at(550, 490, 10, 10), 5),
    ];
    let reports = engine.resolve_hits(&mut targets, 0);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].target, targets[2].entity);
    assert_eq!(reports[0].anchor, Vec2::new(555.0, 465.0));
}

#[test]
fn test_melee_retires_after_frames() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    engine.spawn(
        catalog.get(SkillKey::StrikeBeat),
        &SkillModifier::IDENTITY,
        caster_origin(IVec2::new(500, 500)),
        Facing::Down,
        0,
    );

    let center = |_: Entity| Some(IVec2::new(500, 500));

    // 8 frames at 80 ms: frames 1..7 advance, the 8th advance retires it
    for step in 1..=7u64 {
        engine.update(step * 80, 80.0, center);
        assert_eq!(engine.len(), 1, "retired early at step {}", step);
    }
    engine.update(8 * 80, 80.0, center);
    assert!(engine.is_empty());
}

#[test]
fn test_linger_extends_lifetime() {
    let mut strike = SkillCatalog::default().get(SkillKey::StrikeBeat).clone();
    strike.duration_override_ms = Some(200.0);
    let mut engine = engine();
    engine.spawn(&strike, &SkillModifier::IDENTITY, EffectOrigin::Point(IVec2::ZERO), Facing::Up, 0);

    let center = |_: Entity| None;
    for step in 1..=8u64 {
        engine.update(step * 80, 80.0, center);
    }
    // Linger started at 640 ms
    assert_eq!(engine.len(), 1);
    engine.update(800, 160.0, center);
    assert_eq!(engine.len(), 1);
    engine.update(840, 40.0, center);
    assert!(engine.is_empty());
}

#[test]
fn test_follow_caster_tracks_and_dies_with_owner() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    let id = engine
        .spawn(
            catalog.get(SkillKey::StrikeBeat),
            &SkillModifier::IDENTITY,
            caster_origin(IVec2::new(500, 500)),
            Facing::Right,
            0,
        )
        .unwrap();

    engine.update(16, 16.0, |_| Some(IVec2::new(600, 500)));
    assert_eq!(engine.get(id).unwrap().hitbox().unwrap(), rect_at(630, 480, 60, 40));

    engine.update(32, 16.0, |_| None);
    assert!(engine.is_empty());
}

#[test]
fn test_missing_direction_degrades_to_zero_box() {
    let mut strike = SkillCatalog::default().get(SkillKey::StrikeBeat).clone();
    strike.hitbox_sizes.clear();
    strike.spawn_offsets.clear();
    let mut engine = engine();

    let id = engine
        .spawn(&strike, &SkillModifier::IDENTITY, EffectOrigin::Point(IVec2::new(100, 100)), Facing::Left, 0)
        .unwrap();
    let hitbox = engine.get(id).unwrap().hitbox().unwrap();
    assert_eq!(hitbox.size(), IVec2::ZERO);

    let mut targets = vec![Dummy::new(1, rect_at(150, 150, 100, 100), 5)];
    assert!(engine.resolve_hits(&mut targets, 0).is_empty());
}

#[test]
fn test_projectile_hits_first_target_and_leaves_impact() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    engine.cast_projectile(
        catalog.get(SkillKey::NoteFlurry),
        &SkillModifier::IDENTITY,
        None,
        Vec2::new(0.0, 50.0),
        Facing::Right,
        0,
    );

    let mut targets = vec![
        Dummy::new(1, rect_at(40, 30, 20, 40), 5),
        Dummy::new(2, rect_at(44, 30, 20, 40), 5),
    ];

    // 8 px per 16 ms
    for tick in 1..=4u64 {
        engine.update(tick * 16, 16.0, |_| None);
        assert!(engine.resolve_hits(&mut targets, tick * 16).is_empty());
    }
    engine.update(5 * 16, 16.0, |_| None); // x = 40
    let reports = engine.resolve_hits(&mut targets, 80);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].target, targets[0].entity);
    assert_eq!(reports[0].damage, 7);
    assert_eq!(targets[1].hits_taken, 0);

    // Projectile retired, impact spawned in its place
    engine.update(96, 16.0, |_| None);
    assert_eq!(engine.count_kind(|kind| matches!(kind, EffectKind::Projectile(_))), 0);
    assert_eq!(engine.count_kind(|kind| matches!(kind, EffectKind::Impact(_))), 1);
}

#[test]
fn test_projectile_expires_past_max_range() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    engine.cast_projectile(
        catalog.get(SkillKey::NoteFlurry),
        &SkillModifier::IDENTITY,
        None,
        Vec2::ZERO,
        Facing::Left,
        0,
    );

    // 600 px at 8 px / 16 ms = 75 ticks; the 76th crosses the cap
    for tick in 1..=75u64 {
        engine.update(tick * 16, 16.0, |_| None);
    }
    assert_eq!(engine.len(), 1);
    engine.update(76 * 16, 16.0, |_| None);
    assert!(engine.is_empty());
}

#[test]
fn test_amplified_barrage_fires_parallel_lanes() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    let modifier = SkillModifier {
        damage_multiplier: 1.5,
        scale: 1.0,
        extra_projectiles: 2,
    };

    let ids = engine.cast_projectile(catalog.get(SkillKey::NoteFlurry), &modifier, None, Vec2::ZERO, Facing::Right, 0);
    assert_eq!(ids.len(), 3);

    let mut lanes: Vec<f32> = engine
        .effects()
        .filter_map(|effect| match &effect.kind {
            EffectKind::Projectile(p) => Some(p.start.y),
            _ => None,
        })
        .collect();
    lanes.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(lanes, vec![-20.0, 0.0, 20.0]);
    assert!(engine.effects().all(|effect| effect.damage == 11));
}

#[test]
fn test_charge_release_pulses_once_by_distance() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    let id = engine
        .release_charge(catalog.get(SkillKey::Soundquake), &SkillModifier::IDENTITY, None, Vec2::ZERO, 1500, 0)
        .unwrap();
    // Full charge: radius 200, damage 6
    let mut targets = vec![
        Dummy::new(1, rect_at(-10, 140, 20, 20), 20), // center distance 150
        Dummy::new(2, rect_at(190, -10, 20, 20), 20), // exactly 200: outside
    ];

    let reports = engine.resolve_hits(&mut targets, 0);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].damage, 6);
    assert_eq!(reports[0].target, targets[0].entity);

    // Later frames never pulse again, even for targets walking in
    targets[1].hitbox = rect_at(-10, -10, 20, 20);
    engine.update(100, 100.0, |_| None);
    assert!(engine.resolve_hits(&mut targets, 100).is_empty());
    assert_eq!(engine.get(id).unwrap().hit_count(), 1);
}

#[test]
fn test_charge_release_fades_out() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    let id = engine
        .release_charge(catalog.get(SkillKey::Soundquake), &SkillModifier::IDENTITY, None, Vec2::ZERO, 0, 0)
        .unwrap();

    engine.update(300, 300.0, |_| None);
    match &engine.get(id).unwrap().kind {
        EffectKind::ChargeRelease(ring) => {
            assert!((ring.intensity - 0.5).abs() < 1e-5);
            assert!((ring.visual_radius - 40.0).abs() < 1e-3);
        }
        other => panic!("unexpected kind {:?}", other),
    }

    engine.update(601, 301.0, |_| None);
    assert!(engine.is_empty());
}

#[test]
fn test_release_without_charge_params_is_noop() {
    let catalog = SkillCatalog::default();
    let mut engine = engine();
    let id = engine.release_charge(catalog.get(SkillKey::StrikeBeat), &SkillModifier::IDENTITY, None, Vec2::ZERO, 500, 0);
    assert!(id.is_none());
}

#[test]
fn test_support_effects_never_resolve_hits() {
    let mut engine = engine();
    let owner = Entity::from_raw(CASTER);
    engine.spawn_buff(owner, BuffKind::Crescendo, Vec2::ZERO, 5000, 0);
    engine.spawn_heal(Some(owner), Vec2::ZERO, 0);
    engine.spawn_impact(Vec2::ZERO, 0);

    let mut targets = vec![Dummy::new(1, rect_at(-50, -50, 100, 100), 5)];
    assert!(engine.resolve_hits(&mut targets, 0).is_empty());

    // Impact 300 ms, heal 600 ms, buff 5000 ms
    engine.update(300, 300.0, |_| Some(IVec2::new(10, 10)));
    assert_eq!(engine.len(), 2);
    engine.update(600, 300.0, |_| Some(IVec2::new(10, 10)));
    assert_eq!(engine.len(), 1);
    engine.update(5000, 4400.0, |_| Some(IVec2::new(10, 10)));
    assert!(engine.is_empty());
}
