//! SkillCatalog: read-only lookup SkillKey → SkillDefinition

use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::combo::NoteType;
use crate::components::Facing;

/// Side of one square animation frame before scaling (pixels)
pub const EFFECT_FRAME_SIZE: i32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum SkillKey {
    StrikeBeat,
    NoteFlurry,
    Soundquake,
    ResonanceBarrier,
    HarmonicHeal,
    Crescendo,
}

impl SkillKey {
    pub const ALL: [SkillKey; 6] = [
        SkillKey::StrikeBeat,
        SkillKey::NoteFlurry,
        SkillKey::Soundquake,
        SkillKey::ResonanceBarrier,
        SkillKey::HarmonicHeal,
        SkillKey::Crescendo,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SkillKey::StrikeBeat => "strike_beat",
            SkillKey::NoteFlurry => "note_flurry",
            SkillKey::Soundquake => "soundquake",
            SkillKey::ResonanceBarrier => "resonance_barrier",
            SkillKey::HarmonicHeal => "harmonic_heal",
            SkillKey::Crescendo => "crescendo",
        }
    }
}

/// Sprite sheet the presentation layer plays for a melee effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationBinding {
    pub sheet: String,
}

/// Hold-to-charge parameters: values scale linearly with the charge ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeParams {
    pub max_charge_ms: u64,
    pub base_radius: f32,
    pub bonus_radius: f32,
    pub base_damage: u32,
    pub bonus_damage: u32,
}

impl ChargeParams {
    /// 0.0..=1.0
    pub fn ratio(&self, held_ms: u64) -> f32 {
        if self.max_charge_ms == 0 {
            return 1.0;
        }
        (held_ms as f32 / self.max_charge_ms as f32).clamp(0.0, 1.0)
    }

    pub fn radius(&self, ratio: f32) -> f32 {
        self.base_radius + self.bonus_radius * ratio
    }

    pub fn damage(&self, ratio: f32) -> u32 {
        self.base_damage + (self.bonus_damage as f32 * ratio).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BuffKind {
    /// Outgoing damage multiplier
    Crescendo,
    /// Incoming damage immunity
    Barrier,
}

/// What casting the skill does
#[derive(Debug, Clone, PartialEq)]
pub enum SkillBehavior {
    /// Animated hitbox in front of the caster
    Melee,
    Projectile { speed: f32, max_range: f32 },
    Charge(ChargeParams),
    Buff { kind: BuffKind, duration_ms: u64, multiplier: f32 },
    Heal { amount: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillDefinition {
    pub key: SkillKey,
    pub name: &'static str,
    /// `None` = data-only skill, cast through its bespoke engine call
    pub animation: Option<AnimationBinding>,
    pub frames: u32,
    pub animation_speed_ms: f32,
    pub cooldown_ms: u64,
    pub hitbox_sizes: BTreeMap<Facing, IVec2>,
    /// Effect top-left relative to the caster center
    pub spawn_offsets: BTreeMap<Facing, IVec2>,
    pub damage: u32,
    pub follows_caster: bool,
    /// Linger after the last frame instead of retiring at once
    pub duration_override_ms: Option<f32>,
    pub scale: f32,
    pub trigger_note: Option<NoteType>,
    pub behavior: SkillBehavior,
}

impl SkillDefinition {
    /// Hitbox for a direction; missing entries degrade to an empty box
    pub fn hitbox_size(&self, direction: Facing) -> IVec2 {
        self.hitbox_sizes.get(&direction).copied().unwrap_or(IVec2::ZERO)
    }

    /// Spawn offset for a direction; missing entries degrade to (0, 0)
    pub fn spawn_offset(&self, direction: Facing) -> IVec2 {
        self.spawn_offsets.get(&direction).copied().unwrap_or(IVec2::ZERO)
    }

    /// Side of the scaled effect frame
    pub fn frame_extent(&self) -> i32 {
        (EFFECT_FRAME_SIZE as f32 * self.scale) as i32
    }

    pub fn charge(&self) -> Option<&ChargeParams> {
        match &self.behavior {
            SkillBehavior::Charge(params) => Some(params),
            _ => None,
        }
    }
}

/// Catalog resource
#[derive(Resource, Debug, Clone)]
pub struct SkillCatalog {
    skills: HashMap<SkillKey, SkillDefinition>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::from_definitions(default_definitions())
    }
}

impl SkillCatalog {
    pub fn from_definitions(definitions: impl IntoIterator<Item = SkillDefinition>) -> Self {
        Self {
            skills: definitions.into_iter().map(|def| (def.key, def)).collect(),
        }
    }

    /// Lookup; an absent key is a programming error
    pub fn get(&self, key: SkillKey) -> &SkillDefinition {
        match self.skills.get(&key) {
            Some(def) => def,
            None => panic!("skill {:?} is not registered in the catalog", key),
        }
    }

    pub fn try_get(&self, key: SkillKey) -> Option<&SkillDefinition> {
        self.skills.get(&key)
    }

    /// Skill a single note press casts
    pub fn for_note(&self, note: NoteType) -> Option<&SkillDefinition> {
        SkillKey::ALL
            .iter()
            .filter_map(|key| self.skills.get(key))
            .find(|def| def.trigger_note == Some(note))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

fn per_direction(up: (i32, i32), down: (i32, i32), left: (i32, i32), right: (i32, i32)) -> BTreeMap<Facing, IVec2> {
    BTreeMap::from([
        (Facing::Up, IVec2::new(up.0, up.1)),
        (Facing::Down, IVec2::new(down.0, down.1)),
        (Facing::Left, IVec2::new(left.0, left.1)),
        (Facing::Right, IVec2::new(right.0, right.1)),
    ])
}

fn uniform(size: (i32, i32)) -> BTreeMap<Facing, IVec2> {
    per_direction(size, size, size, size)
}

fn data_only(key: SkillKey, name: &'static str, cooldown_ms: u64, trigger_note: Option<NoteType>, behavior: SkillBehavior) -> SkillDefinition {
    SkillDefinition {
        key,
        name,
        animation: None,
        frames: 0,
        animation_speed_ms: 80.0,
        cooldown_ms,
        hitbox_sizes: BTreeMap::new(),
        spawn_offsets: BTreeMap::new(),
        damage: 0,
        follows_caster: false,
        duration_override_ms: None,
        scale: 3.0,
        trigger_note,
        behavior,
    }
}

/// Shipped skill set
pub fn default_definitions() -> Vec<SkillDefinition> {
    // 192×192 frame centered one step in front of the caster
    let strike_offsets = per_direction((-96, -156), (-96, -36), (-156, -96), (-36, -96));

    vec![
        SkillDefinition {
            key: SkillKey::StrikeBeat,
            name: "Strike Beat",
            animation: Some(AnimationBinding {
                sheet: "strike_beat".to_string(),
            }),
            frames: 8,
            animation_speed_ms: 80.0,
            cooldown_ms: 300,
            hitbox_sizes: per_direction((40, 60), (40, 60), (60, 40), (60, 40)),
            spawn_offsets: strike_offsets,
            damage: 10,
            follows_caster: true,
            duration_override_ms: None,
            scale: 3.0,
            trigger_note: Some(NoteType::Quarter),
            behavior: SkillBehavior::Melee,
        },
        SkillDefinition {
            hitbox_sizes: uniform((50, 30)),
            frames: 8,
            damage: 7,
            ..data_only(
                SkillKey::NoteFlurry,
                "Note Flurry",
                150,
                Some(NoteType::Eighth),
                SkillBehavior::Projectile {
                    speed: 8.0,
                    max_range: 600.0,
                },
            )
        },
        data_only(
            SkillKey::Soundquake,
            "Soundquake",
            2000,
            Some(NoteType::Whole),
            SkillBehavior::Charge(ChargeParams {
                max_charge_ms: 1500,
                base_radius: 80.0,
                bonus_radius: 120.0,
                base_damage: 2,
                bonus_damage: 4,
            }),
        ),
        data_only(
            SkillKey::ResonanceBarrier,
            "Resonance Barrier",
            3000,
            Some(NoteType::Half),
            SkillBehavior::Buff {
                kind: BuffKind::Barrier,
                duration_ms: 1500,
                multiplier: 1.0,
            },
        ),
        data_only(SkillKey::HarmonicHeal, "Harmonic Heal", 5000, None, SkillBehavior::Heal { amount: 3 }),
        data_only(
            SkillKey::Crescendo,
            "Crescendo",
            8000,
            None,
            SkillBehavior::Buff {
                kind: BuffKind::Crescendo,
                duration_ms: 5000,
                multiplier: 1.5,
            },
        ),
    ]
}
