//! Presentation events.
//!
//! The simulation never draws; it reports what happened and the host turns
//! these into floating numbers, screen shakes, sounds and UI flashes.

use bevy::prelude::*;

use crate::combo::ComboPattern;
use crate::skills::BuffKind;

/// Damage landed on an enemy or the player
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
    pub lethal: bool,
    /// Floating damage text position
    pub anchor: Vec2,
}

/// Player barrier swallowed an incoming strike
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageAbsorbed {
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
}

/// Actor entered its death state (player or enemy)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct HealApplied {
    pub target: Entity,
    pub amount: u32,
    pub health_after: u32,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct BuffActivated {
    pub target: Entity,
    pub kind: BuffKind,
    pub until_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboFeedbackKind {
    Trigger,
    Overflow,
    Pattern(ComboPattern),
}

/// Combo bar flash: the notes involved, with their colours
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ComboFeedback {
    pub kind: ComboFeedbackKind,
    pub symbols: Vec<&'static str>,
    pub colors: Vec<[u8; 3]>,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ExpCollected {
    pub amount: u32,
    pub total: u32,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct LevelUp {
    pub level: u32,
}

/// All enemies of the encounter finished dying; barriers are down
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EncounterCleared {
    pub level: String,
}
