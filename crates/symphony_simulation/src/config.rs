//! Tuning values for the combat layer.
//!
//! Everything has a built-in default matching the shipped game; a TOML
//! document may override any subset (`#[serde(default)]` on every table).

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Failure while reading a content/config document
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        source: toml::de::Error,
    },
}

impl ContentError {
    pub fn parse(what: &'static str, source: toml::de::Error) -> Self {
        Self::Parse { what, source }
    }
}

/// Root config resource
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct CombatConfig {
    pub combo: ComboConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub effects: EffectConfig,
    pub pickups: PickupConfig,
}

impl CombatConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        toml::from_str(source).map_err(|e| ContentError::parse("combat config", e))
    }
}

/// Combo tracker timings. Timers count simulation frames, timeout is wall ms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComboConfig {
    pub max_weight: f32,
    pub timeout_ms: u64,
    pub success_frames: u32,
    pub alert_frames: u32,
    pub cooldown_frames: u32,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            max_weight: 4.0,
            timeout_ms: 3000,
            success_frames: 60,
            alert_frames: 30,
            cooldown_frames: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: u32,
    pub hitbox_width: i32,
    pub hitbox_height: i32,
    /// Pixels per frame
    pub walk_speed: i32,
    pub sprint_speed: i32,
    pub dash_speed: i32,
    pub dash_duration_ms: u64,
    pub dash_cooldown_ms: u64,
    pub dash_stamina_cost: f32,
    pub stamina_max: f32,
    /// Units per second
    pub stamina_regen_rate: f32,
    pub stamina_regen_delay_ms: u64,
    pub exp_per_level: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 10,
            hitbox_width: 50,
            hitbox_height: 95,
            walk_speed: 4,
            sprint_speed: 7,
            dash_speed: 10,
            dash_duration_ms: 200,
            dash_cooldown_ms: 2000,
            dash_stamina_cost: 10.0,
            stamina_max: 50.0,
            stamina_regen_rate: 5.0,
            stamina_regen_delay_ms: 1000,
            exp_per_level: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub animation_delay_ms: f32,
    /// Chase while further than `range * chase_factor`
    pub chase_factor: f32,
    /// Back off while closer than `range * retreat_factor`
    pub retreat_factor: f32,
    /// Added to the retreat threshold of melee archetypes
    pub melee_buffer: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            animation_delay_ms: 120.0,
            chase_factor: 1.15,
            retreat_factor: 0.75,
            melee_buffer: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub impact_duration_ms: f32,
    pub heal_duration_ms: f32,
    pub soundquake_duration_ms: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            impact_duration_ms: 300.0,
            heal_duration_ms: 600.0,
            soundquake_duration_ms: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    pub min_pieces: u32,
    pub max_pieces: u32,
    pub scatter: f32,
    /// Pixels per frame while homing
    pub speed: f32,
    pub radius: f32,
    pub collect_margin: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            min_pieces: 4,
            max_pieces: 6,
            scatter: 10.0,
            speed: 3.0,
            radius: 6.0,
            collect_margin: 20.0,
        }
    }
}
