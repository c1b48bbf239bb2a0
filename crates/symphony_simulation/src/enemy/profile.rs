//! Enemy content: visual/stat profiles and level spawn records.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::ContentError;

/// Frames per animation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FrameCounts {
    pub walk: u32,
    pub hurt: u32,
    pub death: u32,
    pub attack: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnemyProfile {
    pub hp: u32,
    pub atk: u32,
    /// Pixels per frame
    pub speed: f32,
    pub scale: f32,
    pub hitbox_offset: [i32; 2],
    pub hitbox_size: [i32; 2],
    pub frames: FrameCounts,
    pub exp: u32,
    pub attack_cooldown_ms: u64,
    pub attack_range: f32,
}

/// Profile table keyed by sprite name
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct EnemyProfiles {
    profiles: BTreeMap<String, EnemyProfile>,
}

impl Default for EnemyProfiles {
    fn default() -> Self {
        let slime1 = EnemyProfile {
            hp: 3,
            atk: 1,
            speed: 1.5,
            scale: 3.0,
            hitbox_offset: [73, 80],
            hitbox_size: [65, 50],
            frames: FrameCounts {
                walk: 8,
                hurt: 5,
                death: 10,
                attack: 10,
            },
            exp: 10,
            attack_cooldown_ms: 1000,
            attack_range: 300.0,
        };
        let slime2 = EnemyProfile {
            hp: 2,
            atk: 2,
            speed: 2.0,
            frames: FrameCounts {
                attack: 11,
                ..slime1.frames
            },
            exp: 15,
            attack_range: 120.0,
            ..slime1.clone()
        };

        Self {
            profiles: BTreeMap::from([("slime1".to_string(), slime1), ("slime2".to_string(), slime2)]),
        }
    }
}

impl EnemyProfiles {
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        toml::from_str(source).map_err(|e| ContentError::parse("enemy profiles", e))
    }

    pub fn get(&self, key: &str) -> Option<&EnemyProfile> {
        self.profiles.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, profile: EnemyProfile) {
        self.profiles.insert(key.into(), profile);
    }
}

/// Behaviour family of a spawned enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EnemyArchetype {
    Melee,
    Ranged,
}

impl EnemyArchetype {
    pub fn parse(key: &str) -> Result<Self, SpawnError> {
        match key {
            "melee" => Ok(EnemyArchetype::Melee),
            "range" | "ranged" => Ok(EnemyArchetype::Ranged),
            other => Err(SpawnError::UnknownArchetype(other.to_string())),
        }
    }
}

/// One enemy placement from level data
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnRecord {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub archetype: String,
    #[serde(rename = "sprite")]
    pub profile: String,
}

impl SpawnRecord {
    pub fn new(x: f32, y: f32, archetype: &str, profile: &str) -> Self {
        Self {
            x,
            y,
            archetype: archetype.to_string(),
            profile: profile.to_string(),
        }
    }
}

/// Why a single spawn record was skipped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("unknown enemy profile '{0}'")]
    UnknownProfile(String),
    #[error("unknown enemy archetype '{0}'")]
    UnknownArchetype(String),
    #[error("spawn position ({x}, {y}) is not finite")]
    InvalidPosition { x: f32, y: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_profiles() {
        let profiles = EnemyProfiles::default();
        let slime1 = profiles.get("slime1").unwrap();
        let slime2 = profiles.get("slime2").unwrap();

        assert_eq!(slime1.hp, 3);
        assert_eq!(slime1.attack_range, 300.0);
        assert_eq!(slime1.frames.attack, 10);
        assert_eq!(slime2.hp, 2);
        assert_eq!(slime2.atk, 2);
        assert_eq!(slime2.frames.attack, 11);
        assert_eq!(slime2.frames.death, 10);
        assert!(profiles.get("dragon").is_none());
    }

    #[test]
    fn test_profiles_from_toml() {
        let profiles = EnemyProfiles::from_toml_str(
            r#"
            [bat]
            hp = 1
            atk = 1
            speed = 3.0
            scale = 2.0
            hitbox_offset = [40, 40]
            hitbox_size = [48, 32]
            exp = 5
            attack_cooldown_ms = 700
            attack_range = 80.0
            frames = { walk = 4, hurt = 2, death = 6, attack = 5 }
            "#,
        )
        .unwrap();

        let bat = profiles.get("bat").unwrap();
        assert_eq!(bat.hitbox_size, [48, 32]);
        assert_eq!(bat.frames.death, 6);
    }

    #[test]
    fn test_profile_missing_field_is_error() {
        let err = EnemyProfiles::from_toml_str("[bat]\nhp = 1").unwrap_err();
        assert!(err.to_string().contains("enemy profiles"));
    }

    #[test]
    fn test_archetype_parse() {
        assert_eq!(EnemyArchetype::parse("melee"), Ok(EnemyArchetype::Melee));
        assert_eq!(EnemyArchetype::parse("range"), Ok(EnemyArchetype::Ranged));
        assert_eq!(
            EnemyArchetype::parse("boss"),
            Err(SpawnError::UnknownArchetype("boss".to_string()))
        );
    }

    #[test]
    fn test_spawn_record_field_names() {
        #[derive(Deserialize)]
        struct Level {
            enemies: Vec<SpawnRecord>,
        }
        let level: Level = toml::from_str(
            r#"
            [[enemies]]
            x = 600.0
            y = 700.0
            type = "melee"
            sprite = "slime1"
            "#,
        )
        .unwrap();
        assert_eq!(level.enemies[0], SpawnRecord::new(600.0, 700.0, "melee", "slime1"));
    }
}
