//! LevelDefinition: static obstacles, barrier gate and spawn records.

use bevy::prelude::*;
use serde::Deserialize;

use crate::config::ContentError;
use crate::enemy::SpawnRecord;
use crate::physics::rect_at;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelDefinition {
    pub name: String,
    /// `[x, y, w, h]`
    pub collision_rects: Vec<[i32; 4]>,
    /// Seal the arena while enemies remain
    pub barriers: bool,
    pub barrier_rects: Vec<[i32; 4]>,
    pub enemies: Vec<SpawnRecord>,
    /// Player top-left
    pub starting_pos: [i32; 2],
}

/// Empty arena: anything a level file leaves out stays empty
impl Default for LevelDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            collision_rects: Vec::new(),
            barriers: false,
            barrier_rects: Vec::new(),
            enemies: Vec::new(),
            starting_pos: [0, 0],
        }
    }
}

impl LevelDefinition {
    /// Shipped forest clearing: two slimes behind a barrier gate
    pub fn mysterious_forest() -> Self {
        Self {
            name: "mysterious_forest".to_string(),
            collision_rects: vec![[0, 0, 1920, 540], [0, 1060, 1920, 20]],
            barriers: true,
            barrier_rects: vec![[0, 540, 50, 540], [1870, 540, 50, 540]],
            enemies: vec![
                SpawnRecord::new(600.0, 700.0, "melee", "slime1"),
                SpawnRecord::new(1100.0, 700.0, "range", "slime2"),
            ],
            starting_pos: [500, 700],
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        toml::from_str(source).map_err(|e| ContentError::parse("level definition", e))
    }

    pub fn start(&self) -> IVec2 {
        IVec2::new(self.starting_pos[0], self.starting_pos[1])
    }

    /// Permanent obstacles
    pub fn static_obstacles(&self) -> Vec<IRect> {
        self.collision_rects.iter().map(|r| rect_at(r[0], r[1], r[2], r[3])).collect()
    }

    /// Obstacles while the encounter is live (barriers included when enabled)
    pub fn sealed_obstacles(&self) -> Vec<IRect> {
        let mut obstacles = self.static_obstacles();
        if self.barriers {
            obstacles.extend(self.barrier_rects.iter().map(|r| rect_at(r[0], r[1], r[2], r[3])));
        }
        obstacles
    }
}
