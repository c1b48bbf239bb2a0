//! Player actor state.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::combo::ComboTracker;
use crate::components::{Facing, Health, Stamina};
use crate::config::PlayerConfig;
use crate::physics::rect_at;
use crate::skills::SkillKey;

/// Active outgoing-damage buff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackBuff {
    pub multiplier: f32,
    pub until_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashState {
    pub active: bool,
    pub started_ms: u64,
    pub last_dash_ms: Option<u64>,
}

/// Outcome of an incoming enemy strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerHit {
    /// Already dead
    Ignored,
    /// Barrier swallowed it
    Absorbed,
    Damaged,
    Killed,
}

/// Player actor
///
/// Health, Stamina and ComboTracker live beside it on the same entity.
#[derive(Component, Debug, Clone)]
#[require(Health, Stamina, ComboTracker)]
pub struct Player {
    /// Hitbox (also the movement rect)
    pub rect: IRect,
    pub facing: Facing,
    pub exp: u32,
    pub level: u32,
    pub dead: bool,
    pub attack_buff: Option<AttackBuff>,
    pub barrier_until_ms: Option<u64>,
    pub dash: DashState,
    /// Hold-to-charge start, cleared on release
    pub charge_started_ms: Option<u64>,
    last_cast_ms: HashMap<SkillKey, u64>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(IVec2::ZERO, &PlayerConfig::default())
    }
}

impl Player {
    pub fn new(top_left: IVec2, config: &PlayerConfig) -> Self {
        Self {
            rect: rect_at(top_left.x, top_left.y, config.hitbox_width, config.hitbox_height),
            facing: Facing::Down,
            exp: 0,
            level: 1,
            dead: false,
            attack_buff: None,
            barrier_until_ms: None,
            dash: DashState::default(),
            charge_started_ms: None,
            last_cast_ms: HashMap::new(),
        }
    }

    // ========================================================================
    // Cooldowns
    // ========================================================================

    pub fn skill_ready(&self, key: SkillKey, cooldown_ms: u64, now_ms: u64) -> bool {
        self.cooldown_remaining(key, cooldown_ms, now_ms) == 0
    }

    pub fn cooldown_remaining(&self, key: SkillKey, cooldown_ms: u64, now_ms: u64) -> u64 {
        match self.last_cast_ms.get(&key) {
            None => 0,
            Some(last) => cooldown_ms.saturating_sub(now_ms.saturating_sub(*last)),
        }
    }

    pub fn mark_cast(&mut self, key: SkillKey, now_ms: u64) {
        self.last_cast_ms.insert(key, now_ms);
    }

    // ========================================================================
    // Buffs
    // ========================================================================

    pub fn damage_multiplier(&self, now_ms: u64) -> f32 {
        match self.attack_buff {
            Some(buff) if now_ms < buff.until_ms => buff.multiplier,
            _ => 1.0,
        }
    }

    pub fn barrier_active(&self, now_ms: u64) -> bool {
        self.barrier_until_ms.is_some_and(|until| now_ms < until)
    }

    pub fn receive_hit(&mut self, health: &mut Health, amount: u32, now_ms: u64) -> PlayerHit {
        if self.dead {
            return PlayerHit::Ignored;
        }
        if self.barrier_active(now_ms) {
            return PlayerHit::Absorbed;
        }

        health.take_damage(amount);
        if health.is_alive() {
            PlayerHit::Damaged
        } else {
            self.dead = true;
            self.charge_started_ms = None;
            PlayerHit::Killed
        }
    }

    // ========================================================================
    // Progression
    // ========================================================================

    /// Add experience; returns every level reached on the way
    pub fn gain_exp(&mut self, amount: u32, exp_per_level: u32) -> Vec<u32> {
        self.exp += amount;
        let mut reached = Vec::new();
        if exp_per_level == 0 {
            return reached;
        }
        while self.exp >= self.level * exp_per_level {
            self.level += 1;
            reached.push(self.level);
        }
        reached
    }

    // ========================================================================
    // Dash
    // ========================================================================

    pub fn dash_ready(&self, now_ms: u64, config: &PlayerConfig) -> bool {
        match self.dash.last_dash_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= config.dash_cooldown_ms,
        }
    }

    pub fn start_dash(&mut self, now_ms: u64) {
        self.dash = DashState {
            active: true,
            started_ms: now_ms,
            last_dash_ms: Some(now_ms),
        };
    }

    pub fn update_dash(&mut self, now_ms: u64, config: &PlayerConfig) {
        if self.dash.active && now_ms.saturating_sub(self.dash.started_ms) >= config.dash_duration_ms {
            self.dash.active = false;
        }
    }

    pub fn speed(&self, sprinting: bool, config: &PlayerConfig) -> i32 {
        if self.dash.active {
            config.dash_speed
        } else if sprinting {
            config.sprint_speed
        } else {
            config.walk_speed
        }
    }
}
