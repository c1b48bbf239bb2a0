//! Actor vitals: Health, Stamina

use bevy::prelude::*;

/// Hit points
///
/// Invariant: 0 ≤ current ≤ max (lethal damage clamps at 0)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Stamina pool spent on dashes
///
/// Invariant: 0.0 ≤ current ≤ max
/// Regen starts only after `regen_delay_ms` without spending.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    /// Units per second
    pub regen_rate: f32,
    pub regen_delay_ms: u64,
    pub last_used_ms: u64,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(50.0, 5.0, 1000)
    }
}

impl Stamina {
    pub fn new(max: f32, regen_rate: f32, regen_delay_ms: u64) -> Self {
        Self {
            current: max,
            max,
            regen_rate,
            regen_delay_ms,
            last_used_ms: 0,
        }
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    pub fn consume(&mut self, cost: f32, now_ms: u64) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current -= cost;
        self.last_used_ms = now_ms;
        true
    }

    pub fn regenerate(&mut self, delta_secs: f32, now_ms: u64) {
        if now_ms.saturating_sub(self.last_used_ms) <= self.regen_delay_ms {
            return;
        }
        self.current = (self.current + self.regen_rate * delta_secs).min(self.max);
    }

    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }
}
