//! Simulation clock in milliseconds.
//!
//! All gameplay waiting is "timestamp + duration" polling against this clock.
//! In the app it follows `Time<Fixed>`; tests advance it by hand.

use bevy::prelude::*;
use std::time::Duration;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CombatClock {
    elapsed: Duration,
    delta: Duration,
}

impl CombatClock {
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
    }

    /// Milliseconds since simulation start
    pub fn now_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Length of the current tick in milliseconds
    pub fn delta_ms(&self) -> f32 {
        self.delta.as_secs_f32() * 1000.0
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// System: follow the fixed timestep (runs in FixedFirst)
pub fn advance_combat_clock(time: Res<Time<Fixed>>, mut clock: ResMut<CombatClock>) {
    clock.advance(time.delta());
}
