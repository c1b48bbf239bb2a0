//! Enemy actor: stats, animation-driven state, movement.
//!
//! State machine (the animation row IS the state):
//! - Walk ⇄ Attack: attack starts inside the range window once the cooldown
//!   has elapsed, ends when its animation completes
//! - Hurt: non-lethal damage from any alive state, back to Walk when done
//! - Death: lethal damage; hitbox zeroed at once, after the animation the
//!   enemy is inert and keeps its last frame
//!
//! Hurt and Death swallow further damage (dropped, not queued).

use bevy::prelude::*;

use super::profile::{EnemyArchetype, EnemyProfile, FrameCounts};
use crate::components::{Facing, Health};
use crate::config::EnemyConfig;
use crate::effects::DamageOutcome;
use crate::physics::{rect_at, CollisionIndex};
use crate::skills::EFFECT_FRAME_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EnemyAnimation {
    Walk,
    Hurt,
    Attack,
    Death,
}

/// Result of one animation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationTick {
    /// Damage to deliver to the target this frame
    pub strike: Option<u32>,
    /// Death animation just completed (reported exactly once)
    pub death_completed: bool,
}

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub profile_key: String,
    pub archetype: EnemyArchetype,

    /// Sub-pixel top-left of the render rect
    pub position: Vec2,
    pub rect: IRect,
    pub hitbox_offset: IVec2,
    pub hitbox_size: IVec2,
    pub hitbox: IRect,

    pub health: Health,
    pub attack: u32,
    pub speed: f32,
    pub attack_range: f32,
    pub attack_cooldown_ms: u64,
    pub exp: u32,
    pub frames: FrameCounts,

    pub animation: EnemyAnimation,
    pub facing: Facing,
    pub frame: u32,
    frame_timer_ms: f32,

    pub playing_hurt: bool,
    pub playing_death: bool,
    pub playing_attack: bool,
    pub has_damaged: bool,
    pub last_attack_ms: Option<u64>,

    /// False once the death animation has finished
    pub alive: bool,
    pub exp_dropped: bool,

    /// Movement decided this frame, applied in the integrate phase
    pub pending_move: Vec2,
}

impl Enemy {
    pub fn new(profile_key: &str, archetype: EnemyArchetype, profile: &EnemyProfile, x: f32, y: f32) -> Self {
        let extent = (EFFECT_FRAME_SIZE as f32 * profile.scale) as i32;
        let rect = rect_at(x as i32, y as i32, extent, extent);
        let hitbox_offset = IVec2::from_array(profile.hitbox_offset);
        let hitbox_size = IVec2::from_array(profile.hitbox_size);

        Self {
            profile_key: profile_key.to_string(),
            archetype,
            position: rect.min.as_vec2(),
            rect,
            hitbox_offset,
            hitbox_size,
            hitbox: IRect::from_corners(rect.min + hitbox_offset, rect.min + hitbox_offset + hitbox_size),
            health: Health::new(profile.hp),
            attack: profile.atk,
            speed: profile.speed,
            attack_range: profile.attack_range,
            attack_cooldown_ms: profile.attack_cooldown_ms,
            exp: profile.exp,
            frames: profile.frames,
            animation: EnemyAnimation::Walk,
            facing: Facing::Down,
            frame: 0,
            frame_timer_ms: 0.0,
            playing_hurt: false,
            playing_death: false,
            playing_attack: false,
            has_damaged: false,
            last_attack_ms: None,
            alive: true,
            exp_dropped: false,
            pending_move: Vec2::ZERO,
        }
    }

    /// Death animation finished: inert, frozen on its last frame
    pub fn death_finished(&self) -> bool {
        !self.alive
    }

    /// Lethal damage taken (dying or already inert)
    pub fn is_dying_or_dead(&self) -> bool {
        self.playing_death || !self.alive
    }

    /// Still blocks movement and can be hit
    pub fn occupies_space(&self) -> bool {
        self.alive && !self.playing_death
    }

    pub fn center(&self) -> Vec2 {
        self.rect.min.as_vec2() + self.rect.size().as_vec2() / 2.0
    }

    fn frame_count(&self, animation: EnemyAnimation) -> u32 {
        match animation {
            EnemyAnimation::Walk => self.frames.walk,
            EnemyAnimation::Hurt => self.frames.hurt,
            EnemyAnimation::Attack => self.frames.attack,
            EnemyAnimation::Death => self.frames.death,
        }
    }

    fn play(&mut self, animation: EnemyAnimation) {
        self.animation = animation;
        self.frame = 0;
        self.frame_timer_ms = 0.0;
    }

    fn retreat_threshold(&self, config: &EnemyConfig) -> f32 {
        let buffer = match self.archetype {
            EnemyArchetype::Melee => config.melee_buffer,
            EnemyArchetype::Ranged => 0.0,
        };
        self.attack_range * config.retreat_factor + buffer
    }

    // ========================================================================
    // Damage
    // ========================================================================

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.playing_hurt || self.playing_death || !self.alive {
            return DamageOutcome::Ignored;
        }

        self.health.take_damage(amount);

        // Any intake interrupts an attack in progress
        self.playing_attack = false;
        self.has_damaged = false;
        self.pending_move = Vec2::ZERO;

        if !self.health.is_alive() {
            self.hitbox = IRect::default();
            self.playing_death = true;
            self.play(EnemyAnimation::Death);
            DamageOutcome::Killed
        } else {
            self.playing_hurt = true;
            self.play(EnemyAnimation::Hurt);
            DamageOutcome::Hurt
        }
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Advance the current animation by `delta_ms`.
    ///
    /// Attack damage is delivered on the final attack frame, at most once
    /// per attack, and only if the target is still within chase distance.
    pub fn tick_animation(&mut self, delta_ms: f32, target_center: Option<Vec2>, config: &EnemyConfig) -> AnimationTick {
        let mut tick = AnimationTick::default();
        if !self.alive {
            return tick;
        }

        self.frame_timer_ms += delta_ms;
        if self.frame_timer_ms < config.animation_delay_ms {
            return tick;
        }
        self.frame_timer_ms = 0.0;
        self.frame += 1;

        let count = self.frame_count(self.animation);
        if self.frame >= count {
            self.frame = 0;
            match self.animation {
                EnemyAnimation::Hurt => {
                    self.playing_hurt = false;
                    self.play(EnemyAnimation::Walk);
                }
                EnemyAnimation::Death => {
                    // Freeze on the last frame
                    self.frame = count.saturating_sub(1);
                    self.alive = false;
                    if !self.exp_dropped {
                        self.exp_dropped = true;
                        tick.death_completed = true;
                    }
                    return tick;
                }
                EnemyAnimation::Attack => {
                    self.playing_attack = false;
                    self.has_damaged = false;
                    self.play(EnemyAnimation::Walk);
                }
                EnemyAnimation::Walk => {}
            }
        }

        let attack_frames = self.frame_count(EnemyAnimation::Attack);
        if self.animation == EnemyAnimation::Attack && self.frame + 1 == attack_frames && !self.has_damaged {
            if let Some(target) = target_center {
                if self.center().distance(target) <= self.attack_range * config.chase_factor {
                    tick.strike = Some(self.attack);
                }
            }
            self.has_damaged = true;
        }

        tick
    }

    // ========================================================================
    // Decision + movement
    // ========================================================================

    /// Pick this frame's movement (stored in `pending_move`) or start an attack.
    ///
    /// - further than `range * chase_factor`: step toward the target
    /// - closer than the retreat threshold: step away
    /// - otherwise: attack once the cooldown has elapsed
    pub fn decide(&mut self, target_center: Option<Vec2>, now_ms: u64, config: &EnemyConfig) {
        self.pending_move = Vec2::ZERO;

        if !self.alive || self.playing_death || self.playing_hurt {
            return;
        }
        let Some(target) = target_center else {
            return;
        };

        let delta = target - self.center();
        let distance = delta.length();
        if let Some(facing) = Facing::from_delta(delta) {
            self.facing = facing;
        }

        if self.playing_attack {
            return;
        }

        if distance > self.attack_range * config.chase_factor {
            self.pending_move = delta / distance * self.speed;
        } else if distance < self.retreat_threshold(config) {
            // Standing on the target: back off along the facing axis
            let away = if distance > f32::EPSILON { -delta / distance } else { -self.facing.unit() };
            self.pending_move = away * self.speed;
        } else if self.attack_ready(now_ms) {
            self.playing_attack = true;
            self.has_damaged = false;
            self.last_attack_ms = Some(now_ms);
            self.play(EnemyAnimation::Attack);
        }
    }

    pub fn attack_ready(&self, now_ms: u64) -> bool {
        match self.last_attack_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.attack_cooldown_ms,
        }
    }

    /// Apply `pending_move` axis by axis, each gated by the collision index
    /// (own dynamic entry excluded).
    pub fn apply_movement(&mut self, entity: Entity, index: &CollisionIndex) {
        let step = std::mem::take(&mut self.pending_move);
        if step == Vec2::ZERO || !self.occupies_space() {
            return;
        }

        let next_x = self.position.x + step.x;
        let dx = next_x as i32 - self.rect.min.x;
        if dx == 0 || !index.blocked_ignoring(self.hitbox, dx, 0, entity) {
            self.position.x = next_x;
            self.sync_rects();
        }

        let next_y = self.position.y + step.y;
        let dy = next_y as i32 - self.rect.min.y;
        if dy == 0 || !index.blocked_ignoring(self.hitbox, 0, dy, entity) {
            self.position.y = next_y;
            self.sync_rects();
        }
    }

    fn sync_rects(&mut self) {
        let min = IVec2::new(self.position.x as i32, self.position.y as i32);
        let size = self.rect.size();
        self.rect = IRect::from_corners(min, min + size);
        if self.occupies_space() {
            let hitbox_min = min + self.hitbox_offset;
            self.hitbox = IRect::from_corners(hitbox_min, hitbox_min + self.hitbox_size);
        }
    }
}
