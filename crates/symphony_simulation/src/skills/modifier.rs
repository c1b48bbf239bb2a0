//! SkillModifier: spawn-time adjustment layered over an immutable definition

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillModifier {
    pub damage_multiplier: f32,
    /// Applied to the effect frame and hitbox
    pub scale: f32,
    /// Projectiles fired alongside the main one
    pub extra_projectiles: u32,
}

impl Default for SkillModifier {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl SkillModifier {
    pub const IDENTITY: SkillModifier = SkillModifier {
        damage_multiplier: 1.0,
        scale: 1.0,
        extra_projectiles: 0,
    };

    pub fn with_damage_multiplier(mut self, multiplier: f32) -> Self {
        self.damage_multiplier *= multiplier;
        self
    }

    pub fn damage(&self, base: u32) -> u32 {
        (base as f32 * self.damage_multiplier).round() as u32
    }

    pub fn hitbox(&self, size: IVec2) -> IVec2 {
        (size.as_vec2() * self.scale).round().as_ivec2()
    }

    pub fn extent(&self, extent: i32) -> i32 {
        (extent as f32 * self.scale).round() as i32
    }

    /// Offset that keeps a grown frame centered where the base frame was
    pub fn offset(&self, offset: IVec2, extent: i32) -> IVec2 {
        let grown = self.extent(extent);
        offset - IVec2::splat((grown - extent) / 2)
    }
}
