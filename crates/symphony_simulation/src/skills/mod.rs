//! Skill definitions.
//!
//! Architecture:
//! - `catalog`: immutable SkillDefinition table (SkillCatalog resource)
//! - `modifier`: transient spawn-time adjustments (amplified combos, attack buff)
//!
//! Definitions are never mutated after the catalog is built; every variant
//! (amplified strike, buffed damage) is a SkillModifier applied at spawn.

pub mod catalog;
pub mod modifier;

pub use catalog::{
    AnimationBinding, BuffKind, ChargeParams, SkillBehavior, SkillCatalog, SkillDefinition, SkillKey, EFFECT_FRAME_SIZE,
};
pub use modifier::SkillModifier;
