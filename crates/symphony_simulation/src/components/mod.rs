//! Shared components: health, stamina, facing.

pub mod actor;
pub mod movement;

pub use actor::{Health, Stamina};
pub use movement::Facing;
