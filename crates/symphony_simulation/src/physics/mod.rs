//! Collision substrate: axis-aligned rectangles only.
//!
//! Architecture:
//! - `rect`: pure rectangle helpers (strict overlap, half-open point test)
//! - `collision`: CollisionIndex resource (static obstacles + per-frame dynamic set)

pub mod collision;
pub mod rect;

pub use collision::{rebuild_dynamic_collision, CollisionIndex};
pub use rect::{center_of, centered_rect, contains_point, overlaps, rect_at, translated};
