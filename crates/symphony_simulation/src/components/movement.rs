//! Facing direction shared by actors and skill tables.

use bevy::prelude::*;
use serde::Deserialize;

/// Cardinal facing
///
/// Skill tables are keyed by this type, so a table can never carry a
/// direction other than the four cardinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Reflect, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Screen-space unit vector (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.0),
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Dominant axis of a delta; horizontal wins ties. `None` for a zero delta.
    pub fn from_delta(delta: Vec2) -> Option<Facing> {
        if delta == Vec2::ZERO {
            return None;
        }
        if delta.x.abs() >= delta.y.abs() {
            Some(if delta.x < 0.0 { Facing::Left } else { Facing::Right })
        } else {
            Some(if delta.y < 0.0 { Facing::Up } else { Facing::Down })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delta() {
        assert_eq!(Facing::from_delta(Vec2::new(-3.0, 1.0)), Some(Facing::Left));
        assert_eq!(Facing::from_delta(Vec2::new(0.5, 2.0)), Some(Facing::Down));
        assert_eq!(Facing::from_delta(Vec2::new(0.0, -1.0)), Some(Facing::Up));
        assert_eq!(Facing::from_delta(Vec2::new(2.0, 2.0)), Some(Facing::Right));
        assert_eq!(Facing::from_delta(Vec2::ZERO), None);
    }

    #[test]
    fn test_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            facing: Facing,
        }
        let parsed: Wrapper = toml::from_str("facing = \"left\"").unwrap();
        assert_eq!(parsed.facing, Facing::Left);
        assert!(toml::from_str::<Wrapper>("facing = \"diagonal\"").is_err());
    }
}
