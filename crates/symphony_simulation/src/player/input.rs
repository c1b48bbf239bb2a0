//! Input snapshot + edge detection.
//!
//! The host writes which logical keys are held into `InputSnapshot` before
//! each tick; `KeyEdges` turns consecutive snapshots into press/release edges.

use bevy::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    Sprint,
    Dash,
    NoteWhole,
    NoteHalf,
    NoteQuarter,
    NoteEighth,
}

/// Keys held this tick
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    held: BTreeSet<LogicalKey>,
}

impl InputSnapshot {
    pub fn press(&mut self, key: LogicalKey) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: LogicalKey) {
        self.held.remove(&key);
    }

    pub fn set_held(&mut self, keys: impl IntoIterator<Item = LogicalKey>) {
        self.held = keys.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: LogicalKey) -> bool {
        self.held.contains(&key)
    }

    pub fn any_direction(&self) -> bool {
        [LogicalKey::Up, LogicalKey::Down, LogicalKey::Left, LogicalKey::Right]
            .iter()
            .any(|key| self.is_held(*key))
    }
}

/// New-press / release detection against the previous tick
#[derive(Resource, Debug, Clone, Default)]
pub struct KeyEdges {
    previous: BTreeSet<LogicalKey>,
    pressed: BTreeSet<LogicalKey>,
    released: BTreeSet<LogicalKey>,
}

impl KeyEdges {
    pub fn update(&mut self, snapshot: &InputSnapshot) {
        self.pressed = snapshot.held.difference(&self.previous).copied().collect();
        self.released = self.previous.difference(&snapshot.held).copied().collect();
        self.previous = snapshot.held.clone();
    }

    pub fn just_pressed(&self, key: LogicalKey) -> bool {
        self.pressed.contains(&key)
    }

    pub fn just_released(&self, key: LogicalKey) -> bool {
        self.released.contains(&key)
    }

    /// Forget history (retry, scene change)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// System: derive this tick's edges
pub fn track_key_edges(input: Res<InputSnapshot>, mut edges: ResMut<KeyEdges>) {
    edges.update(&input);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_reported_once() {
        let mut snapshot = InputSnapshot::default();
        let mut edges = KeyEdges::default();

        snapshot.press(LogicalKey::NoteQuarter);
        edges.update(&snapshot);
        assert!(edges.just_pressed(LogicalKey::NoteQuarter));

        // Still held: no new press
        edges.update(&snapshot);
        assert!(!edges.just_pressed(LogicalKey::NoteQuarter));
        assert!(!edges.just_released(LogicalKey::NoteQuarter));

        snapshot.release(LogicalKey::NoteQuarter);
        edges.update(&snapshot);
        assert!(edges.just_released(LogicalKey::NoteQuarter));
        assert!(!edges.just_pressed(LogicalKey::NoteQuarter));

        snapshot.press(LogicalKey::NoteQuarter);
        edges.update(&snapshot);
        assert!(edges.just_pressed(LogicalKey::NoteQuarter));
    }

    #[test]
    fn test_any_direction() {
        let mut snapshot = InputSnapshot::default();
        assert!(!snapshot.any_direction());
        snapshot.set_held([LogicalKey::Sprint, LogicalKey::Left]);
        assert!(snapshot.any_direction());
    }
}
