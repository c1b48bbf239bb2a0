//! ComboTracker: accumulates notes until their weights fill one measure.
//!
//! States:
//! - accumulating: weight < max, notes appended
//! - success: weight == max exactly; sequence kept until the success timer runs out
//! - overflow: weight > max; sequence emptied at once, alert timer shown
//! - cooldown: any trigger/overflow blocks input for a few frames
//!
//! Timers count frames (one `update` call = one frame). The idle timeout is in ms.

use bevy::prelude::*;

use super::note::{note_color, note_symbol, note_weight, NoteType};
use crate::config::ComboConfig;

/// Result of `add_note`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboOutcome {
    Continue,
    Trigger,
    Overflow,
    Cooldown,
}

#[derive(Component, Debug, Clone)]
pub struct ComboTracker {
    sequence: Vec<NoteType>,
    total_weight: f32,
    last_input_ms: u64,

    alert: bool,
    success: bool,
    success_timer: u32,
    alert_timer: u32,
    cooldown_timer: u32,

    config: ComboConfig,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self::new(ComboConfig::default())
    }
}

impl ComboTracker {
    pub fn new(config: ComboConfig) -> Self {
        Self {
            sequence: Vec::new(),
            total_weight: 0.0,
            last_input_ms: 0,
            alert: false,
            success: false,
            success_timer: 0,
            alert_timer: 0,
            cooldown_timer: 0,
            config,
        }
    }

    pub fn add_note(&mut self, note: NoteType, now_ms: u64) -> ComboOutcome {
        if self.cooldown_timer > 0 {
            return ComboOutcome::Cooldown;
        }

        self.sequence.push(note);
        self.total_weight += note_weight(note);
        self.last_input_ms = now_ms;
        self.alert = false;
        self.success = false;
        self.check_weight_invariant();

        // Exact comparison: every shipped weight is a power of two, so any
        // filling combination sums to exactly max_weight.
        // FIXME: breaks as soon as a non-dyadic weight (e.g. a triplet) exists.
        if self.total_weight == self.config.max_weight {
            self.success = true;
            self.success_timer = self.config.success_frames;
            self.cooldown_timer = self.config.cooldown_frames;
            return ComboOutcome::Trigger;
        }

        if self.total_weight > self.config.max_weight {
            self.reset();
            self.alert = true;
            self.alert_timer = self.config.alert_frames;
            self.cooldown_timer = self.config.cooldown_frames;
            return ComboOutcome::Overflow;
        }

        ComboOutcome::Continue
    }

    /// Per-frame tick: idle timeout, then success / alert / cooldown timers
    pub fn update(&mut self, now_ms: u64) {
        if !self.sequence.is_empty() && now_ms.saturating_sub(self.last_input_ms) > self.config.timeout_ms {
            self.reset();
        }

        if self.success_timer > 0 {
            self.success_timer -= 1;
            if self.success_timer == 0 {
                self.reset();
            }
        }

        if self.alert_timer > 0 {
            self.alert_timer -= 1;
            if self.alert_timer == 0 {
                self.alert = false;
            }
        }

        if self.cooldown_timer > 0 {
            self.cooldown_timer -= 1;
        }
    }

    /// Clears sequence, weight and flags. Cooldown keeps running.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.total_weight = 0.0;
        self.alert = false;
        self.success = false;
        self.success_timer = 0;
        self.check_weight_invariant();
    }

    pub fn sequence(&self) -> &[NoteType] {
        &self.sequence
    }

    /// Owned copy, safe to inspect after the tracker resets
    pub fn snapshot(&self) -> Vec<NoteType> {
        self.sequence.clone()
    }

    pub fn total_weight(&self) -> f32 {
        self.total_weight
    }

    pub fn last_note(&self) -> Option<NoteType> {
        self.sequence.last().copied()
    }

    pub fn symbols(&self) -> Vec<&'static str> {
        self.sequence.iter().map(|note| note_symbol(*note)).collect()
    }

    pub fn colors(&self) -> Vec<[u8; 3]> {
        self.sequence.iter().map(|note| note_color(*note)).collect()
    }

    pub fn is_alerting(&self) -> bool {
        self.alert
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn on_cooldown(&self) -> bool {
        self.cooldown_timer > 0
    }

    pub fn cooldown_frames_left(&self) -> u32 {
        self.cooldown_timer
    }

    pub fn success_frames_left(&self) -> u32 {
        self.success_timer
    }

    fn check_weight_invariant(&self) {
        let retained: f32 = self.sequence.iter().map(|note| note_weight(*note)).sum();
        assert!(
            retained == self.total_weight,
            "combo weight diverged: stored {} vs retained {} ({:?})",
            self.total_weight,
            retained,
            self.sequence
        );
    }
}
