//! Tests for ComboTracker.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::note::{note_weight, NoteType};
use super::tracker::{ComboOutcome, ComboTracker};
use crate::config::ComboConfig;

use NoteType::{Eighth, Half, Quarter, Whole};

fn retained_weight(tracker: &ComboTracker) -> f32 {
    tracker.sequence().iter().map(|n| note_weight(*n)).sum()
}

/// Ticks the tracker until the cooldown runs out (frame timers only)
fn drain_cooldown(tracker: &mut ComboTracker, now_ms: u64) {
    while tracker.on_cooldown() {
        tracker.update(now_ms);
    }
}

#[test]
fn test_quarter_quarter_half_triggers() {
    let mut tracker = ComboTracker::default();

    assert_eq!(tracker.add_note(Quarter, 0), ComboOutcome::Continue);
    assert_eq!(tracker.add_note(Quarter, 100), ComboOutcome::Continue);
    assert_eq!(tracker.add_note(Half, 200), ComboOutcome::Trigger);

    assert_eq!(tracker.total_weight(), 4.0);
    assert!(tracker.is_success());
    assert_eq!(tracker.sequence(), &[Quarter, Quarter, Half]);
}

#[test]
fn test_single_whole_triggers_immediately() {
    let mut tracker = ComboTracker::default();
    assert_eq!(tracker.add_note(Whole, 0), ComboOutcome::Trigger);
    assert_eq!(tracker.sequence(), &[Whole]);
}

#[test]
fn test_overflow_empties_sequence_immediately() {
    let mut tracker = ComboTracker::default();

    assert_eq!(tracker.add_note(Half, 0), ComboOutcome::Continue);
    assert_eq!(tracker.add_note(Eighth, 10), ComboOutcome::Continue);
    assert_eq!(tracker.add_note(Half, 20), ComboOutcome::Overflow);

    assert!(tracker.sequence().is_empty());
    assert_eq!(tracker.total_weight(), 0.0);
    assert!(tracker.is_alerting());
    assert!(tracker.on_cooldown());
}

#[test]
fn test_half_half_quarter_overflows_after_cooldown() {
    let mut tracker = ComboTracker::default();

    assert_eq!(tracker.add_note(Half, 0), ComboOutcome::Continue);
    assert_eq!(tracker.add_note(Half, 10), ComboOutcome::Trigger);

    // HALF+HALF already fills the measure; the quarter lands once input reopens
    // on top of the still-held success sequence
    drain_cooldown(&mut tracker, 20);
    assert_eq!(tracker.sequence(), &[Half, Half]);
    assert_eq!(tracker.add_note(Quarter, 20), ComboOutcome::Overflow);
    assert!(tracker.sequence().is_empty());
}

#[test]
fn test_success_sequence_held_until_timer_expires() {
    let mut tracker = ComboTracker::default();
    tracker.add_note(Half, 0);
    tracker.add_note(Half, 0);

    for _ in 0..59 {
        tracker.update(0);
        assert_eq!(tracker.sequence(), &[Half, Half]);
    }

    tracker.update(0);
    assert!(tracker.sequence().is_empty());
    assert!(!tracker.is_success());
}

#[test]
fn test_cooldown_rejects_without_mutation() {
    let mut tracker = ComboTracker::default();
    tracker.add_note(Whole, 0);
    assert!(tracker.on_cooldown());

    let before = tracker.snapshot();
    for note in NoteType::ALL {
        assert_eq!(tracker.add_note(note, 5), ComboOutcome::Cooldown);
    }
    assert_eq!(tracker.snapshot(), before);
    assert_eq!(tracker.total_weight(), 4.0);
}

#[test]
fn test_cooldown_lasts_thirty_frames() {
    let mut tracker = ComboTracker::default();
    tracker.add_note(Whole, 0);

    for _ in 0..29 {
        tracker.update(0);
    }
    assert_eq!(tracker.add_note(Eighth, 0), ComboOutcome::Cooldown);

    tracker.update(0);
    assert!(!tracker.on_cooldown());
}

#[test]
fn test_idle_timeout_resets() {
    let mut tracker = ComboTracker::default();
    tracker.add_note(Quarter, 1000);

    tracker.update(4000); // exactly 3000 ms: not yet
    assert_eq!(tracker.sequence(), &[Quarter]);

    tracker.update(4001);
    assert!(tracker.sequence().is_empty());
}

#[test]
fn test_new_note_clears_alert() {
    // Alert outlives the cooldown so a note can land while it is still shown
    let mut tracker = ComboTracker::new(ComboConfig {
        alert_frames: 60,
        cooldown_frames: 5,
        ..ComboConfig::default()
    });
    tracker.add_note(Half, 0);
    tracker.add_note(Quarter, 0);
    tracker.add_note(Half, 0); // 5.0 → overflow
    assert!(tracker.is_alerting());

    drain_cooldown(&mut tracker, 0);
    assert!(tracker.is_alerting());
    assert_eq!(tracker.add_note(Eighth, 0), ComboOutcome::Continue);
    assert!(!tracker.is_alerting());
}

#[test]
fn test_reset_keeps_cooldown() {
    let mut tracker = ComboTracker::default();
    tracker.add_note(Whole, 0);
    tracker.reset();

    assert!(tracker.sequence().is_empty());
    assert!(!tracker.is_success());
    assert!(tracker.on_cooldown());
}

#[test]
fn test_symbols_and_colors_follow_sequence() {
    let mut tracker = ComboTracker::default();
    tracker.add_note(Eighth, 0);
    tracker.add_note(Quarter, 0);

    assert_eq!(tracker.symbols(), vec!["\u{1D160}", "\u{1D15F}"]);
    assert_eq!(tracker.colors(), vec![[255, 100, 200], [255, 170, 90]]);
    assert_eq!(tracker.last_note(), Some(Quarter));
}

#[test]
fn test_random_sequences_keep_weight_invariant() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut tracker = ComboTracker::default();
    let mut now = 0u64;

    for _ in 0..5000 {
        now += rng.gen_range(0..400);

        if rng.gen_bool(0.6) {
            let note = NoteType::ALL[rng.gen_range(0..4)];
            let before_weight = tracker.total_weight();
            let before_seq = tracker.snapshot();
            let outcome = tracker.add_note(note, now);

            match outcome {
                ComboOutcome::Cooldown => {
                    assert_eq!(tracker.snapshot(), before_seq);
                    assert_eq!(tracker.total_weight(), before_weight);
                }
                ComboOutcome::Trigger => assert_eq!(tracker.total_weight(), 4.0),
                ComboOutcome::Overflow => assert!(tracker.sequence().is_empty()),
                ComboOutcome::Continue => assert!(tracker.total_weight() < 4.0),
            }
        } else {
            tracker.update(now);
        }

        assert_eq!(tracker.total_weight(), retained_weight(&tracker));
    }
}
