//! Note combo layer.
//!
//! Architecture:
//! - `note`: NoteType identities + immutable lookup table (weight, symbol, colour, key)
//! - `tracker`: ComboTracker component (accumulate → trigger / overflow / cooldown)
//! - `patterns`: exact note sequences that unlock amplified skills, buffs, heals

pub mod note;
pub mod patterns;
pub mod tracker;

pub use note::{note_color, note_for_key, note_spec, note_symbol, note_weight, NoteSpec, NoteType, NOTE_TABLE};
pub use patterns::{match_pattern, ComboPattern};
pub use tracker::{ComboOutcome, ComboTracker};

#[cfg(test)]
mod tracker_tests;
