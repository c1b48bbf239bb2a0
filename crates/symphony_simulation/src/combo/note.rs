//! Note identities and their lookup table.
//!
//! `NoteType` is a bare identity; everything attached to a note lives in
//! `NOTE_TABLE` and is read through the free functions below.

use bevy::prelude::*;
use serde::Deserialize;

use crate::player::input::LogicalKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Whole,
    Half,
    Quarter,
    Eighth,
}

impl NoteType {
    pub const ALL: [NoteType; 4] = [NoteType::Whole, NoteType::Half, NoteType::Quarter, NoteType::Eighth];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSpec {
    pub note: NoteType,
    pub weight: f32,
    pub symbol: &'static str,
    pub color: [u8; 3],
    pub binding: LogicalKey,
}

pub const NOTE_TABLE: [NoteSpec; 4] = [
    NoteSpec {
        note: NoteType::Whole,
        weight: 4.0,
        symbol: "\u{1D15D}",
        color: [255, 245, 170],
        binding: LogicalKey::NoteWhole,
    },
    NoteSpec {
        note: NoteType::Half,
        weight: 2.0,
        symbol: "\u{1D15E}",
        color: [140, 230, 255],
        binding: LogicalKey::NoteHalf,
    },
    NoteSpec {
        note: NoteType::Quarter,
        weight: 1.0,
        symbol: "\u{1D15F}",
        color: [255, 170, 90],
        binding: LogicalKey::NoteQuarter,
    },
    NoteSpec {
        note: NoteType::Eighth,
        weight: 0.5,
        symbol: "\u{1D160}",
        color: [255, 100, 200],
        binding: LogicalKey::NoteEighth,
    },
];

pub fn note_spec(note: NoteType) -> &'static NoteSpec {
    match note {
        NoteType::Whole => &NOTE_TABLE[0],
        NoteType::Half => &NOTE_TABLE[1],
        NoteType::Quarter => &NOTE_TABLE[2],
        NoteType::Eighth => &NOTE_TABLE[3],
    }
}

pub fn note_weight(note: NoteType) -> f32 {
    note_spec(note).weight
}

pub fn note_symbol(note: NoteType) -> &'static str {
    note_spec(note).symbol
}

pub fn note_color(note: NoteType) -> [u8; 3] {
    note_spec(note).color
}

/// Reverse lookup: which note a logical key plays
pub fn note_for_key(key: LogicalKey) -> Option<NoteType> {
    NOTE_TABLE.iter().find(|spec| spec.binding == key).map(|spec| spec.note)
}
