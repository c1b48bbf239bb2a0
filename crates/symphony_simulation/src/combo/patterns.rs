//! Higher-order combos: exact note sequences checked against the tracker.
//!
//! Every pattern fills one measure (weight 4.0), so a matching sequence is
//! always sitting in the tracker's success window when the check runs.

use super::note::NoteType;
use crate::skills::{SkillKey, SkillModifier};

use NoteType::{Eighth, Half, Quarter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboPattern {
    /// 4× quarter → oversized strike beat
    AmplifiedStrike,
    /// 8× eighth → triple-shot note flurry
    AmplifiedBarrage,
    /// half, quarter, eighth, eighth → attack buff
    Crescendo,
    /// 2× half → heal
    Heal,
}

const PATTERNS: [(ComboPattern, &[NoteType]); 4] = [
    (ComboPattern::AmplifiedStrike, &[Quarter, Quarter, Quarter, Quarter]),
    (ComboPattern::AmplifiedBarrage, &[Eighth, Eighth, Eighth, Eighth, Eighth, Eighth, Eighth, Eighth]),
    (ComboPattern::Crescendo, &[Half, Quarter, Eighth, Eighth]),
    (ComboPattern::Heal, &[Half, Half]),
];

/// Pattern whose notes equal `sequence` exactly
pub fn match_pattern(sequence: &[NoteType]) -> Option<ComboPattern> {
    PATTERNS
        .iter()
        .find(|(_, notes)| *notes == sequence)
        .map(|(pattern, _)| *pattern)
}

impl ComboPattern {
    pub fn notes(self) -> &'static [NoteType] {
        PATTERNS
            .iter()
            .find(|(pattern, _)| *pattern == self)
            .map(|(_, notes)| *notes)
            .unwrap_or(&[])
    }

    /// Skill whose cooldown gates this pattern
    pub fn base_skill(self) -> SkillKey {
        match self {
            ComboPattern::AmplifiedStrike => SkillKey::StrikeBeat,
            ComboPattern::AmplifiedBarrage => SkillKey::NoteFlurry,
            ComboPattern::Crescendo => SkillKey::Crescendo,
            ComboPattern::Heal => SkillKey::HarmonicHeal,
        }
    }

    /// Spawn-time modifier for amplified variants (identity for the rest)
    pub fn modifier(self) -> SkillModifier {
        match self {
            ComboPattern::AmplifiedStrike => SkillModifier {
                damage_multiplier: 2.0,
                scale: 1.5,
                extra_projectiles: 0,
            },
            ComboPattern::AmplifiedBarrage => SkillModifier {
                damage_multiplier: 1.5,
                scale: 1.0,
                extra_projectiles: 2,
            },
            ComboPattern::Crescendo | ComboPattern::Heal => SkillModifier::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::note::note_weight;
    use NoteType::Whole;

    #[test]
    fn test_exact_match_only() {
        assert_eq!(match_pattern(&[Half, Half]), Some(ComboPattern::Heal));
        assert_eq!(match_pattern(&[Half, Quarter, Eighth, Eighth]), Some(ComboPattern::Crescendo));
        assert_eq!(match_pattern(&[Quarter, Quarter, Quarter, Quarter]), Some(ComboPattern::AmplifiedStrike));
        assert_eq!(match_pattern(&[Eighth; 8]), Some(ComboPattern::AmplifiedBarrage));

        // Prefixes and reorders do not match
        assert_eq!(match_pattern(&[Half]), None);
        assert_eq!(match_pattern(&[Quarter, Half, Eighth, Eighth]), None);
        assert_eq!(match_pattern(&[Whole]), None);
        assert_eq!(match_pattern(&[]), None);
    }

    #[test]
    fn test_every_pattern_fills_one_measure() {
        for (pattern, notes) in PATTERNS {
            let weight: f32 = notes.iter().map(|n| note_weight(*n)).sum();
            assert_eq!(weight, 4.0, "{:?}", pattern);
            assert_eq!(pattern.notes(), notes);
        }
    }
}
