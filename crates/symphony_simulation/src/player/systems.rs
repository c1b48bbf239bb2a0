//! Player systems: input → skills, movement, combo patterns, resources.

use bevy::prelude::*;

use super::casting::{cast_skill, release_charge, CastOutcome};
use super::components::Player;
use super::input::{InputSnapshot, KeyEdges, LogicalKey};
use crate::clock::CombatClock;
use crate::combo::{match_pattern, note_spec, note_color, note_symbol, ComboOutcome, ComboTracker, NoteType};
use crate::components::{Facing, Health, Stamina};
use crate::config::CombatConfig;
use crate::effects::{BuffActivated, ComboFeedback, ComboFeedbackKind, HealApplied, SkillEffectEngine};
use crate::physics::{translated, CollisionIndex};
use crate::skills::{SkillCatalog, SkillKey, SkillModifier};

fn report_cast(outcome: CastOutcome, buffs: &mut EventWriter<BuffActivated>, heals: &mut EventWriter<HealApplied>) {
    match outcome {
        CastOutcome::Buffed(event) => {
            buffs.write(event);
        }
        CastOutcome::Healed(event) => {
            heals.write(event);
        }
        _ => {}
    }
}

fn feedback_for(kind: ComboFeedbackKind, notes: &[NoteType]) -> ComboFeedback {
    ComboFeedback {
        kind,
        symbols: notes.iter().map(|note| note_symbol(*note)).collect(),
        colors: notes.iter().map(|note| note_color(*note)).collect(),
    }
}

/// System: dash, note presses and charge release
///
/// A note press feeds the combo tracker, then casts its own skill unless
/// that note just completed a pattern (the pattern fires instead).
#[allow(clippy::too_many_arguments)]
pub fn player_input(
    clock: Res<CombatClock>,
    config: Res<CombatConfig>,
    catalog: Res<SkillCatalog>,
    input: Res<InputSnapshot>,
    edges: Res<KeyEdges>,
    mut engine: ResMut<SkillEffectEngine>,
    mut players: Query<(Entity, &mut Player, &mut Health, &mut Stamina, &mut ComboTracker)>,
    mut feedback: EventWriter<ComboFeedback>,
    mut buffs: EventWriter<BuffActivated>,
    mut heals: EventWriter<HealApplied>,
) {
    let now = clock.now_ms();

    for (entity, mut player, mut health, mut stamina, mut tracker) in &mut players {
        if player.dead {
            continue;
        }

        // Dash
        if edges.just_pressed(LogicalKey::Dash)
            && input.any_direction()
            && !player.dash.active
            && player.dash_ready(now, &config.player)
            && stamina.consume(config.player.dash_stamina_cost, now)
        {
            player.start_dash(now);
            crate::log(&format!("💨 Dash ({:.0} stamina left)", stamina.current));
        }

        // Notes
        for note in NoteType::ALL {
            if !edges.just_pressed(note_spec(note).binding) {
                continue;
            }

            let mut played = tracker.snapshot();
            played.push(note);
            let outcome = tracker.add_note(note, now);

            match outcome {
                ComboOutcome::Trigger => {
                    feedback.write(feedback_for(ComboFeedbackKind::Trigger, tracker.sequence()));
                }
                ComboOutcome::Overflow => {
                    crate::log(&format!("🎼 Combo overflow ({} notes)", played.len()));
                    feedback.write(feedback_for(ComboFeedbackKind::Overflow, &played));
                }
                ComboOutcome::Continue | ComboOutcome::Cooldown => {}
            }

            if outcome == ComboOutcome::Trigger && match_pattern(tracker.sequence()).is_some() {
                continue;
            }

            let Some(definition) = catalog.for_note(note) else {
                continue;
            };
            let cast = cast_skill(
                entity,
                &mut player,
                &mut health,
                definition,
                SkillModifier::IDENTITY,
                &mut engine,
                now,
            );
            report_cast(cast, &mut buffs, &mut heals);
        }

        // Charge release on key-up
        if edges.just_released(LogicalKey::NoteWhole) {
            let definition = catalog.get(SkillKey::Soundquake);
            if let Some(held_ms) = release_charge(entity, &mut player, definition, &mut engine, now) {
                crate::log(&format!("🌊 {} released after {}ms", definition.name, held_ms));
            }
        }
    }
}

/// System: walk / sprint / dash, each axis gated separately
pub fn move_player(
    config: Res<CombatConfig>,
    input: Res<InputSnapshot>,
    collision: Res<CollisionIndex>,
    mut players: Query<&mut Player>,
) {
    for mut player in &mut players {
        if player.dead {
            continue;
        }

        let speed = player.speed(input.is_held(LogicalKey::Sprint), &config.player);
        let dx = if input.is_held(LogicalKey::Left) {
            -speed
        } else if input.is_held(LogicalKey::Right) {
            speed
        } else {
            0
        };
        let dy = if input.is_held(LogicalKey::Up) {
            -speed
        } else if input.is_held(LogicalKey::Down) {
            speed
        } else {
            0
        };

        if let Some(facing) = Facing::from_delta(Vec2::new(dx as f32, dy as f32)) {
            player.facing = facing;
        }

        if dx != 0 && !collision.blocked(player.rect, dx, 0) {
            player.rect = translated(player.rect, dx, 0);
        }
        if dy != 0 && !collision.blocked(player.rect, 0, dy) {
            player.rect = translated(player.rect, 0, dy);
        }
    }
}

/// System: fire any pattern the current sequence spells out
///
/// Runs before the tracker update so a success-timer reset this frame
/// cannot hide the sequence. Waits (sequence kept) while the pattern's
/// base skill is cooling down.
#[allow(clippy::too_many_arguments)]
pub fn check_combo_patterns(
    clock: Res<CombatClock>,
    catalog: Res<SkillCatalog>,
    mut engine: ResMut<SkillEffectEngine>,
    mut players: Query<(Entity, &mut Player, &mut Health, &mut ComboTracker)>,
    mut feedback: EventWriter<ComboFeedback>,
    mut buffs: EventWriter<BuffActivated>,
    mut heals: EventWriter<HealApplied>,
) {
    let now = clock.now_ms();

    for (entity, mut player, mut health, mut tracker) in &mut players {
        if player.dead {
            continue;
        }
        let snapshot = tracker.snapshot();
        let Some(pattern) = match_pattern(&snapshot) else {
            continue;
        };

        let definition = catalog.get(pattern.base_skill());
        let cast = cast_skill(
            entity,
            &mut player,
            &mut health,
            definition,
            pattern.modifier(),
            &mut engine,
            now,
        );
        if cast == CastOutcome::NotReady {
            continue;
        }

        crate::log(&format!("🎶 Pattern {:?} → {}", pattern, definition.name));
        tracker.reset();
        feedback.write(feedback_for(ComboFeedbackKind::Pattern(pattern), &snapshot));
        report_cast(cast, &mut buffs, &mut heals);
    }
}

/// System: combo timeouts and frame timers
pub fn update_combo_trackers(clock: Res<CombatClock>, mut trackers: Query<&mut ComboTracker>) {
    let now = clock.now_ms();
    for mut tracker in &mut trackers {
        tracker.update(now);
    }
}

/// System: end dashes, regenerate stamina
pub fn update_player_resources(
    clock: Res<CombatClock>,
    config: Res<CombatConfig>,
    mut players: Query<(&mut Player, &mut Stamina)>,
) {
    let now = clock.now_ms();
    for (mut player, mut stamina) in &mut players {
        player.update_dash(now, &config.player);
        if !player.dead {
            stamina.regenerate(clock.delta_secs(), now);
        }
    }
}
