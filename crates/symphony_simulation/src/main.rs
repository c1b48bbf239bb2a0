//! Headless Symphony simulation
//!
//! Plays the forest encounter with a scripted rhythm: walk toward the
//! slimes, strike on the beat, heal when hurt. No rendering.

use symphony_simulation::logger::init_tracing_subscriber;
use symphony_simulation::{
    begin_encounter, create_headless_app, step_ticks, Encounter, Health, InputSnapshot, LevelDefinition, LogicalKey,
    RenderSnapshot,
};

/// Which note the script plays on a given beat
fn beat_note(beat: usize, low_health: bool) -> LogicalKey {
    if low_health {
        return LogicalKey::NoteHalf;
    }
    match beat % 8 {
        7 => LogicalKey::NoteWhole,
        5 | 6 => LogicalKey::NoteEighth,
        _ => LogicalKey::NoteQuarter,
    }
}

fn main() {
    init_tracing_subscriber("info");

    let seed = 42;
    tracing::info!("Starting Symphony headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    let report = begin_encounter(app.world_mut(), LevelDefinition::mysterious_forest());
    if !report.is_clean() {
        tracing::warn!("{} spawn records skipped", report.skipped.len());
    }

    let Some(player) = app.world().resource::<Encounter>().player else {
        tracing::error!("Encounter started without a player");
        return;
    };

    for tick in 0..1000 {
        let low_health = app
            .world()
            .get::<Health>(player)
            .is_some_and(|health| health.ratio() < 0.5);

        {
            let mut input = app.world_mut().resource_mut::<InputSnapshot>();
            input.clear();
            input.press(LogicalKey::Right);
            // One note every 24 ticks (~400ms), held for 6 ticks
            if tick % 24 < 6 {
                input.press(beat_note(tick / 24, low_health));
            }
        }

        step_ticks(&mut app, 1);

        if tick % 100 == 0 {
            let snapshot = app.world().resource::<RenderSnapshot>();
            let alive = snapshot.enemies.iter().filter(|enemy| !enemy.dead).count();
            tracing::info!(
                "Tick {}: {} enemies alive, {} effects, {} pickups, combo {:?}",
                tick,
                alive,
                snapshot.effects.len(),
                snapshot.pickups.len(),
                snapshot.combo.symbols
            );
            if let Some(view) = &snapshot.player {
                tracing::info!(
                    "  player at {:?}: {}/{} hp, level {} ({} exp)",
                    view.rect.min,
                    view.health,
                    view.max_health,
                    view.level,
                    view.exp
                );
            }
        }
    }

    let cleared = app.world().resource::<Encounter>().cleared;
    tracing::info!("Simulation complete (encounter cleared: {})", cleared);
}
