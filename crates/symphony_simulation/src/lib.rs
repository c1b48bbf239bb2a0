//! Symphony Simulation Core
//!
//! Headless combat/progression core of a 2D rhythm action game on Bevy 0.16.
//! The host feeds `InputSnapshot`, steps `FixedUpdate` and draws from
//! `RenderSnapshot` plus the presentation events.
//!
//! Frame order (CombatSet, chained in FixedUpdate):
//! 1. Input: key edges, player input, enemy AI + strikes
//! 2. Integrate: collision-gated movement
//! 3. Collision: dynamic obstacle snapshot rebuilt
//! 4. Effects: effect update, hit resolution, experience pickups
//! 5. Combo: combo patterns, tracker timers, stamina/dash
//! 6. Present: encounter gate, render snapshot

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

pub mod clock;
pub mod combo;
pub mod components;
pub mod config;
pub mod effects;
pub mod encounter;
pub mod enemy;
pub mod logger;
pub mod physics;
pub mod pickups;
pub mod player;
pub mod render_snapshot;
pub mod skills;

pub use clock::CombatClock;
pub use combo::{ComboOutcome, ComboPattern, ComboTracker, NoteType};
pub use components::{Facing, Health, Stamina};
pub use config::{CombatConfig, ContentError};
pub use effects::{
    BuffActivated, ComboFeedback, ComboFeedbackKind, DamageAbsorbed, DamageDealt, EffectsPlugin, EncounterCleared,
    EntityDied, ExpCollected, HealApplied, LevelUp, SkillEffectEngine,
};
pub use encounter::{begin_encounter, retry_encounter, Encounter, EncounterPlugin, LevelDefinition};
pub use enemy::{Enemy, EnemyPlugin, EnemyProfiles, EnemyRoster, SpawnError, SpawnRecord, SpawnReport};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::CollisionIndex;
pub use pickups::{ExpPickupPool, PickupsPlugin};
pub use player::{InputSnapshot, KeyEdges, LogicalKey, Player, PlayerPlugin};
pub use render_snapshot::{RenderSnapshot, RenderSnapshotPlugin};
pub use skills::{SkillCatalog, SkillKey};

/// Per-tick phases, chained in this order
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Integrate,
    Collision,
    Effects,
    Combo,
    Present,
}

/// Main simulation plugin (composes every subsystem)
///
/// Resources already present (custom config, content, RNG seed) are kept.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // 60Hz fixed tick
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<CombatConfig>()
            .init_resource::<SkillCatalog>()
            .init_resource::<EnemyProfiles>()
            .init_resource::<CombatClock>()
            .init_resource::<CollisionIndex>()
            .init_resource::<InputSnapshot>()
            .init_resource::<KeyEdges>()
            .init_resource::<EnemyRoster>()
            .init_resource::<ExpPickupPool>()
            .init_resource::<RenderSnapshot>()
            .init_resource::<Encounter>();

        if !app.world().contains_resource::<SkillEffectEngine>() {
            let effects = app.world().resource::<CombatConfig>().effects.clone();
            app.insert_resource(SkillEffectEngine::new(effects));
        }

        app.configure_sets(
            FixedUpdate,
            (
                CombatSet::Input,
                CombatSet::Integrate,
                CombatSet::Collision,
                CombatSet::Effects,
                CombatSet::Combo,
                CombatSet::Present,
            )
                .chain(),
        );

        app.add_systems(FixedFirst, clock::advance_combat_clock);

        app.add_plugins((
            PlayerPlugin,
            EnemyPlugin,
            EffectsPlugin,
            PickupsPlugin,
            EncounterPlugin,
            RenderSnapshotPlugin,
        ));
    }
}

/// Seeded RNG resource (experience scatter)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal headless App with the full simulation installed
pub fn create_headless_app(seed: u64) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// One fixed tick with a manual clock: advance `CombatClock` by `delta`
/// and run `FixedUpdate` once. Independent of wall-clock time.
pub fn step_simulation(app: &mut App, delta: Duration) {
    app.world_mut().resource_mut::<CombatClock>().advance(delta);
    app.world_mut().run_schedule(FixedUpdate);
}

/// Fixed tick length (60Hz)
pub const TICK: Duration = Duration::from_micros(16_667);

/// Step `ticks` fixed ticks of `TICK`
pub fn step_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        step_simulation(app, TICK);
    }
}
