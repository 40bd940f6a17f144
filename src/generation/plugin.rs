//! Engine integration: regenerate the dungeon on request.
//!
//! The game world sends `GenerateDungeonEvent`; the finished dungeon is
//! inserted as the `ActiveDungeon` resource and announced with
//! `DungeonReadyEvent`.

use bevy::app::{App, Plugin, Update};
use bevy::ecs::prelude::*;
use tracing::{error, info};

use super::Dungeon;
use crate::config::GenerationSettings;

/// Plugin carrying the settings every request starts from
#[derive(Debug, Clone, Default)]
pub struct DungeonPlugin {
    pub settings: GenerationSettings,
}

impl Plugin for DungeonPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DungeonSettings(self.settings.clone()))
            .add_event::<GenerateDungeonEvent>()
            .add_event::<DungeonReadyEvent>()
            .add_systems(Update, handle_generate_requests);
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DungeonSettings(pub GenerationSettings);

/// The dungeon the world is currently playing on
#[derive(Resource, Debug)]
pub struct ActiveDungeon {
    pub dungeon: Dungeon,
    /// Bumped on every regeneration
    pub generation: u32,
}

/// Request a new dungeon. `None` seeds from the settings (0 → time-derived).
#[derive(Event, Debug, Clone, Default)]
pub struct GenerateDungeonEvent {
    pub seed: Option<u64>,
}

#[derive(Event, Debug, Clone)]
pub struct DungeonReadyEvent {
    pub seed: u64,
    pub fingerprint: String,
}

fn handle_generate_requests(
    mut requests: EventReader<GenerateDungeonEvent>,
    settings: Res<DungeonSettings>,
    active: Option<Res<ActiveDungeon>>,
    mut ready: EventWriter<DungeonReadyEvent>,
    mut commands: Commands,
) {
    let mut generation = active.map(|a| a.generation).unwrap_or(0);

    for request in requests.read() {
        let resolved = match request.seed {
            Some(seed) => settings.0.clone().with_seed(seed),
            None => settings.0.clone().with_resolved_seed(),
        };

        match Dungeon::generate(&resolved) {
            Ok(dungeon) => {
                generation += 1;
                info!(seed = resolved.seed, generation, "dungeon ready");
                ready.send(DungeonReadyEvent {
                    seed: resolved.seed,
                    fingerprint: dungeon.fingerprint(),
                });
                commands.insert_resource(ActiveDungeon {
                    dungeon,
                    generation,
                });
            }
            Err(e) => error!("dungeon generation failed: {}", e),
        }
    }
}
