//! Dungeon generation pipeline.
//!
//! ```text
//! GenerationSettings (seed)
//!       → place rooms (non-overlapping, carved as floor)
//!       → Delaunay triangulation of room centers
//!       → spanning connectors + random extra loops
//!       → hallway quads rasterized as floor
//!       → walls around every floor tile
//!       → navigation index
//!       → Dungeon (grid, rooms, edges, spawn, navigation)
//! ```
//!
//! One PRNG, seeded once, threads through every stage in that order, so a
//! seed and settings pair always yields the same dungeon.

pub mod connectors;
pub mod grid;
pub mod hallway;
pub mod plugin;
pub mod rooms;
pub mod triangulation;
pub mod walls;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use tracing::{info, warn};

use crate::config::{GenerationSettings, SettingsError};
use crate::geometry::{Coordinate, Edge, Vertex};
use crate::logging::TimingSpan;
use crate::navigation::NavigationIndex;

use grid::{TileGrid, TileType};
use hallway::Hallway;
use rooms::Room;

pub use plugin::{ActiveDungeon, DungeonPlugin, DungeonReadyEvent, GenerateDungeonEvent};

/// PRNG threaded through one generation run
pub type DungeonRng = Xoshiro256PlusPlus;

/// A finished dungeon. Read-only once returned.
#[derive(Debug, Clone)]
pub struct Dungeon {
    settings: GenerationSettings,
    grid: TileGrid,
    rooms: Vec<Room>,
    edges: Vec<Edge>,
    hallways: Vec<Hallway>,
    spawn: Vertex,
    navigation: NavigationIndex,
}

impl Dungeon {
    /// Run the full pipeline. Invalid settings are the only failure.
    pub fn generate(settings: &GenerationSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let _span = TimingSpan::new("generate_dungeon");

        let mut rng = DungeonRng::seed_from_u64(settings.seed);
        let mut grid = TileGrid::new(settings.grid_width, settings.grid_height);

        let rooms = rooms::place_rooms(settings, &mut grid, &mut rng);

        let centers: Vec<Vertex> = rooms.iter().map(Room::center).collect();
        let triangulation = triangulation::triangulate(&centers);

        let connectors = connectors::reduce(
            &triangulation.edges,
            settings.extra_hallway_generation_chance,
            &mut rng,
        );
        let edges = connectors.edges();

        let hallways = hallway::carve_hallways(&edges, settings, &mut grid, &mut rng);
        walls::derive_walls(&mut grid);

        let spawn = choose_spawn(&rooms, &grid, &mut rng);
        let navigation = NavigationIndex::build(&grid);

        info!(
            seed = settings.seed,
            rooms = rooms.len(),
            connectors = edges.len(),
            floor = grid.count(TileType::Floor),
            walls = grid.count(TileType::Wall),
            "dungeon generated"
        );

        Ok(Self {
            settings: settings.clone(),
            grid,
            rooms,
            edges,
            hallways,
            spawn,
            navigation,
        })
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Selected connectors: spanning edges first, then extra loops
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    pub fn spawn(&self) -> Vertex {
        self.spawn
    }

    pub fn navigation(&self) -> &NavigationIndex {
        &self.navigation
    }

    pub fn find_path(&self, start: Vertex, goal: Vertex) -> Vec<Vertex> {
        self.navigation.find_path(start, goal)
    }

    /// Hex SHA3-256 over everything generation decides. Bit-identical
    /// dungeons share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha3_256::new();
        hasher.update(self.grid.width().to_le_bytes());
        hasher.update(self.grid.height().to_le_bytes());
        hasher.update(self.grid.tiles().iter().map(|t| t.to_id()).collect::<Vec<u8>>());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                hasher.update(value.to_le_bytes());
            }
        }
        for edge in &self.edges {
            for value in [edge.u.x, edge.u.y, edge.v.x, edge.v.y] {
                hasher.update(value.to_bits().to_le_bytes());
            }
        }
        hasher.update(self.spawn.x.to_bits().to_le_bytes());
        hasher.update(self.spawn.y.to_bits().to_le_bytes());

        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    pub fn summary(&self) -> DungeonSummary {
        DungeonSummary {
            seed: self.settings.seed,
            width: self.grid.width(),
            height: self.grid.height(),
            tiles: self.grid.to_id_rows(),
            rooms: self.rooms.clone(),
            edges: self.edges.clone(),
            spawn: self.spawn,
            floor_tiles: self.grid.count(TileType::Floor),
            wall_tiles: self.grid.count(TileType::Wall),
            navigation_nodes: self.navigation.node_count(),
            fingerprint: self.fingerprint(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.summary()).unwrap_or_default()
    }
}

/// Serializable view of a dungeon (the navigation index is rebuilt from
/// `tiles`, never shipped)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonSummary {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    /// Tile IDs, `[y][x]`
    pub tiles: Vec<Vec<u8>>,
    pub rooms: Vec<Room>,
    pub edges: Vec<Edge>,
    pub spawn: Vertex,
    pub floor_tiles: usize,
    pub wall_tiles: usize,
    pub navigation_nodes: usize,
    pub fingerprint: String,
}

/// Center tile of a random room. Falls back to the grid center when no room
/// could be placed.
fn choose_spawn(rooms: &[Room], grid: &TileGrid, rng: &mut DungeonRng) -> Vertex {
    match rooms.choose(rng) {
        Some(room) => Coordinate::from(room.center()).center(),
        None => {
            warn!("no rooms placed, spawning at grid center");
            Vertex::new(grid.width() as f32 * 0.5, grid.height() as f32 * 0.5)
        }
    }
}

/// Generate one dungeon per seed, in parallel. Each run is independent and
/// single-threaded; results keep the order of `seeds`.
pub fn generate_batch(
    settings: &GenerationSettings,
    seeds: &[u64],
) -> Vec<Result<Dungeon, SettingsError>> {
    seeds
        .par_iter()
        .map(|&seed| Dungeon::generate(&settings.clone().with_seed(seed)))
        .collect()
}
