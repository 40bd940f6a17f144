//! Tower Dungeon - Procedural Dungeon Core Library
//!
//! This crate generates deterministic 2D tile dungeons from a seed:
//! - Room placement (non-overlapping rectangles)
//! - Delaunay triangulation of room centers (Bowyer-Watson)
//! - Minimum spanning connectors plus random extra loops
//! - Hallway quads rasterized onto the tile grid
//! - Wall derivation around every floor tile
//! - A* navigation over walkable tiles
//! - Bevy plugin, FFI bridge and ASCII rendering for debugging

pub mod bridge;
pub mod config;
pub mod constants;
pub mod generation;
pub mod geometry;
pub mod logging;
pub mod navigation;
pub mod visualization;

pub use config::{load_settings, GenerationSettings, SettingsError};
pub use generation::grid::{TileGrid, TileType};
pub use generation::{generate_batch, Dungeon, DungeonSummary};
pub use geometry::{Coordinate, Edge, Vertex};
pub use navigation::NavigationIndex;
