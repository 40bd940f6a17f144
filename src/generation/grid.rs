//! Fixed-size tile grid shared by the generation stages.

use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;

/// Classification of one grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    Floor,
    Wall,
}

impl TileType {
    /// Numeric ID for FFI/network serialization
    pub fn to_id(self) -> u8 {
        match self {
            TileType::Empty => 0,
            TileType::Floor => 1,
            TileType::Wall => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(TileType::Empty),
            1 => Some(TileType::Floor),
            2 => Some(TileType::Wall),
            _ => None,
        }
    }

    /// Agents can stand on this tile
    pub fn is_walkable(self) -> bool {
        matches!(self, TileType::Floor)
    }
}

/// Row-major grid of tiles, indexed `[y * width + x]`.
///
/// Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileType>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileType::Empty; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.width && (coord.y as u32) < self.height
    }

    /// Flat arena index of an in-bounds coordinate
    pub fn index_of(&self, coord: Coordinate) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }

    pub fn coordinate_of(&self, index: usize) -> Coordinate {
        let width = self.width as usize;
        Coordinate::new((index % width) as i32, (index / width) as i32)
    }

    pub fn get(&self, coord: Coordinate) -> Option<TileType> {
        self.index_of(coord).map(|i| self.tiles[i])
    }

    /// Out-of-bounds writes are ignored; returns whether the cell was written
    pub fn set(&mut self, coord: Coordinate, tile: TileType) -> bool {
        match self.index_of(coord) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    pub fn is_floor(&self, coord: Coordinate) -> bool {
        self.get(coord) == Some(TileType::Floor)
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Every cell with its coordinate, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, TileType)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (self.coordinate_of(i), *tile))
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Rows as nested vectors of tile IDs, `[y][x]`
    pub fn to_id_rows(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|t| t.to_id()).collect())
            .collect()
    }
}
