//! Wall derivation: empty cells bordering floor become wall.

use tracing::debug;

use super::grid::{TileGrid, TileType};

/// Single pass over the grid. Must run after every floor tile is final.
/// Returns the number of walls placed.
pub fn derive_walls(grid: &mut TileGrid) -> usize {
    let walls: Vec<_> = grid
        .iter()
        .filter(|(_, tile)| *tile == TileType::Empty)
        .filter(|(coord, _)| coord.neighbors().any(|n| grid.is_floor(n)))
        .map(|(coord, _)| coord)
        .collect();

    for &coord in &walls {
        grid.set(coord, TileType::Wall);
    }

    debug!(walls = walls.len(), "walls derived");
    walls.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;

    #[test]
    fn test_single_floor_gets_ring_of_walls() {
        let mut grid = TileGrid::new(5, 5);
        grid.set(Coordinate::new(2, 2), TileType::Floor);
        assert_eq!(derive_walls(&mut grid), 8);
        assert_eq!(grid.count(TileType::Wall), 8);
        assert_eq!(grid.get(Coordinate::new(0, 0)), Some(TileType::Empty));
        assert_eq!(grid.get(Coordinate::new(1, 1)), Some(TileType::Wall));
    }

    #[test]
    fn test_floor_at_border_clips_walls() {
        let mut grid = TileGrid::new(3, 3);
        grid.set(Coordinate::new(0, 0), TileType::Floor);
        assert_eq!(derive_walls(&mut grid), 3);
    }

    #[test]
    fn test_walls_never_overwrite_floor() {
        let mut grid = TileGrid::new(4, 4);
        for x in 0..4 {
            grid.set(Coordinate::new(x, 1), TileType::Floor);
        }
        derive_walls(&mut grid);
        assert_eq!(grid.count(TileType::Floor), 4);
        assert_eq!(grid.count(TileType::Wall), 8);
        assert_eq!(grid.count(TileType::Empty), 4);
    }

    #[test]
    fn test_empty_grid_unchanged() {
        let mut grid = TileGrid::new(4, 4);
        assert_eq!(derive_walls(&mut grid), 0);
        assert_eq!(grid.count(TileType::Empty), 16);
    }
}
