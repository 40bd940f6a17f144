//! Text rendering of generated grids for debugging and the CLI.
//!
//! Rows are printed from `y = 0` downward, one glyph per tile.

use crate::generation::grid::{TileGrid, TileType};
use crate::geometry::{Coordinate, Vertex};

pub const PATH_GLYPH: char = '*';
pub const SPAWN_GLYPH: char = '@';

fn tile_glyph(tile: TileType) -> char {
    match tile {
        TileType::Empty => ' ',
        TileType::Floor => '.',
        TileType::Wall => '#',
    }
}

fn glyph_rows(grid: &TileGrid) -> Vec<Vec<char>> {
    (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| tile_glyph(grid.get(Coordinate::new(x, y)).unwrap_or_default()))
                .collect()
        })
        .collect()
}

fn join_rows(rows: Vec<Vec<char>>) -> String {
    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_ascii(grid: &TileGrid) -> String {
    join_rows(glyph_rows(grid))
}

/// Render with a path overlay and the spawn marker on top
pub fn render_with_path(grid: &TileGrid, path: &[Vertex], spawn: Option<Vertex>) -> String {
    let mut rows = glyph_rows(grid);
    let mut stamp = |v: Vertex, glyph: char| {
        let c = Coordinate::from(v);
        if grid.in_bounds(c) {
            rows[c.y as usize][c.x as usize] = glyph;
        }
    };

    for &step in path {
        stamp(step, PATH_GLYPH);
    }
    if let Some(spawn) = spawn {
        stamp(spawn, SPAWN_GLYPH);
    }
    join_rows(rows)
}
