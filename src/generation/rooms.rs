//! Room placement by bounded-retry random sampling.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::grid::{TileGrid, TileType};
use crate::config::GenerationSettings;
use crate::geometry::{Coordinate, Edge, Rect, Vertex};

/// An axis-aligned room in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Room {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }

    pub fn center(&self) -> Vertex {
        self.rect().center()
    }

    /// The four boundary segments, counter-clockwise from the origin corner
    pub fn edges(&self) -> [Edge; 4] {
        let r = self.rect();
        let bottom_left = r.min;
        let bottom_right = Vertex::new(r.max.x, r.min.y);
        let top_right = r.max;
        let top_left = Vertex::new(r.min.x, r.max.y);
        [
            Edge::new(bottom_left, bottom_right),
            Edge::new(bottom_right, top_right),
            Edge::new(top_right, top_left),
            Edge::new(top_left, bottom_left),
        ]
    }

    pub fn intersects(&self, other: &Room) -> bool {
        self.rect().intersects(&other.rect())
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x >= self.x as i32
            && coord.y >= self.y as i32
            && coord.x < (self.x + self.width) as i32
            && coord.y < (self.y + self.height) as i32
    }

    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| {
            (self.x..self.x + self.width).map(move |x| Coordinate::new(x as i32, y as i32))
        })
    }

    /// Stamp the room interior as floor
    pub fn carve(&self, grid: &mut TileGrid) {
        for cell in self.cells() {
            grid.set(cell, TileType::Floor);
        }
    }
}

/// Place up to `settings.room_count` non-overlapping rooms, carving each one
/// into `grid` as soon as it is accepted.
///
/// A room whose attempts run out is skipped; the run continues with the next.
pub fn place_rooms<R: Rng>(
    settings: &GenerationSettings,
    grid: &mut TileGrid,
    rng: &mut R,
) -> Vec<Room> {
    let bounds = Rect::new(0.0, 0.0, grid.width() as f32, grid.height() as f32);
    let max_x = grid.width().saturating_sub(settings.max_room_width);
    let max_y = grid.height().saturating_sub(settings.max_room_height);

    let mut rooms: Vec<Room> = Vec::with_capacity(settings.room_count as usize);

    for index in 0..settings.room_count {
        let mut placed = None;

        for _ in 0..settings.max_room_attempts {
            let candidate = Room::new(
                rng.gen_range(0..=max_x),
                rng.gen_range(0..=max_y),
                rng.gen_range(settings.min_room_width..=settings.max_room_width),
                rng.gen_range(settings.min_room_height..=settings.max_room_height),
            );

            if !bounds.contains_rect(&candidate.rect()) {
                continue;
            }
            if rooms.iter().any(|r| r.intersects(&candidate)) {
                continue;
            }

            placed = Some(candidate);
            break;
        }

        match placed {
            Some(room) => {
                room.carve(grid);
                rooms.push(room);
            }
            None => trace!(room = index, "room placement attempts exhausted, skipping"),
        }
    }

    debug!(
        requested = settings.room_count,
        placed = rooms.len(),
        "rooms placed"
    );

    rooms
}
