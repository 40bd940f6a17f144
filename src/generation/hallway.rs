//! Hallway geometry and rasterization.
//!
//! A hallway is the connector edge thickened into an oriented quadrilateral:
//! both endpoints are pushed out along the edge normal by `expansion` on each
//! side. Cells whose centers fall inside the quad become floor.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{TileGrid, TileType};
use crate::config::GenerationSettings;
use crate::constants::AREA_TOLERANCE;
use crate::geometry::{bounding_box, triangle_area, Coordinate, Edge, Rect, Vertex};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hallway {
    pub edge: Edge,
    /// Half-width of the corridor
    pub expansion: f32,
    /// Quad corners in winding order: u+n, v+n, v-n, u-n
    pub corners: [Vertex; 4],
}

impl Hallway {
    pub fn new(edge: Edge, expansion: f32) -> Self {
        let angle = edge.angle();
        let normal = Vertex::new(-angle.sin(), angle.cos()) * expansion;

        Self {
            edge,
            expansion,
            corners: [
                edge.u + normal,
                edge.v + normal,
                edge.v - normal,
                edge.u - normal,
            ],
        }
    }

    pub fn area(&self) -> f32 {
        let [a, b, c, d] = self.corners;
        triangle_area(a, b, c) + triangle_area(a, c, d)
    }

    /// Area-decomposition test: `p` is inside when the four triangles it
    /// forms with the quad's sides add up to the quad's own area.
    pub fn contains(&self, p: Vertex) -> bool {
        let area = self.area();
        if area <= f32::EPSILON {
            return false;
        }

        let [a, b, c, d] = self.corners;
        let sum = triangle_area(p, a, b)
            + triangle_area(p, b, c)
            + triangle_area(p, c, d)
            + triangle_area(p, d, a);

        (sum - area).abs() <= area * AREA_TOLERANCE
    }

    pub fn bounds(&self) -> Rect {
        bounding_box(&self.corners).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Stamp floor into every in-bounds cell whose center lies inside.
    /// Returns how many cells were written.
    pub fn rasterize(&self, grid: &mut TileGrid) -> usize {
        let bounds = self.bounds();
        let min_x = bounds.min.x.floor().max(0.0) as i32;
        let min_y = bounds.min.y.floor().max(0.0) as i32;
        let max_x = bounds.max.x.ceil().min(grid.width() as f32) as i32;
        let max_y = bounds.max.y.ceil().min(grid.height() as f32) as i32;

        let mut written = 0;
        for y in min_y..max_y {
            for x in min_x..max_x {
                let cell = Coordinate::new(x, y);
                if self.contains(cell.center()) && grid.set(cell, TileType::Floor) {
                    written += 1;
                }
            }
        }
        written
    }
}

/// Draw one expansion per connector, in order, and carve the hallways
pub fn carve_hallways<R: Rng>(
    connectors: &[Edge],
    settings: &GenerationSettings,
    grid: &mut TileGrid,
    rng: &mut R,
) -> Vec<Hallway> {
    let hallways: Vec<Hallway> = connectors
        .iter()
        .map(|edge| {
            let expansion = if settings.max_hallway_expansion > 1 {
                rng.gen_range(1..settings.max_hallway_expansion)
            } else {
                1
            };
            Hallway::new(*edge, expansion as f32)
        })
        .collect();

    let cells: usize = hallways.iter().map(|h| h.rasterize(grid)).sum();
    debug!(hallways = hallways.len(), cells, "hallways carved");

    hallways
}
