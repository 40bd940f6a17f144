use serde::{Deserialize, Serialize};

use super::{Edge, Vertex};
use crate::constants::DEGENERATE_DETERMINANT;

/// Circle through the three corners of a triangle, in `f64`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_sq: f64,
}

impl Circumcircle {
    /// Inclusive: points on the circle count as contained
    pub fn contains(&self, p: Vertex) -> bool {
        let dx = p.x as f64 - self.center_x;
        let dy = p.y as f64 - self.center_y;
        dx * dx + dy * dy <= self.radius_sq
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
    #[serde(skip)]
    pub discard: bool,
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            a,
            b,
            c,
            discard: false,
        }
    }

    pub fn vertices(&self) -> [Vertex; 3] {
        [self.a, self.b, self.c]
    }

    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    /// `p` equals one of the corners
    pub fn contains_vertex(&self, p: Vertex) -> bool {
        self.a.approx_eq(p) || self.b.approx_eq(p) || self.c.approx_eq(p)
    }

    /// Circumcircle via the determinant formula; `None` for collinear corners
    pub fn circumcircle(&self) -> Option<Circumcircle> {
        let (ax, ay) = (self.a.x as f64, self.a.y as f64);
        let (bx, by) = (self.b.x as f64, self.b.y as f64);
        let (cx, cy) = (self.c.x as f64, self.c.y as f64);

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() < DEGENERATE_DETERMINANT {
            return None;
        }

        let a_sq = ax * ax + ay * ay;
        let b_sq = bx * bx + by * by;
        let c_sq = cx * cx + cy * cy;

        let center_x = (a_sq * (by - cy) + b_sq * (cy - ay) + c_sq * (ay - by)) / d;
        let center_y = (a_sq * (cx - bx) + b_sq * (ax - cx) + c_sq * (bx - ax)) / d;

        let dx = ax - center_x;
        let dy = ay - center_y;

        Some(Circumcircle {
            center_x,
            center_y,
            radius_sq: dx * dx + dy * dy,
        })
    }

    /// Degenerate triangles contain nothing
    pub fn circumcircle_contains(&self, p: Vertex) -> bool {
        self.circumcircle().is_some_and(|circle| circle.contains(p))
    }

    pub fn is_degenerate(&self) -> bool {
        self.circumcircle().is_none()
    }
}

/// Free-function form of [`Triangle::circumcircle_contains`]
pub fn circumcircle_contains(triangle: &Triangle, p: Vertex) -> bool {
    triangle.circumcircle_contains(p)
}
