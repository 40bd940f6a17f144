use serde::{Deserialize, Serialize};

use super::{distance, Vertex};

/// An unordered pair of vertices.
///
/// `discard` is scratch state for the dedup passes of the triangulator and is
/// never meaningful outside a single pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    pub u: Vertex,
    pub v: Vertex,
    #[serde(skip)]
    pub discard: bool,
}

impl Edge {
    pub fn new(u: Vertex, v: Vertex) -> Self {
        Self {
            u,
            v,
            discard: false,
        }
    }

    pub fn length(&self) -> f32 {
        distance(self.u, self.v)
    }

    /// Direction angle from `u` to `v`, radians
    pub fn angle(&self) -> f32 {
        (self.v.y - self.u.y).atan2(self.v.x - self.u.x)
    }

    pub fn has_endpoint(&self, p: Vertex) -> bool {
        self.u.approx_eq(p) || self.v.approx_eq(p)
    }

    /// Same endpoints in either order, under approximate vertex equality
    pub fn almost_equal(&self, other: &Edge) -> bool {
        (self.u.approx_eq(other.u) && self.v.approx_eq(other.v))
            || (self.u.approx_eq(other.v) && self.v.approx_eq(other.u))
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.almost_equal(other)
    }
}

/// Keeps the first occurrence of every edge, preserving order
pub fn dedup_edges(edges: &[Edge]) -> Vec<Edge> {
    let mut unique: Vec<Edge> = Vec::with_capacity(edges.len());
    for edge in edges {
        if !unique.iter().any(|e| e.almost_equal(edge)) {
            unique.push(Edge::new(edge.u, edge.v));
        }
    }
    unique
}
