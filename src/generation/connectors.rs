//! Graph reduction: triangulation edges → connector set.
//!
//! A Prim-style frontier scan picks a minimum spanning tree over the candidate
//! edges, then every leftover edge gets an independent roll to survive as an
//! extra loop.

use rand::Rng;
use tracing::debug;

use crate::geometry::{Edge, Vertex};

/// Connectors chosen for hallway carving
#[derive(Debug, Clone, Default)]
pub struct ConnectorGraph {
    /// Minimum spanning edges, in selection order
    pub spanning: Vec<Edge>,
    /// Non-essential edges that won their roll, in candidate order
    pub extra: Vec<Edge>,
}

impl ConnectorGraph {
    /// Spanning edges first, then extras
    pub fn edges(&self) -> Vec<Edge> {
        self.spanning.iter().chain(&self.extra).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.spanning.len() + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spanning.is_empty() && self.extra.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.spanning.iter().chain(&self.extra).map(|e| e.length()).sum()
    }
}

/// Index-based view of a candidate edge list
struct EdgeArena {
    vertices: Vec<Vertex>,
    /// (u index, v index, length) per candidate, same order as the input
    links: Vec<(usize, usize, f32)>,
}

impl EdgeArena {
    fn build(candidates: &[Edge]) -> Self {
        fn intern(p: Vertex, vertices: &mut Vec<Vertex>) -> usize {
            match vertices.iter().position(|v| v.approx_eq(p)) {
                Some(i) => i,
                None => {
                    vertices.push(p);
                    vertices.len() - 1
                }
            }
        }

        let mut vertices: Vec<Vertex> = Vec::new();
        let links = candidates
            .iter()
            .map(|e| {
                let u = intern(e.u, &mut vertices);
                let v = intern(e.v, &mut vertices);
                (u, v, e.length())
            })
            .collect();

        Self { vertices, links }
    }
}

/// Indices into `candidates` forming a minimum spanning tree of the component
/// containing the first candidate's `u`.
///
/// Each round scans every candidate and takes the shortest one crossing the
/// frontier; ties go to the earliest candidate. Vertices in other components
/// stay unconnected.
pub fn spanning_tree(candidates: &[Edge]) -> Vec<usize> {
    let arena = EdgeArena::build(candidates);
    if arena.vertices.is_empty() {
        return Vec::new();
    }

    let mut closed = vec![false; arena.vertices.len()];
    closed[0] = true;
    let mut closed_count = 1;
    let mut selected = Vec::with_capacity(arena.vertices.len().saturating_sub(1));

    while closed_count < arena.vertices.len() {
        let mut best: Option<(usize, f32)> = None;

        for (i, &(u, v, length)) in arena.links.iter().enumerate() {
            if closed[u] == closed[v] {
                continue;
            }
            if best.map_or(true, |(_, best_len)| length < best_len) {
                best = Some((i, length));
            }
        }

        let Some((i, _)) = best else {
            break;
        };

        let (u, v, _) = arena.links[i];
        for end in [u, v] {
            if !closed[end] {
                closed[end] = true;
                closed_count += 1;
            }
        }
        selected.push(i);
    }

    selected
}

/// Reduce `candidates` to a connector graph.
///
/// `extra_chance` is a percentage in `[0, 100]`; one uniform draw is consumed
/// per non-spanning candidate, in candidate order.
pub fn reduce<R: Rng>(candidates: &[Edge], extra_chance: f32, rng: &mut R) -> ConnectorGraph {
    let tree = spanning_tree(candidates);

    let mut in_tree = vec![false; candidates.len()];
    for &i in &tree {
        in_tree[i] = true;
    }

    let spanning: Vec<Edge> = tree
        .iter()
        .map(|&i| Edge::new(candidates[i].u, candidates[i].v))
        .collect();

    let mut extra = Vec::new();
    for (i, edge) in candidates.iter().enumerate() {
        if in_tree[i] {
            continue;
        }
        let roll: f32 = rng.gen::<f32>() * 100.0;
        if roll < extra_chance {
            extra.push(Edge::new(edge.u, edge.v));
        }
    }

    let graph = ConnectorGraph { spanning, extra };
    debug!(
        candidates = candidates.len(),
        spanning = graph.spanning.len(),
        extra = graph.extra.len(),
        total_length = graph.total_length(),
        "connectors selected"
    );

    graph
}
