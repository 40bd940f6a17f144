//! Navigation index: floor-tile graph with A* queries.
//!
//! One graph node per floor tile, linked to each of its up-to-8 floor
//! neighbors with the Euclidean distance between tile centers. The index is
//! immutable once built and is `Send + Sync`, so any number of readers can
//! query it concurrently.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

use crate::constants::PATH_COST_TOLERANCE;
use crate::generation::grid::TileGrid;
use crate::geometry::{distance, Coordinate, Vertex};

#[derive(Debug, Clone)]
pub struct NavigationIndex {
    width: u32,
    height: u32,
    graph: UnGraph<Coordinate, f32>,
    /// Grid cell (row-major) → graph node, `None` for non-floor cells
    lookup: Vec<Option<NodeIndex>>,
}

impl NavigationIndex {
    /// Build the index from a finished grid
    pub fn build(grid: &TileGrid) -> Self {
        let mut graph: UnGraph<Coordinate, f32> = UnGraph::default();
        let mut lookup: Vec<Option<NodeIndex>> = vec![None; grid.tiles().len()];

        for (coord, tile) in grid.iter() {
            if tile.is_walkable() {
                if let Some(i) = grid.index_of(coord) {
                    lookup[i] = Some(graph.add_node(coord));
                }
            }
        }

        // Link forward neighbors only so each undirected edge is added once
        for (coord, _) in grid.iter() {
            let Some(from) = grid.index_of(coord).and_then(|i| lookup[i]) else {
                continue;
            };
            for (dx, dy) in [(1, 0), (-1, 1), (0, 1), (1, 1)] {
                let neighbor = coord.offset(dx, dy);
                if let Some(to) = grid.index_of(neighbor).and_then(|i| lookup[i]) {
                    let cost = distance(coord.center(), neighbor.center());
                    graph.add_edge(from, to, cost);
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "navigation index built"
        );

        Self {
            width: grid.width(),
            height: grid.height(),
            graph,
            lookup,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_walkable(&self, coord: Coordinate) -> bool {
        self.node_at(coord).is_some()
    }

    fn node_at(&self, coord: Coordinate) -> Option<NodeIndex> {
        if coord.x < 0 || coord.y < 0 || coord.x as u32 >= self.width || coord.y as u32 >= self.height
        {
            return None;
        }
        self.lookup[coord.y as usize * self.width as usize + coord.x as usize]
    }

    /// Shortest path between the tiles containing `start` and `goal`, as tile
    /// centers from start to goal. Empty when either end is not finite, not a
    /// floor tile, or the two are not connected.
    pub fn find_path(&self, start: Vertex, goal: Vertex) -> Vec<Vertex> {
        let finite = |v: Vertex| v.x.is_finite() && v.y.is_finite();
        if !finite(start) || !finite(goal) {
            return Vec::new();
        }
        self.find_path_coords(Coordinate::from(start), Coordinate::from(goal))
    }

    pub fn find_path_coords(&self, start: Coordinate, goal: Coordinate) -> Vec<Vertex> {
        let (Some(start), Some(goal)) = (self.node_at(start), self.node_at(goal)) else {
            return Vec::new();
        };
        self.astar(start, goal)
            .into_iter()
            .map(|n| self.graph[n].center())
            .collect()
    }

    /// Answer many queries in parallel against the shared index
    pub fn find_paths(&self, queries: &[(Vertex, Vertex)]) -> Vec<Vec<Vertex>> {
        queries
            .par_iter()
            .map(|&(start, goal)| self.find_path(start, goal))
            .collect()
    }

    fn astar(&self, start: NodeIndex, goal: NodeIndex) -> Vec<NodeIndex> {
        let node_count = self.graph.node_count();
        let goal_pos = self.graph[goal].center();
        let heuristic = |n: NodeIndex| distance(self.graph[n].center(), goal_pos);

        let mut g_score = vec![f32::INFINITY; node_count];
        let mut came_from: Vec<Option<NodeIndex>> = vec![None; node_count];
        let mut closed = vec![false; node_count];
        let mut open = BinaryHeap::new();

        g_score[start.index()] = 0.0;
        let h = heuristic(start);
        open.push(OpenNode {
            node: start,
            f: h,
            h,
        });

        while let Some(OpenNode { node: current, .. }) = open.pop() {
            if current == goal {
                return reconstruct(&came_from, goal);
            }
            if closed[current.index()] {
                continue;
            }
            closed[current.index()] = true;

            let current_g = g_score[current.index()];
            for edge in self.graph.edges(current) {
                let neighbor = if edge.source() == current {
                    edge.target()
                } else {
                    edge.source()
                };
                if closed[neighbor.index()] {
                    continue;
                }

                let tentative = current_g + *edge.weight();
                if tentative < g_score[neighbor.index()] {
                    g_score[neighbor.index()] = tentative;
                    came_from[neighbor.index()] = Some(current);
                    let h = heuristic(neighbor);
                    open.push(OpenNode {
                        node: neighbor,
                        f: tentative + h,
                        h,
                    });
                }
            }
        }

        Vec::new()
    }
}

fn reconstruct(came_from: &[Option<NodeIndex>], goal: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![goal];
    let mut node = goal;
    while let Some(prev) = came_from[node.index()] {
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}

/// Total Euclidean length of a polyline
pub fn path_length(path: &[Vertex]) -> f32 {
    path.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Open-set entry. Lowest `f` pops first; `f` values in the same
/// `PATH_COST_TOLERANCE` bucket tie and fall back to lower `h`, then node index.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    node: NodeIndex,
    f: f32,
    h: f32,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse so the cheapest entry is greatest
        other
            .cost_bucket()
            .cmp(&self.cost_bucket())
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl OpenNode {
    /// `f` quantized to the tie tolerance, so the ordering stays total
    fn cost_bucket(&self) -> i64 {
        (self.f / PATH_COST_TOLERANCE).round() as i64
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
