//! Bowyer–Watson Delaunay triangulation over room centers.
//!
//! All scratch buffers (triangle list, cavity polygon) are owned by a single
//! call, so triangulation is reentrant.

use petgraph::unionfind::UnionFind;
use tracing::{debug, warn};

use crate::constants::SUPRA_TRIANGLE_SCALE;
use crate::geometry::edge::dedup_edges;
use crate::geometry::{bounding_box, Edge, Triangle, Vertex};

/// Result of triangulating a point set
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    /// Distinct input points, first occurrence order
    pub vertices: Vec<Vertex>,
    /// Surviving triangles (none touch the supra-triangle)
    pub triangles: Vec<Triangle>,
    /// Unique edges of the surviving triangles
    pub edges: Vec<Edge>,
    /// Enclosing triangle used during insertion, if one was built
    pub supra: Option<[Vertex; 3]>,
}

impl Triangulation {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Triangulate `points` and return the candidate connector edges.
///
/// Fewer than three distinct points cannot form a triangle: zero or one point
/// yields no edges, two points yield the single edge between them. If every
/// point is collinear the points are chained along their dominant axis.
pub fn triangulate(points: &[Vertex]) -> Triangulation {
    let vertices = distinct_points(points);

    match vertices.len() {
        0 | 1 => Triangulation {
            vertices,
            ..Default::default()
        },
        2 => Triangulation {
            edges: vec![Edge::new(vertices[0], vertices[1])],
            vertices,
            ..Default::default()
        },
        _ => bowyer_watson(vertices),
    }
}

fn bowyer_watson(vertices: Vec<Vertex>) -> Triangulation {
    let supra = supra_triangle(&vertices);
    let mut triangles = vec![Triangle::new(supra[0], supra[1], supra[2])];

    for &point in &vertices {
        let mut polygon: Vec<Edge> = Vec::new();

        for triangle in triangles.iter_mut() {
            if triangle.circumcircle_contains(point) {
                triangle.discard = true;
                polygon.extend(triangle.edges());
            }
        }
        triangles.retain(|t| !t.discard);

        // Edges shared by two bad triangles are interior to the cavity
        for i in 0..polygon.len() {
            for j in (i + 1)..polygon.len() {
                if polygon[i].almost_equal(&polygon[j]) {
                    polygon[i].discard = true;
                    polygon[j].discard = true;
                }
            }
        }
        polygon.retain(|e| !e.discard);

        triangles.extend(polygon.iter().map(|e| Triangle::new(e.u, e.v, point)));
    }

    let touches_supra = |t: &Triangle| supra.iter().any(|&s| t.contains_vertex(s));
    let (triangles, discarded): (Vec<Triangle>, Vec<Triangle>) = triangles
        .into_iter()
        .filter(|t| !t.is_degenerate())
        .partition(|t| !touches_supra(t));

    let all_edges: Vec<Edge> = triangles.iter().flat_map(|t| t.edges()).collect();
    let mut edges = dedup_edges(&all_edges);

    if !edges.is_empty() {
        let hull_edges: Vec<Edge> = discarded
            .iter()
            .flat_map(|t| t.edges())
            .filter(|e| !supra.iter().any(|&s| e.has_endpoint(s)))
            .collect();
        let repaired = reconnect(&vertices, &mut edges, &hull_edges);
        if repaired > 0 {
            debug!(repaired, "restored hull edges lost with the supra-triangle");
        }
    }

    if edges.is_empty() {
        warn!(
            points = vertices.len(),
            "triangulation produced no triangles, chaining collinear points"
        );
        edges = collinear_chain(&vertices);
    }

    debug!(
        points = vertices.len(),
        triangles = triangles.len(),
        edges = edges.len(),
        "triangulation complete"
    );

    Triangulation {
        vertices,
        triangles,
        edges,
        supra: Some(supra),
    }
}

/// Enclosing triangle centered on the bounding box, scaled by its larger span
fn supra_triangle(vertices: &[Vertex]) -> [Vertex; 3] {
    let Some(bounds) = bounding_box(vertices) else {
        return [Vertex::default(); 3];
    };
    let span = bounds.width().max(bounds.height()).max(1.0);
    let mid = bounds.center();
    let d = span * SUPRA_TRIANGLE_SCALE;

    [
        Vertex::new(mid.x - d, mid.y - d),
        Vertex::new(mid.x, mid.y + d),
        Vertex::new(mid.x + d, mid.y - d),
    ]
}

fn distinct_points(points: &[Vertex]) -> Vec<Vertex> {
    let mut distinct: Vec<Vertex> = Vec::with_capacity(points.len());
    for &p in points {
        if !distinct.iter().any(|d| d.approx_eq(p)) {
            distinct.push(p);
        }
    }
    distinct
}

/// Add edges from `spare` (in order) that join still-separate components,
/// until every vertex shares one component. Returns how many were added.
fn reconnect(vertices: &[Vertex], edges: &mut Vec<Edge>, spare: &[Edge]) -> usize {
    let index_of = |p: Vertex| vertices.iter().position(|v| v.approx_eq(p));
    let mut components = UnionFind::<usize>::new(vertices.len());
    let mut groups = vertices.len();

    for edge in edges.iter() {
        if let (Some(a), Some(b)) = (index_of(edge.u), index_of(edge.v)) {
            if components.union(a, b) {
                groups -= 1;
            }
        }
    }

    let mut added = 0;
    for edge in spare {
        if groups <= 1 {
            break;
        }
        if let (Some(a), Some(b)) = (index_of(edge.u), index_of(edge.v)) {
            if components.union(a, b) {
                groups -= 1;
                edges.push(*edge);
                added += 1;
            }
        }
    }
    added
}

fn collinear_chain(vertices: &[Vertex]) -> Vec<Edge> {
    let Some(bounds) = bounding_box(vertices) else {
        return Vec::new();
    };
    let mut sorted = vertices.to_vec();
    if bounds.width() >= bounds.height() {
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    } else {
        sorted.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    }
    sorted.windows(2).map(|w| Edge::new(w[0], w[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vertex> {
        vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(10.0, 0.0),
            Vertex::new(10.0, 10.0),
            Vertex::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_empty_and_single_point() {
        assert!(triangulate(&[]).is_empty());
        let single = triangulate(&[Vertex::new(3.0, 3.0)]);
        assert!(single.is_empty());
        assert_eq!(single.vertices.len(), 1);
    }

    #[test]
    fn test_two_points_yield_one_edge() {
        let t = triangulate(&[Vertex::new(1.0, 1.0), Vertex::new(9.0, 4.0)]);
        assert_eq!(t.edges.len(), 1);
        assert!(t.triangles.is_empty());
    }

    #[test]
    fn test_duplicate_points_collapse() {
        let t = triangulate(&[Vertex::new(1.0, 1.0), Vertex::new(1.0, 1.0)]);
        assert_eq!(t.vertices.len(), 1);
        assert!(t.is_empty());
    }

    #[test]
    fn test_three_points_single_triangle() {
        let t = triangulate(&[
            Vertex::new(0.0, 0.0),
            Vertex::new(8.0, 0.0),
            Vertex::new(4.0, 6.0),
        ]);
        assert_eq!(t.triangles.len(), 1);
        assert_eq!(t.edges.len(), 3);
    }

    #[test]
    fn test_square_has_two_triangles_and_five_edges() {
        let t = triangulate(&square());
        assert_eq!(t.triangles.len(), 2);
        assert_eq!(t.edges.len(), 5);
    }

    #[test]
    fn test_no_triangle_touches_supra_vertices() {
        let points = vec![
            Vertex::new(3.0, 4.0),
            Vertex::new(17.5, 2.0),
            Vertex::new(9.0, 12.0),
            Vertex::new(25.0, 18.5),
            Vertex::new(5.5, 21.0),
            Vertex::new(14.0, 8.0),
        ];
        let t = triangulate(&points);
        let supra = t.supra.unwrap();
        for triangle in &t.triangles {
            for s in supra {
                assert!(!triangle.contains_vertex(s));
            }
        }
    }

    #[test]
    fn test_delaunay_empty_circumcircle() {
        let points = vec![
            Vertex::new(3.0, 4.0),
            Vertex::new(17.5, 2.0),
            Vertex::new(9.0, 12.0),
            Vertex::new(25.0, 18.5),
            Vertex::new(5.5, 21.0),
            Vertex::new(14.0, 8.0),
            Vertex::new(30.0, 6.0),
        ];
        let t = triangulate(&points);
        assert!(!t.triangles.is_empty());
        for triangle in &t.triangles {
            let circle = triangle.circumcircle().unwrap();
            for &p in &points {
                if triangle.contains_vertex(p) {
                    continue;
                }
                let dx = p.x as f64 - circle.center_x;
                let dy = p.y as f64 - circle.center_y;
                assert!(
                    dx * dx + dy * dy >= circle.radius_sq - 1e-6,
                    "{p:?} lies inside circumcircle of {triangle:?}"
                );
            }
        }
    }

    #[test]
    fn test_collinear_points_are_chained() {
        let t = triangulate(&[
            Vertex::new(10.0, 2.0),
            Vertex::new(2.0, 2.0),
            Vertex::new(6.0, 2.0),
        ]);
        assert!(t.triangles.is_empty());
        assert_eq!(t.edges.len(), 2);
        assert!(t.edges[0].almost_equal(&Edge::new(Vertex::new(2.0, 2.0), Vertex::new(6.0, 2.0))));
        assert!(t.edges[1].almost_equal(&Edge::new(Vertex::new(6.0, 2.0), Vertex::new(10.0, 2.0))));
    }

    #[test]
    fn test_edges_are_unique() {
        let t = triangulate(&square());
        for (i, a) in t.edges.iter().enumerate() {
            for b in &t.edges[i + 1..] {
                assert!(!a.almost_equal(b));
            }
        }
    }

    #[test]
    fn test_reconnect_joins_components_once() {
        let vertices = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(4.0, 0.0),
            Vertex::new(9.0, 1.0),
        ];
        let mut edges = vec![Edge::new(vertices[0], vertices[1])];
        let spare = vec![
            Edge::new(vertices[1], vertices[0]),
            Edge::new(vertices[1], vertices[2]),
            Edge::new(vertices[0], vertices[2]),
        ];
        assert_eq!(reconnect(&vertices, &mut edges, &spare), 1);
        assert_eq!(edges.len(), 2);
        assert!(edges[1].almost_equal(&spare[1]));
    }
}
