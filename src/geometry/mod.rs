//! Geometry kernel.
//!
//! Continuous-space primitives (`Vertex`, `Edge`, `Triangle`, `Rect`) and the
//! numeric predicates the generation pipeline is built on. Everything here is
//! pure: no allocation beyond return values, no error states.

pub mod edge;
pub mod triangle;

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::constants::{ABSOLUTE_TOLERANCE, RELATIVE_TOLERANCE};

pub use edge::Edge;
pub use triangle::{Circumcircle, Triangle};

/// Tolerance-based float comparison.
///
/// Absorbs the rounding that accumulates through triangulation arithmetic:
/// values within a relative 1e-6 (or 8 epsilons near zero) compare equal.
pub fn approx_equal(a: f32, b: f32) -> bool {
    let tolerance = (RELATIVE_TOLERANCE * a.abs().max(b.abs())).max(ABSOLUTE_TOLERANCE);
    (b - a).abs() < tolerance
}

/// Euclidean distance between two vertices
pub fn distance(a: Vertex, b: Vertex) -> f32 {
    (b - a).length()
}

/// A position in continuous grid space.
///
/// Equality is approximate per component (see [`approx_equal`]), so `Vertex`
/// is deliberately not `Eq` or `Hash`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vertex) -> f32 {
        distance(self, other)
    }

    pub fn approx_eq(self, other: Vertex) -> bool {
        approx_equal(self.x, other.x) && approx_equal(self.y, other.y)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other)
    }
}

impl Add for Vertex {
    type Output = Vertex;

    fn add(self, rhs: Vertex) -> Vertex {
        Vertex::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vertex {
    type Output = Vertex;

    fn sub(self, rhs: Vertex) -> Vertex {
        Vertex::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vertex {
    type Output = Vertex;

    fn mul(self, rhs: f32) -> Vertex {
        Vertex::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Coordinate> for Vertex {
    fn from(coord: Coordinate) -> Self {
        coord.center()
    }
}

/// A discrete grid cell index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of the cell in continuous space
    pub fn center(self) -> Vertex {
        Vertex::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The 8-neighborhood, row by row
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| self.offset(dx, dy))
    }
}

impl From<Vertex> for Coordinate {
    /// Truncates toward negative infinity so `-0.5` lands in cell `-1`
    fn from(v: Vertex) -> Self {
        Self::new(v.x.floor() as i32, v.y.floor() as i32)
    }
}

/// Offsets of the 8-neighborhood
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Axis-aligned rectangle in continuous space (`min` inclusive, `max` exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vertex,
    pub max: Vertex,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vertex::new(x, y),
            max: Vertex::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vertex {
        Vertex::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Interiors overlap. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vertex) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// `other` lies fully inside `self` (edges may coincide)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// Smallest axis-aligned box around `points`, `None` for an empty slice
pub fn bounding_box(points: &[Vertex]) -> Option<Rect> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(Rect { min, max })
}

pub fn rectangles_intersect(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

pub fn rectangle_contains(rect: &Rect, point: Vertex) -> bool {
    rect.contains(point)
}

/// Unsigned area of the triangle `abc`
pub fn triangle_area(a: Vertex, b: Vertex, c: Vertex) -> f32 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() * 0.5
}
