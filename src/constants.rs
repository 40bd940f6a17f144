//! Centralized constants for the dungeon core.
//!
//! Default generation settings, numeric tolerances and the supra-triangle
//! scale live here so the pipeline stages, the FFI bridge and the CLI agree.

// =====================================================
// Numeric tolerances
// =====================================================

/// Relative tolerance for `approx_equal` on large magnitudes
pub const RELATIVE_TOLERANCE: f32 = 1e-6;

/// Absolute floor for `approx_equal` near zero (8 machine epsilons)
pub const ABSOLUTE_TOLERANCE: f32 = f32::EPSILON * 8.0;

/// Determinants below this are treated as collinear in circumcircle math
pub const DEGENERATE_DETERMINANT: f64 = 1e-9;

/// Relative tolerance of the area-sum point-in-quad test
pub const AREA_TOLERANCE: f32 = 1e-4;

/// Two A* `f` costs closer than this are considered a tie
pub const PATH_COST_TOLERANCE: f32 = 1e-4;

// =====================================================
// Triangulation
// =====================================================

/// Supra-triangle size as a multiple of the larger bounding-box span
pub const SUPRA_TRIANGLE_SCALE: f32 = 20.0;

// =====================================================
// Default generation settings
// =====================================================

/// Largest accepted grid width or height. Keeps tile coordinates inside `i32`
/// and a full grid plus its navigation lookup within a few hundred MiB.
pub const MAX_GRID_DIMENSION: u32 = 4096;

pub const DEFAULT_GRID_WIDTH: u32 = 64;
pub const DEFAULT_GRID_HEIGHT: u32 = 64;
pub const DEFAULT_ROOM_COUNT: u32 = 12;
pub const DEFAULT_MIN_ROOM_SIZE: u32 = 4;
pub const DEFAULT_MAX_ROOM_SIZE: u32 = 10;
pub const DEFAULT_MAX_ROOM_ATTEMPTS: u32 = 50;
pub const DEFAULT_MAX_HALLWAY_EXPANSION: u32 = 3;

/// Percent chance (0..100) to keep a connector that is not on the spanning tree
pub const DEFAULT_EXTRA_HALLWAY_CHANCE: f32 = 12.5;
