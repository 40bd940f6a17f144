//! Edge case & boundary tests
//!
//! Tests behavior at system boundaries:
//! - The two-room layout (trivial two-point triangulation)
//! - Zero / single room layouts
//! - Rooms that cannot fit → skipped, never aborted
//! - Unreachable or out-of-grid path queries → empty path
//! - Null / malformed FFI input → null, never a crash
//! - Settings files in both formats

use std::ffi::{CStr, CString};
use std::io::Write;
use std::os::raw::c_char;

use tower_dungeon::bridge::*;
use tower_dungeon::generation::connectors;
use tower_dungeon::generation::hallway::Hallway;
use tower_dungeon::navigation::path_length;
use tower_dungeon::{
    load_settings, Coordinate, Dungeon, Edge, GenerationSettings, NavigationIndex, SettingsError,
    TileGrid, TileType, Vertex,
};

// ============================================================
// Helpers
// ============================================================

fn two_room_settings() -> GenerationSettings {
    GenerationSettings {
        seed: 1,
        grid_width: 20,
        grid_height: 20,
        room_count: 2,
        min_room_width: 4,
        min_room_height: 4,
        max_room_width: 6,
        max_room_height: 6,
        ..GenerationSettings::default()
    }
}

fn ptr_to_string(ptr: *mut c_char) -> String {
    assert!(!ptr.is_null(), "FFI returned null pointer");
    let s = unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_owned() };
    dungeon_free_string(ptr);
    s
}

// ============================================================
// 1. Small layouts
// ============================================================

#[test]
fn two_rooms_single_connector() {
    let dungeon = Dungeon::generate(&two_room_settings()).unwrap();
    let rooms = dungeon.rooms();

    assert_eq!(rooms.len(), 2);
    assert!(!rooms[0].intersects(&rooms[1]));
    assert_eq!(dungeon.edges().len(), 1);
    assert_eq!(dungeon.hallways().len(), 1);
    assert_eq!(
        dungeon.edges()[0],
        Edge::new(rooms[0].center(), rooms[1].center())
    );

    let path = dungeon.find_path(rooms[0].center(), rooms[1].center());
    assert!(!path.is_empty());
    assert!(path_length(&path) >= rooms[0].center().distance(rooms[1].center()) - 2.0);
}

#[test]
fn zero_rooms_requested() {
    let settings = GenerationSettings {
        room_count: 0,
        ..two_room_settings()
    };
    let dungeon = Dungeon::generate(&settings).unwrap();
    assert!(dungeon.rooms().is_empty());
    assert!(dungeon.edges().is_empty());
    assert_eq!(dungeon.grid().count(TileType::Empty), 400);
    assert!(dungeon.find_path(Vertex::new(1.5, 1.5), Vertex::new(2.5, 2.5)).is_empty());
}

#[test]
fn room_that_cannot_fit_is_skipped() {
    // Grid exactly one max-size room wide: the second room always collides
    let settings = GenerationSettings {
        seed: 99,
        grid_width: 6,
        grid_height: 6,
        room_count: 4,
        min_room_width: 6,
        min_room_height: 6,
        max_room_width: 6,
        max_room_height: 6,
        max_room_attempts: 10,
        ..GenerationSettings::default()
    };
    let dungeon = Dungeon::generate(&settings).unwrap();
    assert_eq!(dungeon.rooms().len(), 1);
    assert_eq!(dungeon.grid().count(TileType::Floor), 36);
    assert_eq!(dungeon.grid().count(TileType::Wall), 0);
    assert!(dungeon.edges().is_empty());
}

#[test]
fn zero_attempts_places_nothing() {
    let settings = GenerationSettings {
        max_room_attempts: 0,
        ..two_room_settings()
    };
    let dungeon = Dungeon::generate(&settings).unwrap();
    assert!(dungeon.rooms().is_empty());
}

#[test]
fn seed_zero_is_used_as_given() {
    let settings = GenerationSettings {
        seed: 0,
        ..two_room_settings()
    };
    let a = Dungeon::generate(&settings).unwrap();
    let b = Dungeon::generate(&settings).unwrap();
    assert_eq!(a.settings().seed, 0);
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn resolved_seed_is_non_zero() {
    let settings = two_room_settings().with_seed(0).with_resolved_seed();
    assert_ne!(settings.seed, 0);
    assert_eq!(two_room_settings().with_resolved_seed().seed, 1);
}

// ============================================================
// 2. Settings validation
// ============================================================

#[test]
fn invalid_settings_rejected() {
    let cases = [
        GenerationSettings {
            grid_height: 0,
            ..two_room_settings()
        },
        GenerationSettings {
            max_room_width: 30,
            ..two_room_settings()
        },
        GenerationSettings {
            min_room_height: 7,
            ..two_room_settings()
        },
        GenerationSettings {
            extra_hallway_generation_chance: 150.0,
            ..two_room_settings()
        },
        GenerationSettings {
            max_hallway_expansion: 0,
            ..two_room_settings()
        },
    ];
    for settings in cases {
        assert!(
            matches!(Dungeon::generate(&settings), Err(SettingsError::Invalid(_))),
            "{settings:?} should be rejected"
        );
    }
}

#[test]
fn settings_files_load_by_extension() {
    let mut ron_file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
    write!(ron_file, "(seed: 5, grid_width: 30, room_count: 3)").unwrap();
    let settings = load_settings(ron_file.path()).unwrap();
    assert_eq!(settings.seed, 5);
    assert_eq!(settings.grid_width, 30);
    assert_eq!(settings.grid_height, GenerationSettings::default().grid_height);

    let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(json_file, "{}", two_room_settings().to_json()).unwrap();
    assert_eq!(load_settings(json_file.path()).unwrap(), two_room_settings());

    let txt_file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    assert!(matches!(
        load_settings(txt_file.path()),
        Err(SettingsError::UnsupportedFormat(_))
    ));
}

// ============================================================
// 3. Connector selection
// ============================================================

#[test]
fn extra_chance_bounds() {
    let square = [
        Vertex::new(0.0, 0.0),
        Vertex::new(10.0, 0.0),
        Vertex::new(10.0, 10.0),
        Vertex::new(0.0, 10.0),
    ];
    let candidates =
        tower_dungeon::generation::triangulation::triangulate(&square).edges;
    let mut rng = <tower_dungeon::generation::DungeonRng as rand::SeedableRng>::seed_from_u64(3);

    let none = connectors::reduce(&candidates, 0.0, &mut rng);
    assert_eq!(none.spanning.len(), 3);
    assert!(none.extra.is_empty());

    let all = connectors::reduce(&candidates, 100.0, &mut rng);
    assert_eq!(all.spanning.len(), 3);
    assert_eq!(all.len(), candidates.len());
}

// ============================================================
// 4. Navigation boundaries
// ============================================================

fn split_grid() -> TileGrid {
    // Two floor strips separated by an empty column
    let mut grid = TileGrid::new(9, 3);
    for y in 0..3 {
        for x in 0..4 {
            grid.set(Coordinate::new(x, y), TileType::Floor);
            grid.set(Coordinate::new(x + 5, y), TileType::Floor);
        }
    }
    grid
}

#[test]
fn unreachable_goal_yields_empty_path() {
    let nav = NavigationIndex::build(&split_grid());
    assert!(nav.find_path(Vertex::new(0.5, 1.5), Vertex::new(8.5, 1.5)).is_empty());
    assert_eq!(nav.find_path(Vertex::new(0.5, 1.5), Vertex::new(3.5, 1.5)).len(), 4);
}

#[test]
fn endpoints_off_floor_yield_empty_path() {
    let nav = NavigationIndex::build(&split_grid());
    assert!(nav.find_path(Vertex::new(4.5, 1.5), Vertex::new(0.5, 0.5)).is_empty());
    assert!(nav.find_path(Vertex::new(-1.0, 0.5), Vertex::new(0.5, 0.5)).is_empty());
    assert!(nav.find_path(Vertex::new(0.5, 0.5), Vertex::new(100.0, 0.5)).is_empty());
}

#[test]
fn start_equals_goal() {
    let nav = NavigationIndex::build(&split_grid());
    let path = nav.find_path(Vertex::new(2.2, 1.7), Vertex::new(2.9, 1.1));
    assert_eq!(path, vec![Vertex::new(2.5, 1.5)]);
}

#[test]
fn parallel_queries_match_sequential() {
    let dungeon = Dungeon::generate(&two_room_settings()).unwrap();
    let nav = dungeon.navigation();
    let centers: Vec<Vertex> = dungeon.rooms().iter().map(|r| r.center()).collect();
    let queries = vec![
        (centers[0], centers[1]),
        (centers[1], centers[0]),
        (dungeon.spawn(), centers[0]),
        (Vertex::new(-3.0, -3.0), centers[1]),
    ];
    let batch = nav.find_paths(&queries);
    for (result, &(start, goal)) in batch.iter().zip(&queries) {
        assert_eq!(result, &nav.find_path(start, goal));
    }
    assert!(batch[3].is_empty());
}

// ============================================================
// 5. Hallway degeneracy
// ============================================================

#[test]
fn zero_length_hallway_carves_nothing() {
    let mut grid = TileGrid::new(8, 8);
    let p = Vertex::new(4.0, 4.0);
    let hallway = Hallway::new(Edge::new(p, p), 2.0);
    assert_eq!(hallway.rasterize(&mut grid), 0);
    assert_eq!(grid.count(TileType::Floor), 0);
}

#[test]
fn hallway_outside_grid_is_clipped() {
    let mut grid = TileGrid::new(6, 6);
    let hallway = Hallway::new(
        Edge::new(Vertex::new(-10.0, 3.0), Vertex::new(20.0, 3.0)),
        1.0,
    );
    let written = hallway.rasterize(&mut grid);
    assert_eq!(written, grid.count(TileType::Floor));
    assert_eq!(written, 12);
}

// ============================================================
// 6. FFI null pointer safety
// ============================================================

#[test]
fn null_input_returns_null() {
    assert!(dungeon_generate(std::ptr::null()).is_null());
    assert!(dungeon_fingerprint(std::ptr::null()).is_null());
    assert!(dungeon_find_path(std::ptr::null(), 1.0, 1.0, 2.0, 2.0).is_null());
    dungeon_free_string(std::ptr::null_mut());
}

#[test]
fn oversized_grid_returns_null() {
    for json in [
        r#"{"seed":1,"grid_width":100000,"grid_height":100000,"room_count":0}"#,
        r#"{"seed":1,"grid_width":4097,"grid_height":16,"room_count":0}"#,
        r#"{"seed":1,"grid_width":16,"grid_height":4294967295,"room_count":0}"#,
    ] {
        let c = CString::new(json).unwrap();
        assert!(dungeon_generate(c.as_ptr()).is_null(), "accepted {json}");
        assert!(dungeon_fingerprint(c.as_ptr()).is_null());
        assert!(dungeon_find_path(c.as_ptr(), 0.5, 0.5, 1.5, 1.5).is_null());
    }

    let settings = GenerationSettings {
        grid_width: tower_dungeon::constants::MAX_GRID_DIMENSION + 1,
        ..two_room_settings()
    };
    assert!(matches!(
        Dungeon::generate(&settings),
        Err(SettingsError::Invalid(_))
    ));
}

#[test]
fn non_finite_path_endpoints_find_nothing() {
    let settings = two_room_settings();
    let dungeon = Dungeon::generate(&settings).unwrap();
    let spawn = dungeon.spawn();
    assert!(dungeon.find_path(Vertex::new(f32::NAN, f32::NAN), spawn).is_empty());

    let c = CString::new(settings.to_json()).unwrap();
    let json = ptr_to_string(dungeon_find_path(c.as_ptr(), f32::NAN, 0.0, spawn.x, spawn.y));
    let response: PathResponse = serde_json::from_str(&json).unwrap();
    assert!(!response.found);
    assert!(response.points.is_empty());
}

#[test]
fn malformed_json_returns_null() {
    for input in ["", "{", "null", r#"{"seed": "nope"}"#] {
        let c = CString::new(input).unwrap();
        assert!(dungeon_generate(c.as_ptr()).is_null(), "accepted {input:?}");
    }
}

#[test]
fn ffi_matches_library() {
    let settings = two_room_settings();
    let c = CString::new(settings.to_json()).unwrap();
    let fingerprint = ptr_to_string(dungeon_fingerprint(c.as_ptr()));
    assert_eq!(fingerprint, Dungeon::generate(&settings).unwrap().fingerprint());

    let empty = CString::new("{}").unwrap();
    let json = ptr_to_string(dungeon_generate(empty.as_ptr()));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["width"].as_u64(), Some(64));
    assert_ne!(value["seed"].as_u64(), Some(0));
}
