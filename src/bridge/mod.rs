//! FFI Bridge Layer: dungeon core <-> game client
//!
//! C-ABI functions the client calls via DLL loading. Settings and results
//! cross the boundary as JSON. Every returned string is heap-allocated by
//! Rust and must be released with `dungeon_free_string`.
//!
//! Null or malformed input yields a null pointer, never a panic.

use serde::{Deserialize, Serialize};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use tracing::warn;

use crate::config::GenerationSettings;
use crate::generation::Dungeon;
use crate::geometry::Vertex;
use crate::logging;
use crate::navigation::path_length;

// ========================
// Data transfer types
// ========================

/// Path query result
#[derive(Debug, Serialize, Deserialize)]
pub struct PathResponse {
    pub found: bool,
    pub length: f32,
    pub points: Vec<(f32, f32)>,
}

impl PathResponse {
    fn from_path(path: &[Vertex]) -> Self {
        Self {
            found: !path.is_empty(),
            length: path_length(path),
            points: path.iter().map(|v| (v.x, v.y)).collect(),
        }
    }
}

// ========================
// Helpers
// ========================

fn json_to_cstring<T: Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn parse_cstr(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_owned()) }
}

fn dungeon_from_json(ptr: *const c_char) -> Option<Dungeon> {
    let json = parse_cstr(ptr)?;
    let settings = match GenerationSettings::from_json(&json) {
        Ok(s) => s.with_resolved_seed(),
        Err(e) => {
            warn!("rejected settings from FFI: {}", e);
            return None;
        }
    };
    Dungeon::generate(&settings).ok()
}

// ========================
// C-ABI: Core
// ========================

/// Version string
#[no_mangle]
pub extern "C" fn dungeon_version() -> *mut c_char {
    CString::new(env!("CARGO_PKG_VERSION"))
        .unwrap_or_default()
        .into_raw()
}

/// Install the tracing subscriber (no-op after the first call)
#[no_mangle]
pub extern "C" fn dungeon_init_logging(level_id: u32) {
    logging::init_tracing(&logging::TracingConfig::with_level(
        logging::LogLevel::from_id(level_id),
    ));
}

/// Free a string allocated by Rust.
/// Called from C; ptr must be from a prior Rust FFI allocation or null.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn dungeon_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

// ========================
// C-ABI: Generation
// ========================

/// Generate a dungeon from settings JSON and return its summary JSON
#[no_mangle]
pub extern "C" fn dungeon_generate(settings_json: *const c_char) -> *mut c_char {
    match dungeon_from_json(settings_json) {
        Some(dungeon) => json_to_cstring(&dungeon.summary()),
        None => std::ptr::null_mut(),
    }
}

/// Fingerprint of the dungeon the settings produce
#[no_mangle]
pub extern "C" fn dungeon_fingerprint(settings_json: *const c_char) -> *mut c_char {
    match dungeon_from_json(settings_json) {
        Some(dungeon) => CString::new(dungeon.fingerprint())
            .unwrap_or_default()
            .into_raw(),
        None => std::ptr::null_mut(),
    }
}

// ========================
// C-ABI: Navigation
// ========================

/// Regenerate the dungeon for `settings_json` and path between two points.
/// Generation is deterministic, so an explicit seed reproduces the dungeon
/// the caller already holds.
#[no_mangle]
pub extern "C" fn dungeon_find_path(
    settings_json: *const c_char,
    start_x: f32,
    start_y: f32,
    goal_x: f32,
    goal_y: f32,
) -> *mut c_char {
    let Some(dungeon) = dungeon_from_json(settings_json) else {
        return std::ptr::null_mut();
    };
    let path = dungeon.find_path(Vertex::new(start_x, start_y), Vertex::new(goal_x, goal_y));
    json_to_cstring(&PathResponse::from_path(&path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::DungeonSummary;

    fn settings_cstring(seed: u64) -> CString {
        let settings = GenerationSettings {
            seed,
            grid_width: 32,
            grid_height: 32,
            room_count: 6,
            max_room_width: 6,
            max_room_height: 6,
            ..GenerationSettings::default()
        };
        CString::new(settings.to_json()).unwrap()
    }

    fn take_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null(), "FFI returned null pointer");
        let s = unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_owned() };
        dungeon_free_string(ptr);
        s
    }

    #[test]
    fn test_version() {
        assert_eq!(take_string(dungeon_version()), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_generate_ffi() {
        let settings = settings_cstring(42);
        let json = take_string(dungeon_generate(settings.as_ptr()));
        let summary: DungeonSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary.seed, 42);
        assert_eq!(summary.width, 32);
        assert!(!summary.rooms.is_empty());
    }

    #[test]
    fn test_generate_ffi_deterministic() {
        let settings = settings_cstring(7);
        let a = take_string(dungeon_generate(settings.as_ptr()));
        let b = take_string(dungeon_generate(settings.as_ptr()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_ffi() {
        let settings = settings_cstring(8);
        let fp = take_string(dungeon_fingerprint(settings.as_ptr()));
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_find_path_ffi_spawn_to_spawn() {
        let settings = settings_cstring(5);
        let summary: DungeonSummary =
            serde_json::from_str(&take_string(dungeon_generate(settings.as_ptr()))).unwrap();
        let json = take_string(dungeon_find_path(
            settings.as_ptr(),
            summary.spawn.x,
            summary.spawn.y,
            summary.spawn.x,
            summary.spawn.y,
        ));
        let response: PathResponse = serde_json::from_str(&json).unwrap();
        assert!(response.found);
        assert_eq!(response.points.len(), 1);
        assert_eq!(response.length, 0.0);
    }

    #[test]
    fn test_find_path_ffi_outside_grid() {
        let settings = settings_cstring(5);
        let json = take_string(dungeon_find_path(settings.as_ptr(), -5.0, -5.0, 1.0, 1.0));
        let response: PathResponse = serde_json::from_str(&json).unwrap();
        assert!(!response.found);
        assert!(response.points.is_empty());
    }

    #[test]
    fn test_null_and_invalid_input() {
        assert!(dungeon_generate(std::ptr::null()).is_null());
        assert!(dungeon_fingerprint(std::ptr::null()).is_null());
        assert!(dungeon_find_path(std::ptr::null(), 0.0, 0.0, 1.0, 1.0).is_null());

        let garbage = CString::new("{not json").unwrap();
        assert!(dungeon_generate(garbage.as_ptr()).is_null());

        let invalid = CString::new(r#"{"grid_width": 0}"#).unwrap();
        assert!(dungeon_generate(invalid.as_ptr()).is_null());

        dungeon_free_string(std::ptr::null_mut());
    }

    #[test]
    fn test_init_logging_idempotent() {
        dungeon_init_logging(2);
        dungeon_init_logging(0);
    }
}
