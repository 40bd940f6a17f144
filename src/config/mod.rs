//! Generation settings: defaults, validation, file loading.
//!
//! Settings files are RON or JSON, chosen by extension. Missing fields fall
//! back to the defaults, so a file only needs the values it overrides.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::*;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported settings file extension: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Read-only input to one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// 0 means "pick a time-derived seed" to callers; generation itself uses it as-is
    pub seed: u64,
    pub grid_width: u32,
    pub grid_height: u32,
    pub room_count: u32,
    pub min_room_width: u32,
    pub min_room_height: u32,
    pub max_room_width: u32,
    pub max_room_height: u32,
    pub max_room_attempts: u32,
    /// Exclusive upper bound of the corridor half-width draw
    pub max_hallway_expansion: u32,
    /// Percent chance (0..=100) to keep a non-spanning connector
    pub extra_hallway_generation_chance: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            room_count: DEFAULT_ROOM_COUNT,
            min_room_width: DEFAULT_MIN_ROOM_SIZE,
            min_room_height: DEFAULT_MIN_ROOM_SIZE,
            max_room_width: DEFAULT_MAX_ROOM_SIZE,
            max_room_height: DEFAULT_MAX_ROOM_SIZE,
            max_room_attempts: DEFAULT_MAX_ROOM_ATTEMPTS,
            max_hallway_expansion: DEFAULT_MAX_HALLWAY_EXPANSION,
            extra_hallway_generation_chance: DEFAULT_EXTRA_HALLWAY_CHANCE,
        }
    }
}

impl GenerationSettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace a zero seed with one derived from the wall clock
    pub fn with_resolved_seed(mut self) -> Self {
        if self.seed == 0 {
            self.seed = time_derived_seed();
        }
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(SettingsError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > MAX_GRID_DIMENSION || self.grid_height > MAX_GRID_DIMENSION {
            return Err(SettingsError::Invalid(format!(
                "grid {}x{} exceeds the {MAX_GRID_DIMENSION} tile limit per side",
                self.grid_width, self.grid_height
            )));
        }
        if self.min_room_width == 0 || self.min_room_height == 0 {
            return Err(SettingsError::Invalid(
                "minimum room size must be at least 1".to_string(),
            ));
        }
        if self.min_room_width > self.max_room_width || self.min_room_height > self.max_room_height
        {
            return Err(SettingsError::Invalid(format!(
                "minimum room size {}x{} exceeds maximum {}x{}",
                self.min_room_width, self.min_room_height, self.max_room_width, self.max_room_height
            )));
        }
        if self.max_room_width > self.grid_width || self.max_room_height > self.grid_height {
            return Err(SettingsError::Invalid(format!(
                "maximum room size {}x{} does not fit grid {}x{}",
                self.max_room_width, self.max_room_height, self.grid_width, self.grid_height
            )));
        }
        if self.max_hallway_expansion == 0 {
            return Err(SettingsError::Invalid(
                "max hallway expansion must be at least 1".to_string(),
            ));
        }
        let chance = self.extra_hallway_generation_chance;
        if chance.is_nan() || !(0.0..=100.0).contains(&chance) {
            return Err(SettingsError::Invalid(format!(
                "extra hallway chance must be within 0..=100, got {chance}"
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_ron(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Load and validate settings from a `.ron` or `.json` file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<GenerationSettings, SettingsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ron" => GenerationSettings::from_ron(&content),
        "json" => GenerationSettings::from_json(&content),
        other => Err(SettingsError::UnsupportedFormat(other.to_string())),
    }
}

/// SHA3-256 of the current UNIX time in nanoseconds, folded to a non-zero u64
pub fn time_derived_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha3_256::new();
    hasher.update(nanos.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(bytes).max(1)
}
