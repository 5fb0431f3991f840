//! World configuration
//!
//! Loaded from a JSON file by the driver; every field has a default so a
//! partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Upper bound on the star field size
pub const MAX_STARS: usize = 10_000;

/// Settings loading/validation errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for [`Settings`]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but describe an unusable world
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Starting state of one black hole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackHoleSpawn {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
}

impl BlackHoleSpawn {
    pub fn new(x: f32, y: f32, radius: f32, vx: f32, vy: f32) -> Self {
        Self { x, y, radius, vx, vy }
    }
}

/// World settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for star placement and orbit release rolls
    pub seed: u64,

    // === World ===
    pub width: f32,
    pub height: f32,
    /// Number of background stars
    pub star_count: usize,
    /// Black holes present from the first tick
    pub black_holes: Vec<BlackHoleSpawn>,
    /// Constant aura on every black hole (0 = off)
    pub ambient_glow: u8,

    // === Player ===
    /// Ticks between shots while fire is held
    pub fire_interval_ticks: u32,
    /// Ticks between weapon cycles while cycle is held
    pub weapon_switch_ticks: u32,

    // === Driver ===
    /// Length of a headless run
    pub demo_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED_B1AC,

            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            star_count: 100,
            black_holes: vec![
                BlackHoleSpawn::new(300.0, 250.0, 30.0, 0.5, 0.23),
                BlackHoleSpawn::new(880.0, 520.0, 42.0, -0.35, 0.4),
            ],
            ambient_glow: 0,

            fire_interval_ticks: FIRE_INTERVAL_TICKS,
            weapon_switch_ticks: WEAPON_SWITCH_TICKS,

            demo_ticks: 10 * SIM_HZ,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(SettingsError::Invalid(format!(
                "world bounds must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.star_count > MAX_STARS {
            return Err(SettingsError::Invalid(format!(
                "star_count {} exceeds {}",
                self.star_count, MAX_STARS
            )));
        }
        if self.fire_interval_ticks == 0 || self.weapon_switch_ticks == 0 {
            return Err(SettingsError::Invalid(
                "fire and weapon switch intervals must be at least one tick".into(),
            ));
        }
        for (i, hole) in self.black_holes.iter().enumerate() {
            if !hole.radius.is_finite() || hole.radius < BLACK_HOLE_MIN_RADIUS {
                return Err(SettingsError::Invalid(format!(
                    "black hole {} radius {} is below the {} px floor",
                    i, hole.radius, BLACK_HOLE_MIN_RADIUS
                )));
            }
        }
        Ok(())
    }
}
