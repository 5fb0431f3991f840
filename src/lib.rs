//! Event Horizon - a 2D black hole shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (black holes, stars, projectiles, rings, frame tick)
//! - `settings`: World configuration loaded from JSON
//!
//! Windowing, input polling, audio and drawing live outside this crate. They
//! feed a [`sim::TickInput`] in and read [`sim::SimEvent`]s and
//! [`sim::WorldSnapshot`]s out.

pub mod settings;
pub mod sim;

pub use settings::{BlackHoleSpawn, Settings, SettingsError};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;

    /// Default world bounds
    pub const WORLD_WIDTH: f32 = 1200.0;
    pub const WORLD_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 40.0;
    pub const PLAYER_ACCEL: f32 = 0.8;
    pub const PLAYER_FRICTION: f32 = 0.9;
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    /// Degrees per tick for keyboard aim nudges
    pub const AIM_NUDGE_DEG: f32 = 3.0;
    /// Gap between player rim and projectile spawn point
    pub const MUZZLE_OFFSET: f32 = 36.0;

    /// Wave-shape amplitude range and step
    pub const WAVE_AMP_MIN: f32 = 0.1;
    pub const WAVE_AMP_MAX: f32 = 3.0;
    pub const WAVE_AMP_DEFAULT: f32 = 1.0;
    pub const WAVE_AMP_STEP: f32 = 0.01;
    /// Spin radians per tick per unit of amplitude
    pub const SPIN_RATE: f32 = 0.05;

    /// Debounce windows (ticks)
    pub const FIRE_INTERVAL_TICKS: u32 = 6; // 100 ms at 60 Hz
    pub const WEAPON_SWITCH_TICKS: u32 = 3; // 50 ms at 60 Hz

    /// Black hole tuning
    pub const BLACK_HOLE_MIN_RADIUS: f32 = 6.0;
    pub const FLASH_BLOOM_ALPHA: u8 = 180;
    pub const FLASH_BLOOM_DECAY: u8 = 12;
    pub const FLASH_PULSE_TICKS: u32 = 10;
    pub const FLASH_COOLDOWN_TICKS: u32 = 20;
    /// Lensing bend strength
    pub const LENSING_STRENGTH: f32 = 0.005;

    /// Star tuning
    pub const STAR_WRAP_MARGIN: f32 = 20.0;
    pub const STAR_PARALLAX_MIN: f32 = 0.2;
    pub const STAR_PARALLAX_SPAN: f32 = 1.0;
    /// Fraction of player velocity applied (scaled by parallax)
    pub const STAR_PLAYER_DRIFT: f32 = 0.25;
    /// Draft strength opposite the aim direction (scaled by parallax)
    pub const STAR_DRAFT: f32 = 5.0;
    /// Gravity range in hole radii
    pub const GRAVITY_RANGE: f32 = 5.0;
    /// Gravity strength multiplier
    pub const GRAVITY_STRENGTH: f32 = 1.5;
    /// Capture distance in hole radii
    pub const CAPTURE_RADIUS_FACTOR: f32 = 1.02;
    /// Orbit angular speed (radians per tick) = base + radius * per_radius
    pub const ORBIT_BASE_SPEED: f32 = 0.02;
    pub const ORBIT_SPEED_PER_RADIUS: f32 = 0.0005;
    /// Per-tick chance an orbiting star is flung back into free drift
    pub const ORBIT_RELEASE_CHANCE: f64 = 0.002;
    /// Attempts at finding a release spot clear of every gravity well
    pub const RELEASE_PLACEMENT_TRIES: u32 = 32;

    /// Projectile tuning
    pub const PROJECTILE_SPEED: f32 = 6.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_OFFSCREEN_MARGIN: f32 = 50.0;

    /// Particle ring tuning
    pub const RING_START_RADIUS: f32 = 1.0;
    pub const RING_EXPANSION: f32 = 3.0;
    pub const RING_START_ALPHA: f32 = 200.0;
    /// Growth-phase fade numerator (alpha per tick = this / max radius)
    pub const RING_GROW_FADE: f32 = 50.0;
    /// Fade per tick once locked at the max radius
    pub const RING_LOCKED_FADE: f32 = 7.0;
    /// Fade per tick for rings without a max radius
    pub const RING_UNBOUNDED_FADE: f32 = 4.0;
    pub const RING_STROKE: f32 = 2.0;
    pub const RING_STROKE_MIN: f32 = 0.5;
    pub const RING_STROKE_THIN: f32 = 0.2;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Normalized angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Unit vector for an angle given in degrees
#[inline]
pub fn heading(deg: f32) -> Vec2 {
    polar_to_cartesian(1.0, deg.to_radians())
}
