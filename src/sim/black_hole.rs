//! Black holes: drifting gravity wells that shrink when shot
//!
//! A hole carries its own combat state (slow debuff, flash pulse) and is never
//! destroyed; damage saturates at [`BLACK_HOLE_MIN_RADIUS`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stable handle into the world's black hole list
///
/// Holes are never removed, so an index stays valid for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoleId(pub usize);

/// A gravity well body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackHole {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    /// Slow debuff ticks remaining
    pub slow_ticks: u32,
    /// Motion multiplier while slowed (1.0 = no slow)
    pub slow_factor: f32,
    /// Soft bloom over the core
    pub flash_alpha: u8,
    /// Rim pulse ticks remaining
    pub flash_ticks: u32,
    /// Ticks before another flash may start
    pub flash_cooldown: u32,
    /// Constant aura (0 = off)
    pub ambient_glow: u8,
}

impl BlackHole {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: radius.max(BLACK_HOLE_MIN_RADIUS),
            slow_ticks: 0,
            slow_factor: 1.0,
            flash_alpha: 0,
            flash_ticks: 0,
            flash_cooldown: 0,
            ambient_glow: 0,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Point on the rim at `angle` (radians)
    #[inline]
    pub fn rim_point(&self, angle: f32) -> Vec2 {
        self.pos + crate::polar_to_cartesian(self.radius, angle)
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_ticks > 0
    }

    /// True while the rim pulse is showing
    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }

    pub fn set_ambient_glow(&mut self, alpha: i32) {
        self.ambient_glow = alpha.clamp(0, 255) as u8;
    }

    /// Shrink by `amount`, never below the radius floor
    pub fn apply_damage(&mut self, amount: f32) {
        self.radius = (self.radius - amount).max(BLACK_HOLE_MIN_RADIUS);
    }

    /// Push along `dir` by `power` (added to velocity, no speed cap)
    pub fn apply_knockback(&mut self, dir: Vec2, power: f32) {
        let len = dir.length();
        if len < 1e-6 {
            return;
        }
        self.vel += dir / len * power;
    }

    /// Longest duration and strongest factor win
    pub fn apply_slow(&mut self, ticks: u32, factor: f32) {
        self.slow_ticks = self.slow_ticks.max(ticks);
        self.slow_factor = self.slow_factor.min(factor);
    }

    /// Grow after swallowing a star
    pub fn absorb_star(&mut self) {
        self.radius += 1.0;
    }

    /// Start a bloom + rim pulse unless the previous one is still cooling down
    ///
    /// Returns whether the pulse started.
    pub fn flash(&mut self) -> bool {
        if self.flash_cooldown > 0 {
            return false;
        }
        self.flash_alpha = FLASH_BLOOM_ALPHA;
        self.flash_ticks = FLASH_PULSE_TICKS;
        self.flash_cooldown = FLASH_COOLDOWN_TICKS;
        true
    }

    /// Decay flash state, drift, and bounce off the world edges
    pub fn update(&mut self, bounds: Vec2) {
        self.flash_alpha = self.flash_alpha.saturating_sub(FLASH_BLOOM_DECAY);
        self.flash_ticks = self.flash_ticks.saturating_sub(1);
        self.flash_cooldown = self.flash_cooldown.saturating_sub(1);

        let scale = if self.slow_ticks > 0 {
            self.slow_factor
        } else {
            1.0
        };
        if self.slow_ticks > 0 {
            self.slow_ticks -= 1;
            if self.slow_ticks == 0 {
                self.slow_factor = 1.0;
            }
        }

        self.pos += self.vel * scale;

        if self.pos.x - self.radius < 0.0 || self.pos.x + self.radius > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y - self.radius < 0.0 || self.pos.y + self.radius > bounds.y {
            self.vel.y = -self.vel.y;
        }
    }

    /// Where `point` appears after light bends around this hole
    ///
    /// Rendering only; physical positions are never lensed. Points at the
    /// centre come back unchanged, and points beyond two radii are untouched.
    pub fn lensing_offset(&self, point: Vec2) -> Vec2 {
        let d = point - self.pos;
        let d2 = d.length_squared();
        if d2 <= 1e-6 {
            return point;
        }

        let dist = d2.sqrt();
        let reach = self.radius * 2.0;
        let influence = ((reach - dist) / reach).clamp(0.0, 1.0);
        let bend = LENSING_STRENGTH * self.radius * influence * influence;

        // tangent to the radial direction
        let tangent = Vec2::new(-d.y, d.x) / dist;
        point + tangent * bend * dist
    }
}
