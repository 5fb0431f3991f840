//! Projectiles and the weapons that fire them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::black_hole::HoleId;
use crate::consts::*;

/// Player weapon
///
/// Each weapon's on-hit behavior is data in [`WeaponTuning`]; a single
/// resolver in `collision` interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weapon {
    /// Triangle wave: heavy damage plus knockback
    #[default]
    Heavy,
    /// Square wave: bursts into fragments on impact
    Split,
    /// Sine wave: passes through, slowing what it hits
    Pierce,
}

/// Slow debuff applied on hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlowDebuff {
    pub ticks: u32,
    pub factor: f32,
}

/// Fragment burst spawned on hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitBurst {
    pub count: u32,
    /// Angle between neighbouring fragments (degrees)
    pub spread_deg: f32,
    pub speed_scale: f32,
    pub radius_scale: f32,
}

/// Ring spawned on hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRing {
    None,
    /// Centered on the hole, capped at its pre-hit radius
    HoleRim,
    /// Centered on the impact point, unbounded
    Impact,
}

/// Per-weapon on-hit constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponTuning {
    pub damage: f32,
    /// Knockback power along the player's movement input (0 = none)
    pub knockback: f32,
    pub slow: Option<SlowDebuff>,
    /// Hits survived before the projectile dies
    pub pierce_limit: u8,
    pub split: Option<SplitBurst>,
    pub ring: HitRing,
}

impl Weapon {
    pub const ALL: [Weapon; 3] = [Weapon::Heavy, Weapon::Split, Weapon::Pierce];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weapon::Heavy => "Heavy",
            Weapon::Split => "Split",
            Weapon::Pierce => "Pierce",
        }
    }

    /// Next weapon in the cycle order
    pub fn next(self) -> Self {
        match self {
            Weapon::Heavy => Weapon::Split,
            Weapon::Split => Weapon::Pierce,
            Weapon::Pierce => Weapon::Heavy,
        }
    }

    pub fn tuning(&self) -> WeaponTuning {
        match self {
            Weapon::Heavy => WeaponTuning {
                damage: 1.2,
                knockback: 1.5,
                slow: None,
                pierce_limit: 1,
                split: None,
                ring: HitRing::HoleRim,
            },
            Weapon::Split => WeaponTuning {
                damage: 0.45,
                knockback: 0.0,
                slow: None,
                pierce_limit: 1,
                split: Some(SplitBurst {
                    count: 4,
                    spread_deg: 45.0,
                    speed_scale: 1.15,
                    radius_scale: 0.6,
                }),
                ring: HitRing::Impact,
            },
            Weapon::Pierce => WeaponTuning {
                damage: 0.2,
                knockback: 0.0,
                slow: Some(SlowDebuff {
                    ticks: 28,
                    factor: 0.55,
                }),
                pierce_limit: 3,
                split: None,
                ring: HitRing::None,
            },
        }
    }
}

/// A player-fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub weapon: Weapon,
    /// Fire angle (radians), kept for drawing the wave trail
    pub angle: f32,
    /// Wave-shape amplitude at fire time
    pub wave_amp: f32,
    /// Hits taken so far
    pub pierce: u8,
    /// Spawned by a split burst (never splits again)
    pub fragment: bool,
    pub alive: bool,
    /// Holes the projectile currently overlaps (a hit counts on entry only)
    #[serde(default)]
    pub inside_holes: Vec<HoleId>,
}

impl Projectile {
    pub fn new(pos: Vec2, angle: f32, weapon: Weapon, wave_amp: f32) -> Self {
        Self {
            pos,
            vel: crate::polar_to_cartesian(PROJECTILE_SPEED, angle),
            radius: PROJECTILE_RADIUS,
            weapon,
            angle,
            wave_amp,
            pierce: 0,
            fragment: false,
            alive: true,
            inside_holes: Vec::new(),
        }
    }

    /// Fragment of a split burst, already moving at `speed`
    pub fn fragment(pos: Vec2, angle: f32, speed: f32, radius: f32, parent: &Projectile) -> Self {
        Self {
            pos,
            vel: crate::polar_to_cartesian(speed, angle),
            radius,
            weapon: parent.weapon,
            angle,
            wave_amp: parent.wave_amp,
            pierce: 0,
            fragment: true,
            alive: true,
            inside_holes: Vec::new(),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_offscreen(&self, bounds: Vec2) -> bool {
        let m = PROJECTILE_OFFSCREEN_MARGIN;
        self.pos.x < -m || self.pos.x > bounds.x + m || self.pos.y < -m || self.pos.y > bounds.y + m
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Count a hit; returns the new count
    pub fn increment_pierce(&mut self) -> u8 {
        self.pierce = self.pierce.saturating_add(1);
        self.pierce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_velocity_from_angle() {
        let p = Projectile::new(Vec2::ZERO, FRAC_PI_2, Weapon::Heavy, 1.0);
        assert!(p.vel.x.abs() < 1e-5);
        assert!((p.vel.y - PROJECTILE_SPEED).abs() < 1e-5);
        assert!(p.alive);
        assert_eq!(p.pierce, 0);
    }

    #[test]
    fn test_linear_motion() {
        let mut p = Projectile::new(Vec2::new(10.0, 10.0), 0.0, Weapon::Split, 1.0);
        p.update();
        p.update();
        assert!((p.pos - Vec2::new(22.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_offscreen_margin() {
        let bounds = Vec2::new(100.0, 100.0);
        let mut p = Projectile::new(Vec2::new(-49.0, 50.0), 0.0, Weapon::Heavy, 1.0);
        assert!(!p.is_offscreen(bounds));
        p.pos.x = -51.0;
        assert!(p.is_offscreen(bounds));
        p.pos = Vec2::new(50.0, 151.0);
        assert!(p.is_offscreen(bounds));
    }

    #[test]
    fn test_kill_idempotent() {
        let mut p = Projectile::new(Vec2::ZERO, 0.0, Weapon::Pierce, 1.0);
        p.kill();
        p.kill();
        assert!(!p.alive);
    }

    #[test]
    fn test_weapon_cycle() {
        assert_eq!(Weapon::Heavy.next(), Weapon::Split);
        assert_eq!(Weapon::Split.next(), Weapon::Pierce);
        assert_eq!(Weapon::Pierce.next(), Weapon::Heavy);
    }

    #[test]
    fn test_tuning_table() {
        assert_eq!(Weapon::Heavy.tuning().damage, 1.2);
        assert_eq!(Weapon::Split.tuning().split.map(|s| s.count), Some(4));
        assert_eq!(Weapon::Pierce.tuning().pierce_limit, 3);
        let slow = Weapon::Pierce.tuning().slow.unwrap();
        assert_eq!(slow.ticks, 28);
        assert_eq!(slow.factor, 0.55);
    }
}
